use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::shipments::{CreateShipmentRequest, ShipmentList, UpdateShipmentRequest},
    entity::{
        products::{Column as ProdCol, Entity as Products},
        shipments::{ActiveModel, Column, Entity as Shipments, Model as ShipmentModel},
        transactions::ActiveModel as TransactionActive,
    },
    error::{AppError, AppResult},
    ledger::{self, Rebooking},
    middleware::auth::{AuthUser, ensure_admin},
    models::Shipment,
    response::{ApiResponse, Meta},
    routes::params::{ShipmentQuery, SortOrder},
    services::product_service::set_stock,
    state::AppState,
};

pub async fn list_shipments(
    state: &AppState,
    query: ShipmentQuery,
) -> AppResult<ApiResponse<ShipmentList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(product_id) = query.product_id {
        condition = condition.add(Column::ProductId.eq(product_id));
    }
    if let Some(department) = query.department {
        condition = condition.add(Column::Department.eq(department.as_str()));
    }

    let mut finder = Shipments::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(Column::ShipmentDate),
        SortOrder::Desc => finder.order_by_desc(Column::ShipmentDate),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(shipment_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Shipments", ShipmentList { items }, Some(meta)))
}

pub async fn get_shipment(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Shipment>> {
    let shipment = Shipments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Shipment",
        shipment_from_entity(shipment)?,
        None,
    ))
}

/// Ships stock out of a product. The stock decrement, the shipment row and
/// the negative ledger entry commit together or not at all.
pub async fn ship_out(
    state: &AppState,
    user: &AuthUser,
    payload: CreateShipmentRequest,
) -> AppResult<ApiResponse<Shipment>> {
    payload.validate()?;

    let txn = state.orm.begin().await?;

    let product = Products::find_by_id(payload.product_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let remaining = ledger::ship(product.stock, payload.quantity)?;
    // The ledger entry is dated with the product's receive date, not the
    // shipment date.
    let ledger_date = product.rcv_date;
    let product = set_stock(&txn, product, remaining).await?;

    let shipment = ActiveModel {
        id: Set(Uuid::new_v4()),
        department: Set(payload.department.as_str().to_string()),
        name: Set(payload.name),
        quantity: Set(payload.quantity),
        shipment_date: Set(payload.shipment_date),
        product_id: Set(product.id),
    }
    .insert(&txn)
    .await?;

    TransactionActive {
        id: Set(Uuid::new_v4()),
        quantity: Set(-shipment.quantity),
        date: Set(ledger_date),
        product_id: Set(product.id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        shipment_id = %shipment.id,
        product_id = %product.id,
        quantity = shipment.quantity,
        stock = product.stock,
        "shipment recorded"
    );
    audit::record(
        &state.orm,
        Some(user.user_id),
        "shipment_create",
        "shipments",
        serde_json::json!({ "shipment_id": shipment.id, "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully added a new shipment.",
        shipment_from_entity(shipment)?,
        Some(Meta::empty()),
    ))
}

/// Rebooks a shipment: its current quantity goes back to the product it was
/// taken from, then the new quantity is taken from the (possibly different)
/// target product. No ledger entry is written for the correction.
pub async fn update_shipment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateShipmentRequest,
) -> AppResult<ApiResponse<Shipment>> {
    payload.validate()?;

    let txn = state.orm.begin().await?;

    let shipment = Shipments::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let source_id = shipment.product_id;
    let target_id = payload.product_id.unwrap_or(source_id);
    let new_quantity = payload.quantity.unwrap_or(shipment.quantity);

    let mut products = Products::find()
        .filter(ProdCol::Id.is_in([source_id, target_id]))
        .order_by_asc(ProdCol::Id)
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    let source_pos = products
        .iter()
        .position(|p| p.id == source_id)
        .ok_or(AppError::NotFound)?;
    let source = products.swap_remove(source_pos);
    let target = if target_id == source_id {
        None
    } else {
        let target_pos = products
            .iter()
            .position(|p| p.id == target_id)
            .ok_or(AppError::NotFound)?;
        Some(products.swap_remove(target_pos))
    };

    let rebooking = ledger::rebook(
        source.stock,
        shipment.quantity,
        target.as_ref().map(|p| p.stock),
        new_quantity,
    )?;

    match (rebooking, target) {
        (Rebooking::SameProduct { stock }, None) => {
            set_stock(&txn, source, stock).await?;
        }
        (
            Rebooking::Moved {
                source_stock,
                target_stock,
            },
            Some(target),
        ) => {
            set_stock(&txn, source, source_stock).await?;
            set_stock(&txn, target, target_stock).await?;
        }
        _ => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "rebooking does not match shipment products"
            )));
        }
    }

    let mut active: ActiveModel = shipment.into();
    if let Some(department) = payload.department {
        active.department = Set(department.as_str().to_string());
    }
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(shipment_date) = payload.shipment_date {
        active.shipment_date = Set(shipment_date);
    }
    active.quantity = Set(new_quantity);
    active.product_id = Set(target_id);
    let shipment = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        shipment_id = %shipment.id,
        from_product = %source_id,
        to_product = %target_id,
        quantity = shipment.quantity,
        "shipment rebooked"
    );
    audit::record(
        &state.orm,
        Some(user.user_id),
        "shipment_update",
        "shipments",
        serde_json::json!({ "shipment_id": shipment.id, "product_id": target_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully edited the shipment.",
        shipment_from_entity(shipment)?,
        Some(Meta::empty()),
    ))
}

/// Cancels a shipment and returns its quantity to stock. The ledger entry
/// written when it shipped is kept.
pub async fn delete_shipment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;

    let shipment = Shipments::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let product = Products::find_by_id(shipment.product_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let restored = product.stock + shipment.quantity;
    let product = set_stock(&txn, product, restored).await?;
    Shipments::delete_by_id(shipment.id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        shipment_id = %id,
        product_id = %product.id,
        stock = product.stock,
        "shipment deleted"
    );
    audit::record(
        &state.orm,
        Some(user.user_id),
        "shipment_delete",
        "shipments",
        serde_json::json!({ "shipment_id": id, "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::deleted(
        "You have successfully deleted the shipment.",
    ))
}

fn shipment_from_entity(model: ShipmentModel) -> AppResult<Shipment> {
    Shipment::try_from(model).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}
