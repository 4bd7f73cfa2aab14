use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::suppliers::{CreateSupplierRequest, SupplierList, UpdateSupplierRequest},
    entity::{
        products::{Column as ProdCol, Entity as Products},
        suppliers::{ActiveModel, Column, Entity as Suppliers},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Supplier,
    response::{ApiResponse, Meta},
    routes::params::SupplierQuery,
    state::AppState,
};

pub async fn list_suppliers(
    state: &AppState,
    query: SupplierQuery,
) -> AppResult<ApiResponse<SupplierList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Name.contains(search));
    }

    let finder = Suppliers::find()
        .filter(condition)
        .order_by_asc(Column::Name);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Supplier::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Suppliers", SupplierList { items }, Some(meta)))
}

pub async fn get_supplier(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Supplier>> {
    let supplier = Suppliers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Supplier", Supplier::from(supplier), None))
}

pub async fn create_supplier(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSupplierRequest,
) -> AppResult<ApiResponse<Supplier>> {
    payload.validate()?;
    ensure_email_free(&state.orm, &payload.email, None).await?;

    let supplier = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        contact: Set(payload.contact),
        address: Set(payload.address),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "supplier_create",
        "suppliers",
        serde_json::json!({ "supplier_id": supplier.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully added a new supplier.",
        Supplier::from(supplier),
        Some(Meta::empty()),
    ))
}

pub async fn update_supplier(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateSupplierRequest,
) -> AppResult<ApiResponse<Supplier>> {
    payload.validate()?;
    let existing = Suppliers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(email) = payload.email {
        ensure_email_free(&state.orm, &email, Some(id)).await?;
        active.email = Set(email);
    }
    if let Some(contact) = payload.contact {
        active.contact = Set(contact);
    }
    if let Some(address) = payload.address {
        active.address = Set(address);
    }

    let supplier = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "supplier_update",
        "suppliers",
        serde_json::json!({ "supplier_id": supplier.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully edited the supplier.",
        Supplier::from(supplier),
        Some(Meta::empty()),
    ))
}

/// Deletes a supplier and detaches its products.
pub async fn delete_supplier(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    Suppliers::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let detached = Products::update_many()
        .col_expr(ProdCol::SupplierId, Expr::value(Option::<Uuid>::None))
        .filter(ProdCol::SupplierId.eq(id))
        .exec(&txn)
        .await?;
    Suppliers::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(supplier_id = %id, products = detached.rows_affected, "supplier deleted");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "supplier_delete",
        "suppliers",
        serde_json::json!({ "supplier_id": id }),
    )
    .await;

    Ok(ApiResponse::deleted(
        "You have successfully deleted the supplier.",
    ))
}

async fn ensure_email_free<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    current: Option<Uuid>,
) -> AppResult<()> {
    let mut condition = Condition::all().add(Column::Email.eq(email));
    if let Some(id) = current {
        condition = condition.add(Column::Id.ne(id));
    }
    let taken = Suppliers::find().filter(condition).count(conn).await?;
    if taken > 0 {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }
    Ok(())
}
