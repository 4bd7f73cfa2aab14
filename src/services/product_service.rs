use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::products::{ProductList, ReceiveProductRequest, UpdateProductRequest},
    entity::{
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        shipments::{Column as ShipmentCol, Entity as Shipments},
        suppliers::Entity as Suppliers,
        transactions::{
            ActiveModel as TransactionActive, Column as TransactionCol, Entity as Transactions,
        },
    },
    error::{AppError, AppResult},
    ledger,
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Name.contains(search));
    }
    if let Some(location) = query.location.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Location.eq(location.clone()));
    }
    if let Some(supplier_id) = query.supplier_id {
        condition = condition.add(Column::SupplierId.eq(supplier_id));
    }

    let sort_col = match query.sort_by.unwrap_or(ProductSortBy::Name) {
        ProductSortBy::Name => Column::Name,
        ProductSortBy::Stock => Column::Stock,
        ProductSortBy::ExpDate => Column::ExpDate,
        ProductSortBy::RcvDate => Column::RcvDate,
    };

    let mut finder = Products::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Asc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", Product::from(product), None))
}

/// Registers newly received stock: the product row and its opening ledger
/// entry are written in one database transaction.
pub async fn receive_product(
    state: &AppState,
    user: &AuthUser,
    payload: ReceiveProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    ledger::check_receipt(payload.stock)?;

    let txn = state.orm.begin().await?;

    if let Some(supplier_id) = payload.supplier_id {
        ensure_supplier_exists(&txn, supplier_id).await?;
    }

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        mfg_date: Set(payload.mfg_date),
        rcv_date: Set(payload.rcv_date),
        exp_date: Set(payload.exp_date),
        location: Set(payload.location),
        stock: Set(payload.stock),
        supplier_id: Set(payload.supplier_id),
    }
    .insert(&txn)
    .await?;

    TransactionActive {
        id: Set(Uuid::new_v4()),
        quantity: Set(product.stock),
        date: Set(product.rcv_date),
        product_id: Set(product.id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(product_id = %product.id, stock = product.stock, "product received");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_receive",
        "products",
        serde_json::json!({ "product_id": product.id, "stock": product.stock }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully added a new product.",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

/// Overwrites product fields. Stock edits here bypass the ledger: no
/// transaction row is written.
pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(mfg_date) = payload.mfg_date {
        active.mfg_date = Set(mfg_date);
    }
    if let Some(rcv_date) = payload.rcv_date {
        active.rcv_date = Set(rcv_date);
    }
    if let Some(exp_date) = payload.exp_date {
        active.exp_date = Set(exp_date);
    }
    if let Some(location) = payload.location {
        active.location = Set(location);
    }
    if let Some(stock) = payload.stock {
        ledger::check_stock_edit(stock)?;
        active.stock = Set(stock);
    }
    if let Some(supplier_id) = payload.supplier_id {
        if let Some(supplier_id) = supplier_id {
            ensure_supplier_exists(&state.orm, supplier_id).await?;
        }
        active.supplier_id = Set(supplier_id);
    }

    let product = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully edited the product.",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

/// Deletes a product together with its ledger entries. Products that still
/// have shipments are refused so no shipment is left pointing at nothing.
pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    Products::find_by_id(id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let shipments = Shipments::find()
        .filter(ShipmentCol::ProductId.eq(id))
        .count(&txn)
        .await?;
    if shipments > 0 {
        return Err(AppError::BadRequest(format!(
            "Product still has {shipments} shipment(s); delete them first"
        )));
    }

    let removed = Transactions::delete_many()
        .filter(TransactionCol::ProductId.eq(id))
        .exec(&txn)
        .await?;
    Products::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(product_id = %id, transactions = removed.rows_affected, "product deleted");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::deleted(
        "You have successfully deleted the product.",
    ))
}

/// Writes a new stock level onto an already locked product row.
pub(crate) async fn set_stock<C: ConnectionTrait>(
    conn: &C,
    product: ProductModel,
    stock: f64,
) -> AppResult<ProductModel> {
    let mut active: ActiveModel = product.into();
    active.stock = Set(stock);
    Ok(active.update(conn).await?)
}

async fn ensure_supplier_exists<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<()> {
    Suppliers::find_by_id(id)
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or(AppError::NotFound)
}
