use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    dto::inventory::{InventoryList, ReportQuery, TransactionReport},
    entity::{
        products::{Column as ProdCol, Entity as Products},
        transactions::{Column as TransactionCol, Entity as Transactions},
    },
    error::AppResult,
    ledger,
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Stock on hand per (product name, location) with the earliest expiry.
pub async fn list_inventory(state: &AppState) -> AppResult<ApiResponse<InventoryList>> {
    let products = Products::find()
        .order_by_asc(ProdCol::Name)
        .order_by_asc(ProdCol::Location)
        .all(&state.orm)
        .await?;

    let items = ledger::aggregate_inventory(&products);
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Inventory",
        InventoryList { items },
        Some(meta),
    ))
}

/// Daily in/out totals per product between two dates, both inclusive.
/// Without both bounds the report is empty.
pub async fn report_transactions(
    state: &AppState,
    user: &AuthUser,
    query: ReportQuery,
) -> AppResult<ApiResponse<TransactionReport>> {
    ensure_admin(user)?;

    let (Some(from_date), Some(to_date)) = (query.from_date, query.to_date) else {
        return Ok(ApiResponse::success(
            "Report",
            TransactionReport {
                from_date: query.from_date,
                to_date: query.to_date,
                rows: Vec::new(),
            },
            Some(Meta::total(0)),
        ));
    };

    let entries = Transactions::find()
        .filter(TransactionCol::Date.between(from_date, to_date))
        .order_by_asc(TransactionCol::Date)
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    tracing::debug!(%from_date, %to_date, entries = entries.len(), "building transaction report");

    let rows = ledger::aggregate_report(entries.into_iter().map(|(entry, product)| {
        let name = product
            .map(|p| p.name)
            .unwrap_or_else(|| entry.product_id.to_string());
        (entry.date, name, entry.quantity)
    }));

    let meta = Meta::total(rows.len());
    Ok(ApiResponse::success(
        "Report",
        TransactionReport {
            from_date: Some(from_date),
            to_date: Some(to_date),
            rows,
        },
        Some(meta),
    ))
}
