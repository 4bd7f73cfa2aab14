use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::inventory::{InventoryList, ReportQuery, TransactionReport},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::inventory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(list_inventory))
        .route("/reports/transactions", get(report_transactions))
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (
            status = 200,
            description = "Stock grouped by product name and location",
            body = ApiResponse<InventoryList>
        ),
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<InventoryList>>> {
    let resp = inventory_service::list_inventory(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/reports/transactions",
    params(ReportQuery),
    responses(
        (
            status = 200,
            description = "Daily in/out totals per product",
            body = ApiResponse<TransactionReport>
        ),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn report_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ApiResponse<TransactionReport>>> {
    let resp = inventory_service::report_transactions(&state, &user, query).await?;
    Ok(Json(resp))
}
