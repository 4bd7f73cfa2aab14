use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::shipments::{CreateShipmentRequest, ShipmentList, UpdateShipmentRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Shipment,
    response::ApiResponse,
    routes::params::ShipmentQuery,
    services::shipment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shipments).post(ship_out))
        .route(
            "/{id}",
            get(get_shipment).put(update_shipment).delete(delete_shipment),
        )
}

#[utoipa::path(
    get,
    path = "/api/shipments",
    params(ShipmentQuery),
    responses(
        (status = 200, description = "List shipments", body = ApiResponse<ShipmentList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipments"
)]
pub async fn list_shipments(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ShipmentQuery>,
) -> AppResult<Json<ApiResponse<ShipmentList>>> {
    let resp = shipment_service::list_shipments(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shipments/{id}",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Get shipment", body = ApiResponse<Shipment>),
        (status = 404, description = "Shipment not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipments"
)]
pub async fn get_shipment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = shipment_service::get_shipment(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/shipments",
    request_body = CreateShipmentRequest,
    responses(
        (status = 201, description = "Stock shipped out", body = ApiResponse<Shipment>),
        (status = 400, description = "Specified quantity is not correct or not available"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipments"
)]
pub async fn ship_out(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateShipmentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Shipment>>)> {
    let resp = shipment_service::ship_out(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/shipments/{id}",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    request_body = UpdateShipmentRequest,
    responses(
        (status = 200, description = "Shipment rebooked", body = ApiResponse<Shipment>),
        (status = 400, description = "Specified quantity is not available"),
        (status = 404, description = "Shipment or product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipments"
)]
pub async fn update_shipment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShipmentRequest>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = shipment_service::update_shipment(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/shipments/{id}",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Shipment deleted, stock restored"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Shipment not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipments"
)]
pub async fn delete_shipment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = shipment_service::delete_shipment(&state, &user, id).await?;
    Ok(Json(resp))
}
