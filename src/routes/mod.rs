use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod health;
pub mod inventory;
pub mod params;
pub mod products;
pub mod shipments;
pub mod suppliers;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/suppliers", suppliers::router())
        .nest("/products", products::router())
        .nest("/shipments", shipments::router())
        .merge(inventory::router())
}
