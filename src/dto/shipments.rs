use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Department, Shipment};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShipmentRequest {
    pub product_id: Uuid,
    pub department: Department,
    #[validate(
        length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub name: String,
    pub quantity: f64,
    pub shipment_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateShipmentRequest {
    pub product_id: Option<Uuid>,
    pub department: Option<Department>,
    #[validate(
        length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub shipment_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ShipmentList {
    #[schema(value_type = Vec<Shipment>)]
    pub items: Vec<Shipment>,
}
