use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Product;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReceiveProductRequest {
    #[validate(
        length(min = 1, max = 60, message = "Name must be between 1 and 60 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub name: String,
    pub mfg_date: NaiveDate,
    pub rcv_date: NaiveDate,
    pub exp_date: NaiveDate,
    #[validate(
        length(min = 1, max = 100, message = "Location must be between 1 and 100 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub location: String,
    pub stock: f64,
    pub supplier_id: Option<Uuid>,
}

/// Fields left out keep their current value. `supplier_id: null` detaches
/// the supplier.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(
        length(min = 1, max = 60, message = "Name must be between 1 and 60 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub name: Option<String>,
    pub mfg_date: Option<NaiveDate>,
    pub rcv_date: Option<NaiveDate>,
    pub exp_date: Option<NaiveDate>,
    #[validate(
        length(min = 1, max = 100, message = "Location must be between 1 and 100 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub location: Option<String>,
    pub stock: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub supplier_id: Option<Option<Uuid>>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Uuid>::deserialize(deserializer).map(Some)
}
