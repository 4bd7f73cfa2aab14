use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Supplier;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplierRequest {
    #[validate(
        length(min = 1, max = 60, message = "Name must be between 1 and 60 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub name: String,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 60, message = "Email cannot exceed 60 characters")
    )]
    pub email: String,
    #[validate(
        length(min = 1, max = 50, message = "Contact must be between 1 and 50 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub contact: String,
    #[validate(
        length(min = 1, max = 100, message = "Address must be between 1 and 100 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub address: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSupplierRequest {
    #[validate(
        length(min = 1, max = 60, message = "Name must be between 1 and 60 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub name: Option<String>,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 60, message = "Email cannot exceed 60 characters")
    )]
    pub email: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "Contact must be between 1 and 50 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub contact: Option<String>,
    #[validate(
        length(min = 1, max = 100, message = "Address must be between 1 and 100 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SupplierList {
    #[schema(value_type = Vec<Supplier>)]
    pub items: Vec<Supplier>,
}
