use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Debug, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        email(message = "Invalid email address"),
        length(max = 60, message = "Email cannot exceed 60 characters")
    )]
    pub email: String,
    #[validate(
        length(min = 1, max = 60, message = "Username must be between 1 and 60 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub username: String,
    #[validate(
        length(min = 1, max = 60, message = "Name must be between 1 and 60 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, max = 60, message = "Role must be between 1 and 60 characters"),
        custom(function = "crate::dto::not_blank")
    )]
    pub role: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
