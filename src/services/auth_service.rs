use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    entity::employees::{ActiveModel, Column, Entity as Employees},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Employee,
    response::{ApiResponse, Meta},
    state::AppState,
};

const TOKEN_TTL_HOURS: i64 = 24;

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Only admins (CEO, Manager) can create employee accounts.
pub async fn register_employee(
    state: &AppState,
    user: &AuthUser,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<Employee>> {
    ensure_admin(user)?;
    payload.validate()?;
    let RegisterRequest {
        email,
        username,
        name,
        role,
        password,
    } = payload;
    let taken = Employees::find()
        .filter(
            Condition::any()
                .add(Column::Email.eq(email.as_str()))
                .add(Column::Username.eq(username.as_str())),
        )
        .count(&state.orm)
        .await?;
    if taken > 0 {
        return Err(AppError::BadRequest(
            "Email or username is already taken".to_string(),
        ));
    }

    let employee = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        username: Set(username),
        name: Set(name),
        password_hash: Set(hash_password(&password)?),
        role: Set(role),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "employee_register",
        "employees",
        serde_json::json!({ "employee_id": employee.id, "role": employee.role }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully registered the employee.",
        Employee::from(employee),
        Some(Meta::empty()),
    ))
}

pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let employee = Employees::find()
        .filter(Column::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password.".into()))?;

    let parsed_hash = PasswordHash::new(&employee.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::debug!(employee_id = %employee.id, "password mismatch");
        return Err(AppError::Unauthorized("Invalid email or password.".into()));
    }

    let token = issue_token(&employee.id, &employee.role, &state.jwt_secret)?;

    audit::record(
        &state.orm,
        Some(employee.id),
        "employee_login",
        "employees",
        serde_json::json!({ "employee_id": employee.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
        },
        Some(Meta::empty()),
    ))
}

pub fn issue_token(employee_id: &Uuid, role: &str, secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: employee_id.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
