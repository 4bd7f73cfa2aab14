mod common;

use common::*;
use stock_ledger_api::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::AppError,
    middleware::auth::decode_token,
    services::auth_service,
};

fn registration(email: &str, role: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.into(),
        username: email.split('@').next().unwrap_or(email).into(),
        name: "Jamie Doe".into(),
        role: role.into(),
        password: "s3cret-pass".into(),
    }
}

#[tokio::test]
async fn admin_registers_employee_who_can_log_in() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let ceo = create_employee(&state, "CEO").await?;

    let employee = auth_service::register_employee(
        &state,
        &ceo,
        registration("jamie@example.com", "Employee"),
    )
    .await?
    .data
    .expect("employee");
    assert_eq!(employee.role, "Employee");

    let login = auth_service::login(
        &state,
        LoginRequest {
            email: "jamie@example.com".into(),
            password: "s3cret-pass".into(),
        },
    )
    .await?
    .data
    .expect("token");

    let token = login.token.strip_prefix("Bearer ").expect("bearer prefix");
    let user = decode_token(token, JWT_SECRET)?;
    assert_eq!(user.user_id, employee.id);
    assert!(!user.is_admin());

    assert!(matches!(
        decode_token(token, "another-secret"),
        Err(AppError::Unauthorized(_))
    ));
    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let manager = admin(&state).await?;
    auth_service::register_employee(&state, &manager, registration("kim@example.com", "Manager"))
        .await?;

    let wrong = auth_service::login(
        &state,
        LoginRequest {
            email: "kim@example.com".into(),
            password: "nope".into(),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

    let unknown = auth_service::login(
        &state,
        LoginRequest {
            email: "nobody@example.com".into(),
            password: "s3cret-pass".into(),
        },
    )
    .await;
    assert!(matches!(unknown, Err(AppError::Unauthorized(_))));
    Ok(())
}

#[tokio::test]
async fn only_admins_register_and_duplicates_are_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = clerk(&state).await?;
    let manager = admin(&state).await?;

    let denied =
        auth_service::register_employee(&state, &user, registration("lee@example.com", "Employee"))
            .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let lee = || registration("lee@example.com", "Employee");
    auth_service::register_employee(&state, &manager, lee()).await?;
    let duplicate = auth_service::register_employee(&state, &manager, lee()).await;
    assert!(matches!(duplicate, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn registration_fields_are_validated() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let manager = admin(&state).await?;

    let mut short_password = registration("sam@example.com", "Employee");
    short_password.password = "12345".into();
    let mut long_name = registration("sam@example.com", "Employee");
    long_name.name = "N".repeat(61);
    let bad_email = registration("sam.example.com", "Employee");

    for request in [short_password, long_name, bad_email] {
        let result = auth_service::register_employee(&state, &manager, request).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    auth_service::register_employee(&state, &manager, registration("sam@example.com", "Employee"))
        .await?;
    Ok(())
}
