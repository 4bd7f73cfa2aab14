mod common;

use common::*;
use stock_ledger_api::{
    dto::suppliers::{CreateSupplierRequest, UpdateSupplierRequest},
    error::AppError,
    routes::params::SupplierQuery,
    services::{product_service, supplier_service},
};

#[tokio::test]
async fn supplier_emails_are_unique() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = clerk(&state).await?;
    let acme = create_supplier(&state, &user, "orders@acme.example.com").await?;

    let duplicate = supplier_service::create_supplier(
        &state,
        &user,
        CreateSupplierRequest {
            name: "Acme Again".into(),
            email: "orders@acme.example.com".into(),
            contact: "-".into(),
            address: "-".into(),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::BadRequest(_))));

    let other = create_supplier(&state, &user, "sales@other.example.com").await?;
    let clash = supplier_service::update_supplier(
        &state,
        &user,
        other.id,
        UpdateSupplierRequest {
            email: Some(acme.email.clone()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(clash, Err(AppError::BadRequest(_))));

    // Re-saving its own email is fine.
    supplier_service::update_supplier(
        &state,
        &user,
        acme.id,
        UpdateSupplierRequest {
            email: Some(acme.email.clone()),
            contact: Some("+39 011 555 0199".into()),
            ..Default::default()
        },
    )
    .await?;

    let listed = supplier_service::list_suppliers(&state, SupplierQuery::default())
        .await?;
    assert_eq!(listed.meta.and_then(|m| m.total), Some(2));
    Ok(())
}

#[tokio::test]
async fn invalid_supplier_email_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = clerk(&state).await?;

    let result = supplier_service::create_supplier(
        &state,
        &user,
        CreateSupplierRequest {
            name: "Nameless".into(),
            email: "not-an-email".into(),
            contact: "-".into(),
            address: "-".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn deleting_supplier_detaches_its_products() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = clerk(&state).await?;
    let manager = admin(&state).await?;
    let supplier = create_supplier(&state, &user, "orders@acme.example.com").await?;

    let mut request = receipt("Widget", "A", 10.0, date(2025, 1, 1));
    request.supplier_id = Some(supplier.id);
    let product = product_service::receive_product(&state, &user, request)
        .await?
        .data
        .expect("product");
    assert_eq!(product.supplier_id, Some(supplier.id));

    let denied = supplier_service::delete_supplier(&state, &user, supplier.id).await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    supplier_service::delete_supplier(&state, &manager, supplier.id).await?;

    let product = product_service::get_product(&state, product.id)
        .await?
        .data
        .expect("product");
    assert_eq!(product.supplier_id, None);
    assert_eq!(product.stock, 10.0);

    let gone = supplier_service::get_supplier(&state, supplier.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn supplier_fields_respect_column_widths() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = clerk(&state).await?;

    let result = supplier_service::create_supplier(
        &state,
        &user,
        CreateSupplierRequest {
            name: "A".repeat(61),
            email: "long@acme.example.com".into(),
            contact: "-".into(),
            address: "-".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let acme = create_supplier(&state, &user, "orders@acme.example.com").await?;
    let result = supplier_service::update_supplier(
        &state,
        &user,
        acme.id,
        UpdateSupplierRequest {
            address: Some("A".repeat(101)),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let stored = supplier_service::get_supplier(&state, acme.id)
        .await?
        .data
        .expect("supplier");
    assert_eq!(stored.address, acme.address);
    Ok(())
}
