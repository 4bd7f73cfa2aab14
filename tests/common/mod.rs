#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, EntityTrait, PaginatorTrait,
    Schema, Set,
};
use stock_ledger_api::{
    dto::{
        products::ReceiveProductRequest, shipments::CreateShipmentRequest,
        suppliers::CreateSupplierRequest,
    },
    entity::{
        AuditLogs, Employees, Products, Shipments, Suppliers, Transactions,
        employees::ActiveModel as EmployeeActive,
    },
    middleware::auth::AuthUser,
    models::{Department, Product, Shipment, Supplier},
    services::{product_service, shipment_service, supplier_service},
    state::AppState,
};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

// Every test gets its own in-memory SQLite database. A single pooled
// connection keeps the database alive for the whole test.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;

    let backend = orm.get_database_backend();
    let schema = Schema::new(backend);
    orm.execute(backend.build(&schema.create_table_from_entity(Employees)))
        .await?;
    orm.execute(backend.build(&schema.create_table_from_entity(Suppliers)))
        .await?;
    orm.execute(backend.build(&schema.create_table_from_entity(Products)))
        .await?;
    orm.execute(backend.build(&schema.create_table_from_entity(Shipments)))
        .await?;
    orm.execute(backend.build(&schema.create_table_from_entity(Transactions)))
        .await?;
    orm.execute(backend.build(&schema.create_table_from_entity(AuditLogs)))
        .await?;

    Ok(AppState::new(orm, JWT_SECRET))
}

/// Makes every write to `table` fail with `reason` from now on, so an
/// operation can be broken after its earlier writes have gone through.
pub async fn reject_writes(state: &AppState, table: &str, reason: &str) -> anyhow::Result<()> {
    for event in ["INSERT", "UPDATE"] {
        state
            .orm
            .execute_unprepared(&format!(
                "CREATE TRIGGER reject_{table}_{event} BEFORE {event} ON {table} \
                 BEGIN SELECT RAISE(ABORT, '{reason}'); END"
            ))
            .await?;
    }
    Ok(())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn create_employee(state: &AppState, role: &str) -> anyhow::Result<AuthUser> {
    let id = Uuid::new_v4();
    let employee = EmployeeActive {
        id: Set(id),
        email: Set(format!("{id}@example.com")),
        username: Set(id.to_string()),
        name: Set(format!("{role} user")),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: employee.id,
        role: employee.role,
    })
}

pub async fn admin(state: &AppState) -> anyhow::Result<AuthUser> {
    create_employee(state, "Manager").await
}

pub async fn clerk(state: &AppState) -> anyhow::Result<AuthUser> {
    create_employee(state, "Employee").await
}

pub async fn create_supplier(
    state: &AppState,
    user: &AuthUser,
    email: &str,
) -> anyhow::Result<Supplier> {
    let resp = supplier_service::create_supplier(
        state,
        user,
        CreateSupplierRequest {
            name: "Acme".into(),
            email: email.into(),
            contact: "+39 011 555 0100".into(),
            address: "Via Roma 1".into(),
        },
    )
    .await?;
    Ok(resp.data.expect("supplier"))
}

pub fn receipt(
    name: &str,
    location: &str,
    stock: f64,
    exp_date: NaiveDate,
) -> ReceiveProductRequest {
    ReceiveProductRequest {
        name: name.into(),
        mfg_date: date(2024, 1, 10),
        rcv_date: date(2024, 2, 1),
        exp_date,
        location: location.into(),
        stock,
        supplier_id: None,
    }
}

pub async fn receive(
    state: &AppState,
    user: &AuthUser,
    name: &str,
    stock: f64,
) -> anyhow::Result<Product> {
    let resp = product_service::receive_product(
        state,
        user,
        receipt(name, "A", stock, date(2025, 12, 31)),
    )
    .await?;
    Ok(resp.data.expect("product"))
}

pub fn shipment(product_id: Uuid, quantity: f64) -> CreateShipmentRequest {
    CreateShipmentRequest {
        product_id,
        department: Department::Quality,
        name: "S1".into(),
        quantity,
        shipment_date: date(2024, 3, 15),
    }
}

pub async fn ship(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    quantity: f64,
) -> anyhow::Result<Shipment> {
    let resp = shipment_service::ship_out(state, user, shipment(product_id, quantity)).await?;
    Ok(resp.data.expect("shipment"))
}

pub async fn stock_of(state: &AppState, product_id: Uuid) -> anyhow::Result<f64> {
    let product = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .expect("product exists");
    Ok(product.stock)
}

pub async fn count_rows(state: &AppState) -> anyhow::Result<(u64, u64, u64)> {
    let products = Products::find().count(&state.orm).await?;
    let shipments = Shipments::find().count(&state.orm).await?;
    let transactions = Transactions::find().count(&state.orm).await?;
    Ok((products, shipments, transactions))
}
