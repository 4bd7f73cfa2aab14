use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use stock_ledger_api::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, create_pool, run_migrations},
    entity::{
        employees::{ActiveModel as EmployeeActive, Column as EmployeeCol, Entity as Employees},
        suppliers::{ActiveModel as SupplierActive, Column as SupplierCol, Entity as Suppliers},
    },
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 1).await?;
    run_migrations(&pool).await?;
    let orm = create_orm_conn(pool);

    let admin_id = ensure_employee(
        &orm,
        "admin@example.com",
        "admin_user",
        "Admin User",
        "CEO",
        "admin123",
    )
    .await?;
    let clerk_id = ensure_employee(
        &orm,
        "clerk@example.com",
        "clerk_user",
        "Warehouse Clerk",
        "Employee",
        "clerk123",
    )
    .await?;
    seed_suppliers(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}, Clerk ID: {clerk_id}");
    Ok(())
}

async fn ensure_employee(
    orm: &OrmConn,
    email: &str,
    username: &str,
    name: &str,
    role: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Employees::find()
        .filter(EmployeeCol::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("Employee {email} already exists");
        return Ok(existing.id);
    }

    let password_hash = hash_password(password)?;
    let employee = EmployeeActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        username: Set(username.to_string()),
        name: Set(name.to_string()),
        password_hash: Set(password_hash),
        role: Set(role.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Created employee {email} (role={role})");
    Ok(employee.id)
}

async fn seed_suppliers(orm: &OrmConn) -> anyhow::Result<()> {
    let suppliers = vec![
        (
            "Acme Components",
            "orders@acme.example.com",
            "+39 011 555 0100",
            "Via Roma 1, Torino",
        ),
        (
            "Nordic Packaging",
            "sales@nordicpack.example.com",
            "+46 8 555 0142",
            "Storgatan 12, Stockholm",
        ),
    ];

    for (name, email, contact, address) in suppliers {
        let exists = Suppliers::find()
            .filter(SupplierCol::Email.eq(email))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }
        SupplierActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            contact: Set(contact.to_string()),
            address: Set(address.to_string()),
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded suppliers");
    Ok(())
}
