use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    employees::Model as EmployeeModel, products::Model as ProductModel,
    shipments::Model as ShipmentModel, suppliers::Model as SupplierModel,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub mfg_date: NaiveDate,
    pub rcv_date: NaiveDate,
    pub exp_date: NaiveDate,
    pub location: String,
    pub stock: f64,
    pub supplier_id: Option<Uuid>,
}

/// Receiving department of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Department {
    Quality,
    Production,
    Other,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Quality => "Quality",
            Department::Production => "Production",
            Department::Other => "Other",
        }
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Quality" => Ok(Department::Quality),
            "Production" => Ok(Department::Production),
            "Other" => Ok(Department::Other),
            other => Err(format!("unknown department {other}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Shipment {
    pub id: Uuid,
    pub department: Department,
    pub name: String,
    pub quantity: f64,
    pub shipment_date: NaiveDate,
    pub product_id: Uuid,
}

impl From<EmployeeModel> for Employee {
    fn from(model: EmployeeModel) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            name: model.name,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<SupplierModel> for Supplier {
    fn from(model: SupplierModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            contact: model.contact,
            address: model.address,
        }
    }
}

impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            mfg_date: model.mfg_date,
            rcv_date: model.rcv_date,
            exp_date: model.exp_date,
            location: model.location,
            stock: model.stock,
            supplier_id: model.supplier_id,
        }
    }
}

impl TryFrom<ShipmentModel> for Shipment {
    type Error = String;

    fn try_from(model: ShipmentModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            department: model.department.parse()?,
            name: model.name,
            quantity: model.quantity,
            shipment_date: model.shipment_date,
            product_id: model.product_id,
        })
    }
}
