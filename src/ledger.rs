//! Stock rules shared by the product, shipment and report services.
//!
//! Everything here is pure: the services load rows inside a database
//! transaction, ask these functions what the new stock levels are, and only
//! write when the answer is `Ok`.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    dto::inventory::{InventoryRow, ReportRow},
    entity::products::Model as ProductModel,
    error::{AppError, AppResult},
};

pub const INVALID_STOCK: &str = "Invalid stock entry, please enter a positive number!";
pub const INVALID_SHIPMENT: &str = "Specified quantity is not correct or not available";
pub const UNAVAILABLE_QUANTITY: &str = "Specified quantity is not available";
pub const NEGATIVE_STOCK: &str = "Stock cannot be negative";

pub fn is_admin_role(role: &str) -> bool {
    matches!(role, "CEO" | "Manager")
}

/// Initial stock of a received product must be strictly positive.
pub fn check_receipt(initial_stock: f64) -> AppResult<()> {
    if initial_stock.is_finite() && initial_stock > 0.0 {
        Ok(())
    } else {
        Err(AppError::BadRequest(INVALID_STOCK.into()))
    }
}

/// Direct edits may set any non-negative stock.
pub fn check_stock_edit(stock: f64) -> AppResult<()> {
    if stock.is_finite() && stock >= 0.0 {
        Ok(())
    } else {
        Err(AppError::BadRequest(NEGATIVE_STOCK.into()))
    }
}

/// Returns the stock left after shipping `quantity` out of `stock`.
pub fn ship(stock: f64, quantity: f64) -> AppResult<f64> {
    if !(quantity.is_finite() && quantity > 0.0) {
        return Err(AppError::BadRequest(INVALID_SHIPMENT.into()));
    }
    let remaining = stock - quantity;
    if remaining < 0.0 {
        return Err(AppError::BadRequest(INVALID_SHIPMENT.into()));
    }
    Ok(remaining)
}

/// Stock levels after an existing shipment is edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rebooking {
    /// The shipment stays on the same product.
    SameProduct { stock: f64 },
    /// The shipment moved: `source` gets its quantity back, `target` pays
    /// the new quantity.
    Moved { source_stock: f64, target_stock: f64 },
}

/// Restores `old_quantity` to the source product, then takes
/// `new_quantity` from the target. `target_stock` is `None` when the
/// shipment keeps its product.
pub fn rebook(
    source_stock: f64,
    old_quantity: f64,
    target_stock: Option<f64>,
    new_quantity: f64,
) -> AppResult<Rebooking> {
    if !(new_quantity.is_finite() && new_quantity > 0.0) {
        return Err(AppError::BadRequest(INVALID_SHIPMENT.into()));
    }

    let restored = source_stock + old_quantity;
    let rebooking = match target_stock {
        None => Rebooking::SameProduct {
            stock: restored - new_quantity,
        },
        Some(target) => Rebooking::Moved {
            source_stock: restored,
            target_stock: target - new_quantity,
        },
    };

    let remaining = match rebooking {
        Rebooking::SameProduct { stock } => stock,
        Rebooking::Moved { target_stock, .. } => target_stock,
    };
    if remaining < 0.0 {
        return Err(AppError::BadRequest(UNAVAILABLE_QUANTITY.into()));
    }
    Ok(rebooking)
}

/// Groups products by (name, location), summing stock and keeping the
/// earliest expiry. Rows come out ordered by name, then location.
pub fn aggregate_inventory<'a>(
    products: impl IntoIterator<Item = &'a ProductModel>,
) -> Vec<InventoryRow> {
    let mut groups: BTreeMap<(String, String), (f64, NaiveDate)> = BTreeMap::new();
    for product in products {
        groups
            .entry((product.name.clone(), product.location.clone()))
            .and_modify(|(stock, expiry)| {
                *stock += product.stock;
                if product.exp_date < *expiry {
                    *expiry = product.exp_date;
                }
            })
            .or_insert((product.stock, product.exp_date));
    }

    groups
        .into_iter()
        .map(|((product, location), (quantity, expiry))| InventoryRow {
            product,
            location,
            quantity,
            expiry,
        })
        .collect()
}

/// Groups ledger entries by (date, product name). Receipts add to `in`,
/// shipments add their signed quantity to `out`.
pub fn aggregate_report(
    entries: impl IntoIterator<Item = (NaiveDate, String, f64)>,
) -> Vec<ReportRow> {
    let mut groups: BTreeMap<(NaiveDate, String), (f64, f64)> = BTreeMap::new();
    for (date, product, quantity) in entries {
        let (received, shipped) = groups.entry((date, product)).or_insert((0.0, 0.0));
        if quantity > 0.0 {
            *received += quantity;
        } else if quantity < 0.0 {
            *shipped += quantity;
        }
    }

    groups
        .into_iter()
        .map(|((date, product), (received, shipped))| ReportRow {
            date,
            product,
            received,
            shipped,
        })
        .collect()
}
