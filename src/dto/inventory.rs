use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryRow {
    pub product: String,
    pub location: String,
    pub quantity: f64,
    pub expiry: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct InventoryList {
    #[schema(value_type = Vec<InventoryRow>)]
    pub items: Vec<InventoryRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub product: String,
    #[serde(rename = "in")]
    pub received: f64,
    #[serde(rename = "out")]
    pub shipped: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionReport {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// First day of the report, inclusive.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub from_date: Option<NaiveDate>,
    /// Last day of the report, inclusive.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub to_date: Option<NaiveDate>,
}

// Browser forms send `?from_date=&to_date=` for untouched date inputs.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
