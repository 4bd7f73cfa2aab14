pub mod auth;
pub mod inventory;
pub mod products;
pub mod shipments;
pub mod suppliers;

use validator::ValidationError;

/// Rejects strings made only of whitespace; `length` alone lets them through.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}
