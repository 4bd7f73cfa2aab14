pub mod auth_service;
pub mod inventory_service;
pub mod product_service;
pub mod shipment_service;
pub mod supplier_service;
