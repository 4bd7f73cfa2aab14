pub mod audit_logs;
pub mod employees;
pub mod products;
pub mod shipments;
pub mod suppliers;
pub mod transactions;

pub use audit_logs::Entity as AuditLogs;
pub use employees::Entity as Employees;
pub use products::Entity as Products;
pub use shipments::Entity as Shipments;
pub use suppliers::Entity as Suppliers;
pub use transactions::Entity as Transactions;
