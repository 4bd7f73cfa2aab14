use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        inventory::{InventoryList, InventoryRow, ReportRow, TransactionReport},
        products::{ProductList, ReceiveProductRequest, UpdateProductRequest},
        shipments::{CreateShipmentRequest, ShipmentList, UpdateShipmentRequest},
        suppliers::{CreateSupplierRequest, SupplierList, UpdateSupplierRequest},
    },
    models::{Department, Employee, Product, Shipment, Supplier},
    response::{ApiResponse, Meta},
    routes::{auth, health, inventory, params, products, shipments, suppliers},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        suppliers::list_suppliers,
        suppliers::get_supplier,
        suppliers::create_supplier,
        suppliers::update_supplier,
        suppliers::delete_supplier,
        products::list_products,
        products::get_product,
        products::receive_product,
        products::update_product,
        products::delete_product,
        shipments::list_shipments,
        shipments::get_shipment,
        shipments::ship_out,
        shipments::update_shipment,
        shipments::delete_shipment,
        inventory::list_inventory,
        inventory::report_transactions
    ),
    components(
        schemas(
            Employee,
            Supplier,
            Product,
            Department,
            Shipment,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            CreateSupplierRequest,
            UpdateSupplierRequest,
            SupplierList,
            ReceiveProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateShipmentRequest,
            UpdateShipmentRequest,
            ShipmentList,
            InventoryRow,
            InventoryList,
            ReportRow,
            TransactionReport,
            params::Pagination,
            params::SortOrder,
            params::ProductSortBy,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Shipment>,
            ApiResponse<ShipmentList>,
            ApiResponse<Supplier>,
            ApiResponse<SupplierList>,
            ApiResponse<InventoryList>,
            ApiResponse<TransactionReport>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Employee authentication"),
        (name = "Suppliers", description = "Supplier endpoints"),
        (name = "Products", description = "Product receipt and maintenance"),
        (name = "Shipments", description = "Outbound shipments"),
        (name = "Inventory", description = "Inventory and transaction reports"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
