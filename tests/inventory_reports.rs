mod common;

use common::*;
use stock_ledger_api::{
    dto::{inventory::ReportQuery, products::UpdateProductRequest},
    error::AppError,
    services::{inventory_service, product_service},
};

#[tokio::test]
async fn inventory_groups_products_by_name_and_location() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = clerk(&state).await?;

    for (stock, expiry) in [(10.0, date(2025, 6, 30)), (15.0, date(2025, 3, 31))] {
        product_service::receive_product(&state, &user, receipt("Widget", "A", stock, expiry))
            .await?;
    }
    product_service::receive_product(&state, &user, receipt("Widget", "B", 7.0, date(2026, 1, 1)))
        .await?;

    let inventory = inventory_service::list_inventory(&state)
        .await?
        .data
        .expect("inventory");

    assert_eq!(inventory.items.len(), 2);
    let row = &inventory.items[0];
    assert_eq!(row.product, "Widget");
    assert_eq!(row.location, "A");
    assert_eq!(row.quantity, 25.0);
    assert_eq!(row.expiry, date(2025, 3, 31));
    assert_eq!(inventory.items[1].quantity, 7.0);
    Ok(())
}

#[tokio::test]
async fn inventory_reflects_shipments_and_direct_edits() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = clerk(&state).await?;
    let product = receive(&state, &user, "Widget", 100.0).await?;
    ship(&state, &user, product.id, 30.0).await?;

    let inventory = inventory_service::list_inventory(&state).await?.data.expect("inventory");
    assert_eq!(inventory.items[0].quantity, 70.0);

    product_service::update_product(
        &state,
        &user,
        product.id,
        UpdateProductRequest {
            stock: Some(12.0),
            ..Default::default()
        },
    )
    .await?;
    let inventory = inventory_service::list_inventory(&state).await?.data.expect("inventory");
    assert_eq!(inventory.items[0].quantity, 12.0);
    Ok(())
}

#[tokio::test]
async fn report_without_matching_transactions_is_empty() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let manager = admin(&state).await?;
    receive(&state, &manager, "Widget", 100.0).await?;

    let report = inventory_service::report_transactions(
        &state,
        &manager,
        ReportQuery {
            from_date: Some(date(2030, 1, 1)),
            to_date: Some(date(2030, 12, 31)),
        },
    )
    .await?
    .data
    .expect("report");
    assert!(report.rows.is_empty());

    let open_ended = inventory_service::report_transactions(
        &state,
        &manager,
        ReportQuery {
            from_date: Some(date(2020, 1, 1)),
            to_date: None,
        },
    )
    .await?
    .data
    .expect("report");
    assert!(open_ended.rows.is_empty());
    Ok(())
}

#[tokio::test]
async fn report_sums_in_and_out_per_date_and_product() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let manager = admin(&state).await?;
    let widget = receive(&state, &manager, "Widget", 100.0).await?;
    let bolt = receive(&state, &manager, "Bolt", 40.0).await?;
    ship(&state, &manager, widget.id, 30.0).await?;
    ship(&state, &manager, widget.id, 5.0).await?;
    ship(&state, &manager, bolt.id, 4.0).await?;

    // Everything is dated with the receive date; the range bounds are inclusive.
    let report = inventory_service::report_transactions(
        &state,
        &manager,
        ReportQuery {
            from_date: Some(widget.rcv_date),
            to_date: Some(widget.rcv_date),
        },
    )
    .await?
    .data
    .expect("report");

    assert_eq!(report.rows.len(), 2);
    let bolt_row = &report.rows[0];
    assert_eq!(bolt_row.product, "Bolt");
    assert_eq!((bolt_row.received, bolt_row.shipped), (40.0, -4.0));
    let widget_row = &report.rows[1];
    assert_eq!(widget_row.product, "Widget");
    assert_eq!(widget_row.date, widget.rcv_date);
    assert_eq!((widget_row.received, widget_row.shipped), (100.0, -35.0));
    Ok(())
}

#[tokio::test]
async fn report_requires_admin() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = clerk(&state).await?;

    let result =
        inventory_service::report_transactions(&state, &user, ReportQuery::default()).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
    Ok(())
}
