//! Storefront entry point.
//!
//! Runs a scripted shopping session against the in-memory stores: browse,
//! fill the cart, check out and track the placed order.

use std::process::ExitCode;

use catalog::{PriceRange, ProductQuery, SortOrder};
use checkout::{AddressForm, PaymentMethod};
use common::ProductId;
use storefront::{Config, LogFormat, Storefront, StorefrontError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}

async fn shop(storefront: &Storefront) -> storefront::Result<()> {
    // 1. Browse
    let query = ProductQuery::new()
        .price_range(PriceRange::From50To100)
        .sort(SortOrder::PriceLowToHigh);
    for product in storefront.catalog().query(&query) {
        tracing::info!(
            id = %product.id,
            name = %product.name,
            price = %product.price,
            in_stock = product.in_stock,
            "product listed"
        );
    }

    // 2. Fill the cart
    storefront.add_to_cart(&ProductId::new("1"), 2)?;
    storefront.add_to_cart(&ProductId::new("2"), 1)?;
    storefront.toggle_favorite(&ProductId::new("6"))?;
    if let Err(e) = storefront.add_to_cart(&ProductId::new("5"), 1) {
        tracing::warn!(error = %e, "could not add product");
    }
    tracing::info!(
        total = %storefront.cart().total(),
        item_count = storefront.cart().item_count(),
        favorites = storefront.favorites().item_count(),
        "cart ready"
    );

    // 3. Check out
    let session = storefront.open_checkout()?;
    session
        .submit_address(&AddressForm {
            full_name: "John Doe".to_string(),
            phone: "9840012345".to_string(),
            email: "john@example.com".to_string(),
            address_line1: "123 Main St".to_string(),
            city: "Chennai".to_string(),
            state: "Tamil Nadu".to_string(),
            pincode: "600001".to_string(),
            ..Default::default()
        })
        .await?;
    session.select_payment(PaymentMethod::CashOnDelivery).await?;
    session.confirm_payment().await?;
    session.confirm_order().await?;
    let order = session.settle().await.ok_or(StorefrontError::NoOrderPlaced)?;
    session.close().await;
    let receipt = serde_json::to_string(&order)?;
    tracing::info!(order = %receipt, "order confirmation");

    // 4. Track it
    let tracked = storefront.tracker().track(order.order_id.as_str()).await?;
    tracing::info!(
        order_id = %tracked.order_id(),
        status = %tracked.status,
        estimated_delivery = %tracked.order.estimated_delivery.format("%A, %e %B %Y"),
        cart_empty = storefront.cart().is_empty(),
        "order tracked"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = match prometheus_builder.install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "failed to install Prometheus recorder");
            return ExitCode::FAILURE;
        }
    };

    // 3. Run the session
    let storefront = Storefront::new(config);
    let result = shop(&storefront).await;
    storefront.shutdown();

    tracing::info!(metrics = %metrics_handle.render(), "metrics snapshot");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "storefront session failed");
            ExitCode::FAILURE
        }
    }
}
