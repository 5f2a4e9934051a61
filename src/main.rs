use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use tienda_rs::{
    handlers::{create_api_router, health_check},
    init_observability,
    repositories::{JsonFileCartRepository, JsonFileProductRepository},
    services::{CartService, ProductService},
    Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_environment()?;

    init_observability(
        &config.observability.service_name,
        &config.observability.log_level,
        config.observability.enable_json_logging,
    )?;

    info!("Starting tienda-rs service");
    info!(
        "Collections: products={}, carts={}",
        config.storage.products_file, config.storage.carts_file
    );

    // Initialize repositories
    let product_repository = Arc::new(JsonFileProductRepository::new(
        &config.storage.products_file,
    ));
    let cart_repository = Arc::new(JsonFileCartRepository::new(&config.storage.carts_file));
    info!("Repositories initialized successfully");

    // Initialize services
    let product_service = Arc::new(ProductService::new(product_repository));
    let cart_service = Arc::new(CartService::new(cart_repository));
    info!("Services initialized successfully");

    // Build the application router
    let app = create_app(product_service, cart_service);

    // Create socket address
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let listener = TcpListener::bind(addr).await?;
    info!("Server en funcionamiento en el puerto {}", config.server.port);

    // Set up graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received");
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn create_app(product_service: Arc<ProductService>, cart_service: Arc<CartService>) -> Router {
    Router::new()
        .route("/health/status", get(health_check))
        .merge(create_api_router(product_service, cart_service))
        // Add middleware layers (order matters - outer to inner)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
