use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use reqwest::Client;
use tempfile::TempDir;
use tokio::net::TcpListener;

use tienda_rs::handlers::{create_api_router, health_check};
use tienda_rs::repositories::{JsonFileCartRepository, JsonFileProductRepository};
use tienda_rs::services::{CartService, ProductService};

/// A running instance of the real application router, backed by seeded
/// temporary collection files and served on an ephemeral port.
pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
    pub products_path: PathBuf,
    pub carts_path: PathBuf,
    // Keeps the collection files alive for the duration of the test
    _data_dir: TempDir,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("temp dir");
        let products_path = data_dir.path().join("products.json");
        let carts_path = data_dir.path().join("carts.json");
        std::fs::write(&products_path, "[]").expect("seed products file");
        std::fs::write(&carts_path, "[]").expect("seed carts file");

        let product_service = Arc::new(ProductService::new(Arc::new(
            JsonFileProductRepository::new(&products_path),
        )));
        let cart_service = Arc::new(CartService::new(Arc::new(JsonFileCartRepository::new(
            &carts_path,
        ))));

        // Same composition as the binary's create_app, minus the middleware
        let app = Router::new()
            .route("/health/status", get(health_check))
            .merge(create_api_router(product_service, cart_service));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{}", addr),
            products_path,
            carts_path,
            _data_dir: data_dir,
        }
    }

    /// Raw bytes of the products collection file
    pub fn products_file_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.products_path).expect("read products file")
    }

    /// Raw bytes of the carts collection file
    pub fn carts_file_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.carts_path).expect("read carts file")
    }
}
