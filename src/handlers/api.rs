use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{
    AddCartProductRequest, CartLineItem, CreateCartRequest, CreateProductRequest, MessageResponse,
    Product, ProductMutationResponse, ServiceError, UpdateProductRequest, ValidationError,
};
use crate::services::{CartService, ProductService};

/// Shared application state containing all services
#[derive(Clone)]
pub struct ApiState {
    pub product_service: Arc<ProductService>,
    pub cart_service: Arc<CartService>,
}

/// Create API router with all endpoints
pub fn create_api_router(
    product_service: Arc<ProductService>,
    cart_service: Arc<CartService>,
) -> Router {
    let state = ApiState {
        product_service,
        cart_service,
    };

    Router::new()
        // Product catalog endpoints
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:pid",
            get(get_product).put(update_product).delete(delete_product),
        )
        // Cart endpoints
        .route("/api/carts", post(create_cart))
        .route("/api/carts/:cid", get(get_cart_products))
        .route("/api/carts/:cid/product/:pid", post(add_cart_product))
        .with_state(state)
}

// =============================================================================
// PRODUCT ENDPOINTS
// =============================================================================

/// List all products
#[instrument(name = "list_products", skip(state))]
pub async fn list_products(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Product>>, (StatusCode, Json<Value>)> {
    info!("Listing products");

    match state.product_service.list_products().await {
        Ok(products) => {
            info!("Successfully listed {} products", products.len());
            Ok(Json(products))
        }
        Err(err) => {
            error!("Failed to list products: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Get a specific product by id
#[instrument(name = "get_product", skip(state), fields(pid = %pid))]
pub async fn get_product(
    State(state): State<ApiState>,
    Path(pid): Path<String>,
) -> Result<Json<Product>, (StatusCode, Json<Value>)> {
    info!("Getting product with id: {}", pid);

    match state.product_service.get_product(&pid).await {
        Ok(product) => {
            info!("Successfully retrieved product: {}", product.title);
            Ok(Json(product))
        }
        Err(err) => {
            error!("Failed to get product {}: {}", pid, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Create a new product
#[instrument(name = "create_product", skip(state, payload))]
pub async fn create_product(
    State(state): State<ApiState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductMutationResponse>), (StatusCode, Json<Value>)> {
    // A body that fails typed deserialization gets the same answer the
    // type checks give: the price/status/stock message.
    let Json(request) = payload.map_err(|rejection| {
        error!("Rejected product payload: {}", rejection);
        service_error_to_response(ValidationError::InvalidFieldTypes.into())
    })?;

    info!("Creating product: {}", request.title);

    match state.product_service.create_product(request).await {
        Ok(product) => {
            info!("Successfully created product with id: {}", product.id);
            Ok((
                StatusCode::CREATED,
                Json(ProductMutationResponse {
                    message: "Producto agregado correctamente.".to_string(),
                    product,
                }),
            ))
        }
        Err(err) => {
            error!("Failed to create product: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Partially update a product by id
#[instrument(name = "update_product", skip(state, payload), fields(pid = %pid))]
pub async fn update_product(
    State(state): State<ApiState>,
    Path(pid): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductMutationResponse>, (StatusCode, Json<Value>)> {
    let Json(request) = payload.map_err(|rejection| {
        error!("Rejected product payload: {}", rejection);
        service_error_to_response(ValidationError::MalformedBody.into())
    })?;

    info!("Updating product with id: {}", pid);

    match state.product_service.update_product(&pid, request).await {
        Ok(product) => {
            info!("Successfully updated product");
            Ok(Json(ProductMutationResponse {
                message: "Producto actualizado correctamente.".to_string(),
                product,
            }))
        }
        Err(err) => {
            error!("Failed to update product {}: {}", pid, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Delete a product by id
#[instrument(name = "delete_product", skip(state), fields(pid = %pid))]
pub async fn delete_product(
    State(state): State<ApiState>,
    Path(pid): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<Value>)> {
    info!("Deleting product with id: {}", pid);

    match state.product_service.delete_product(&pid).await {
        Ok(()) => {
            info!("Successfully deleted product");
            Ok(Json(MessageResponse {
                message: "Producto eliminado correctamente.".to_string(),
            }))
        }
        Err(err) => {
            error!("Failed to delete product {}: {}", pid, err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// CART ENDPOINTS
// =============================================================================

/// Create a new, empty cart
#[instrument(name = "create_cart", skip(state, payload))]
pub async fn create_cart(
    State(state): State<ApiState>,
    payload: Result<Json<CreateCartRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, Json<Value>)> {
    let Json(request) = payload.map_err(|rejection| {
        error!("Rejected cart payload: {}", rejection);
        service_error_to_response(ValidationError::MalformedBody.into())
    })?;

    info!("Creating cart with id: {}", request.id);

    match state.cart_service.create_cart(request).await {
        Ok(cart) => {
            info!("Successfully created cart with id: {}", cart.id);
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: "Nuevo carrito creado con éxito.".to_string(),
                }),
            ))
        }
        Err(err) => {
            error!("Failed to create cart: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Get the line items of a cart by id
#[instrument(name = "get_cart_products", skip(state), fields(cid = %cid))]
pub async fn get_cart_products(
    State(state): State<ApiState>,
    Path(cid): Path<String>,
) -> Result<Json<Vec<CartLineItem>>, (StatusCode, Json<Value>)> {
    info!("Getting products of cart: {}", cid);

    match state.cart_service.get_cart_products(&cid).await {
        Ok(products) => {
            info!("Cart has {} line items", products.len());
            Ok(Json(products))
        }
        Err(err) => {
            error!("Failed to get cart {}: {}", cid, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Add a product to a cart, accumulating quantities for repeated additions
#[instrument(name = "add_cart_product", skip(state, payload), fields(cid = %cid, pid = %pid))]
pub async fn add_cart_product(
    State(state): State<ApiState>,
    Path((cid, pid)): Path<(String, String)>,
    payload: Result<Json<AddCartProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, Json<Value>)> {
    let Json(request) = payload.map_err(|rejection| {
        error!("Rejected cart payload: {}", rejection);
        service_error_to_response(ValidationError::MalformedBody.into())
    })?;

    info!(
        "Adding product {} to cart {} with quantity {}",
        pid, cid, request.quantity
    );

    match state
        .cart_service
        .add_product(&cid, &pid, request.quantity)
        .await
    {
        Ok(_) => {
            info!("Successfully added product to cart");
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: "Producto agregado al carrito con éxito.".to_string(),
                }),
            ))
        }
        Err(err) => {
            error!("Failed to add product to cart: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Convert ServiceError to HTTP response
fn service_error_to_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    let (status, message) = match &err {
        ServiceError::ProductNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::CartNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::DuplicateCart { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Repository { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error interno del servidor.".to_string(),
        ),
    };

    (status, Json(json!({ "error": message })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepositoryError;
    use crate::repositories::{JsonFileCartRepository, JsonFileProductRepository};
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_router(dir: &TempDir) -> Router {
        let products_path = dir.path().join("products.json");
        let carts_path = dir.path().join("carts.json");
        std::fs::write(&products_path, "[]").expect("seed products file");
        std::fs::write(&carts_path, "[]").expect("seed carts file");

        let product_service = Arc::new(ProductService::new(Arc::new(
            JsonFileProductRepository::new(products_path),
        )));
        let cart_service = Arc::new(CartService::new(Arc::new(JsonFileCartRepository::new(
            carts_path,
        ))));
        create_api_router(product_service, cart_service)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("parse body")
    }

    #[tokio::test]
    async fn test_list_products_empty_collection() {
        let dir = tempfile::tempdir().expect("temp dir");
        let router = test_router(&dir);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_get_unknown_product_returns_spanish_404() {
        let dir = tempfile::tempdir().expect("temp dir");
        let router = test_router(&dir);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/products/123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Producto no encontrado." })
        );
    }

    #[tokio::test]
    async fn test_mistyped_create_payload_returns_type_message() {
        let dir = tempfile::tempdir().expect("temp dir");
        let router = test_router(&dir);

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/products")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title": "Widget", "price": "not-a-number"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "El precio debe ser un número, el estado debe ser un booleano y el stock debe ser un número."
        );
    }

    #[tokio::test]
    async fn test_storage_failure_maps_to_fixed_500_body() {
        let dir = tempfile::tempdir().expect("temp dir");
        // No collection files seeded: every load fails with an I/O error
        let product_service = Arc::new(ProductService::new(Arc::new(
            JsonFileProductRepository::new(dir.path().join("absent.json")),
        )));
        let cart_service = Arc::new(CartService::new(Arc::new(JsonFileCartRepository::new(
            dir.path().join("absent-carts.json"),
        ))));
        let router = create_api_router(product_service, cart_service);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Error interno del servidor." })
        );
    }

    #[test]
    fn test_service_error_to_response_masks_repository_detail() {
        let err = ServiceError::Repository {
            source: RepositoryError::Io {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            },
        };

        let (status, Json(body)) = service_error_to_response(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error interno del servidor." }));
    }
}
