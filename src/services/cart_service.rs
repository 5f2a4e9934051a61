use std::sync::Arc;

use tracing::{info, instrument};

use crate::models::{Cart, CartLineItem, CreateCartRequest, ServiceError, ServiceResult};
use crate::repositories::CartRepository;

/// Service for managing shopping carts
pub struct CartService {
    repository: Arc<dyn CartRepository>,
}

impl CartService {
    /// Create a new CartService
    pub fn new(repository: Arc<dyn CartRepository>) -> Self {
        Self { repository }
    }

    /// Create a new, empty cart with a caller-supplied id.
    ///
    /// Any line items submitted at creation time are discarded; carts always
    /// start empty.
    #[instrument(skip(self, request), fields(id = %request.id))]
    pub async fn create_cart(&self, request: CreateCartRequest) -> ServiceResult<Cart> {
        if self.repository.exists(&request.id).await? {
            return Err(ServiceError::DuplicateCart { id: request.id });
        }

        let created = self.repository.create(Cart::new(request.id)).await?;
        info!("Cart created successfully with id: {}", created.id);
        Ok(created)
    }

    /// Get the line items of a cart
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart_products(&self, cart_id: &str) -> ServiceResult<Vec<CartLineItem>> {
        match self.repository.find_by_id(cart_id).await? {
            Some(cart) => Ok(cart.products),
            None => Err(ServiceError::CartNotFound {
                id: cart_id.to_string(),
            }),
        }
    }

    /// Add a product to a cart, accumulating the quantity when a line item
    /// for the product already exists. The product id is not checked against
    /// the catalog.
    #[instrument(skip(self), fields(cart_id = %cart_id, product_id = %product_id, quantity = %quantity))]
    pub async fn add_product(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> ServiceResult<Cart> {
        let mut cart = match self.repository.find_by_id(cart_id).await? {
            Some(cart) => cart,
            None => {
                return Err(ServiceError::CartNotFound {
                    id: cart_id.to_string(),
                })
            }
        };
        cart.add_product(product_id, quantity);

        match self.repository.update(cart).await? {
            Some(cart) => {
                info!("Product added to cart successfully");
                Ok(cart)
            }
            None => Err(ServiceError::CartNotFound {
                id: cart_id.to_string(),
            }),
        }
    }
}
