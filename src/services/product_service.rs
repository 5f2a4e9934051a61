use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::models::{
    CreateProductRequest, Product, ServiceError, ServiceResult, UpdateProductRequest, Validate,
};
use crate::repositories::ProductRepository;

/// Service for managing the product catalog
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    /// Create a new ProductService
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// List all products in the catalog
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        let products = self.repository.find_all().await?;
        info!("Found {} products", products.len());
        Ok(products)
    }

    /// Get a specific product by id
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &str) -> ServiceResult<Product> {
        match self.repository.find_by_id(id).await? {
            Some(product) => Ok(product),
            None => Err(ServiceError::ProductNotFound { id: id.to_string() }),
        }
    }

    /// Create a new product with a generated id
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_product(&self, request: CreateProductRequest) -> ServiceResult<Product> {
        request.validate()?;

        let id = self.next_product_id().await?;
        let created = self.repository.create(Product::new(id, request)).await?;

        info!("Product created successfully with id: {}", created.id);
        Ok(created)
    }

    /// Update an existing product. The path id always wins over anything in
    /// the payload.
    #[instrument(skip(self, request), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &str,
        request: UpdateProductRequest,
    ) -> ServiceResult<Product> {
        request.validate()?;

        let mut product = match self.repository.find_by_id(id).await? {
            Some(product) => product,
            None => return Err(ServiceError::ProductNotFound { id: id.to_string() }),
        };
        product.update(request);

        match self.repository.update(product).await? {
            Some(updated) => {
                info!("Product updated successfully");
                Ok(updated)
            }
            None => Err(ServiceError::ProductNotFound { id: id.to_string() }),
        }
    }

    /// Delete a product by id
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &str) -> ServiceResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ServiceError::ProductNotFound { id: id.to_string() });
        }
        info!("Product deleted successfully");
        Ok(())
    }

    /// Generate a unique time-based product id.
    ///
    /// Ids are the creation time in milliseconds rendered as a string. When
    /// two creates land on the same tick the candidate is bumped until it no
    /// longer collides with a stored id.
    async fn next_product_id(&self) -> ServiceResult<String> {
        let mut candidate = Utc::now().timestamp_millis();
        while self.repository.exists(&candidate.to_string()).await? {
            candidate += 1;
        }
        Ok(candidate.to_string())
    }
}
