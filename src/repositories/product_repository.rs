use std::path::PathBuf;

use async_trait::async_trait;
use tracing::instrument;

use crate::models::{Product, RepositoryResult};
use crate::repositories::JsonCollectionFile;

/// Trait defining the interface for product catalog data access
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Return every product in the catalog.
    async fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    /// Find a product by its id.
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;

    /// Append a new product to the catalog.
    async fn create(&self, product: Product) -> RepositoryResult<Product>;

    /// Overwrite the stored product matching `product.id`. Returns `None`
    /// when no stored product carries that id; the file is left untouched in
    /// that case.
    async fn update(&self, product: Product) -> RepositoryResult<Option<Product>>;

    /// Remove the product with the given id. Returns `false` when nothing
    /// matched; the file is left untouched in that case.
    async fn delete(&self, id: &str) -> RepositoryResult<bool>;

    /// Check whether a product with the given id exists.
    async fn exists(&self, id: &str) -> RepositoryResult<bool>;
}

/// JSON-file implementation of the ProductRepository trait.
///
/// Each operation loads the entire collection, mutates it in memory, and
/// rewrites the whole file; mutations run under the collection lock.
pub struct JsonFileProductRepository {
    collection: JsonCollectionFile<Product>,
}

impl JsonFileProductRepository {
    /// Create a product repository backed by the JSON file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            collection: JsonCollectionFile::new(path),
        }
    }
}

#[async_trait]
impl ProductRepository for JsonFileProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        self.collection.load().await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        let products = self.collection.load().await?;
        Ok(products.into_iter().find(|product| product.id == id))
    }

    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        let _guard = self.collection.lock().await;
        let mut products = self.collection.load().await?;
        products.push(product.clone());
        self.collection.save(&products).await?;
        Ok(product)
    }

    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn update(&self, product: Product) -> RepositoryResult<Option<Product>> {
        let _guard = self.collection.lock().await;
        let mut products = self.collection.load().await?;
        match products.iter_mut().find(|stored| stored.id == product.id) {
            Some(stored) => *stored = product.clone(),
            None => return Ok(None),
        }
        self.collection.save(&products).await?;
        Ok(Some(product))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let _guard = self.collection.lock().await;
        let mut products = self.collection.load().await?;
        let original_len = products.len();
        products.retain(|product| product.id != id);
        if products.len() == original_len {
            return Ok(false);
        }
        self.collection.save(&products).await?;
        Ok(true)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn exists(&self, id: &str) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
