use std::path::PathBuf;

use async_trait::async_trait;
use tracing::instrument;

use crate::models::{Cart, RepositoryResult};
use crate::repositories::JsonCollectionFile;

/// Trait defining the interface for cart data access
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Find a cart by its id.
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Cart>>;

    /// Append a new cart to the collection.
    async fn create(&self, cart: Cart) -> RepositoryResult<Cart>;

    /// Overwrite the stored cart matching `cart.id`. Returns `None` when no
    /// stored cart carries that id; the file is left untouched in that case.
    async fn update(&self, cart: Cart) -> RepositoryResult<Option<Cart>>;

    /// Check whether a cart with the given id exists.
    async fn exists(&self, id: &str) -> RepositoryResult<bool>;
}

/// JSON-file implementation of the CartRepository trait
pub struct JsonFileCartRepository {
    collection: JsonCollectionFile<Cart>,
}

impl JsonFileCartRepository {
    /// Create a cart repository backed by the JSON file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            collection: JsonCollectionFile::new(path),
        }
    }
}

#[async_trait]
impl CartRepository for JsonFileCartRepository {
    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Cart>> {
        let carts = self.collection.load().await?;
        Ok(carts.into_iter().find(|cart| cart.id == id))
    }

    #[instrument(skip(self, cart), fields(id = %cart.id))]
    async fn create(&self, cart: Cart) -> RepositoryResult<Cart> {
        let _guard = self.collection.lock().await;
        let mut carts = self.collection.load().await?;
        carts.push(cart.clone());
        self.collection.save(&carts).await?;
        Ok(cart)
    }

    #[instrument(skip(self, cart), fields(id = %cart.id))]
    async fn update(&self, cart: Cart) -> RepositoryResult<Option<Cart>> {
        let _guard = self.collection.lock().await;
        let mut carts = self.collection.load().await?;
        match carts.iter_mut().find(|stored| stored.id == cart.id) {
            Some(stored) => *stored = cart.clone(),
            None => return Ok(None),
        }
        self.collection.save(&carts).await?;
        Ok(Some(cart))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn exists(&self, id: &str) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
