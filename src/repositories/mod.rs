pub mod cart_repository;
pub mod json_collection;
pub mod product_repository;

pub use cart_repository::{CartRepository, JsonFileCartRepository};
pub use json_collection::JsonCollectionFile;
pub use product_repository::{JsonFileProductRepository, ProductRepository};
