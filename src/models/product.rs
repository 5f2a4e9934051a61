use serde::{Deserialize, Serialize};

/// Core product record as persisted in the catalog collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub status: bool,
    pub stock: i64,
    pub category: String,
}

/// Request model for creating a new product.
///
/// The string fields default to empty when absent so that a missing field
/// fails the required-fields check rather than body deserialization; the
/// typed fields stay `Option` so their presence can be checked explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub category: String,
    pub price: Option<f64>,
    pub status: Option<bool>,
    pub stock: Option<i64>,
}

/// Request model for partially updating an existing product.
///
/// There is deliberately no `id` field: the record id comes from the request
/// path and anything in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub status: Option<bool>,
    pub stock: Option<i64>,
}

/// Response envelope for product mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMutationResponse {
    pub message: String,
    pub product: Product,
}

/// Response envelope carrying only a confirmation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl Product {
    /// Build a catalog record from a validated creation request.
    ///
    /// Validation guarantees the typed fields are present. New products
    /// always start enabled: the submitted `status` flag is only
    /// type-checked, a falsy value does not survive creation.
    pub fn new(id: String, request: CreateProductRequest) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description,
            code: request.code,
            price: request.price.unwrap_or_default(),
            status: true,
            stock: request.stock.unwrap_or_default(),
            category: request.category,
        }
    }

    /// Apply a partial update, field by field. Unspecified fields keep their
    /// prior values; the record id never changes.
    pub fn update(&mut self, request: UpdateProductRequest) {
        if let Some(title) = request.title {
            self.title = title;
        }
        if let Some(description) = request.description {
            self.description = description;
        }
        if let Some(code) = request.code {
            self.code = code;
        }
        if let Some(category) = request.category {
            self.category = category;
        }
        if let Some(price) = request.price {
            self.price = price;
        }
        if let Some(status) = request.status {
            self.status = status;
        }
        if let Some(stock) = request.stock {
            self.stock = stock;
        }
    }
}
