use serde::{Deserialize, Serialize};

/// Shopping cart record as persisted in the cart collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    pub products: Vec<CartLineItem>,
}

/// Individual line item inside a cart: a product reference and a quantity.
/// The product id is never validated against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: String,
    pub quantity: i64,
}

/// Request model for creating a cart. The id is caller-supplied; any line
/// items submitted alongside it are discarded, carts always start empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCartRequest {
    pub id: String,
}

/// Request model for adding a product to a cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartProductRequest {
    pub quantity: i64,
}

impl Cart {
    /// Create a new empty cart with the given id
    pub fn new(id: String) -> Self {
        Self {
            id,
            products: Vec::new(),
        }
    }

    /// Add a product to the cart, accumulating the quantity when a line item
    /// for the same product id already exists.
    pub fn add_product(&mut self, product_id: &str, quantity: i64) {
        if let Some(item) = self.products.iter_mut().find(|item| item.id == product_id) {
            item.quantity += quantity;
        } else {
            self.products.push(CartLineItem {
                id: product_id.to_string(),
                quantity,
            });
        }
    }

    /// Get the quantity of a specific product in the cart
    pub fn product_quantity(&self, product_id: &str) -> i64 {
        self.products
            .iter()
            .find(|item| item.id == product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new("cart-1".to_string());
        assert_eq!(cart.id, "cart-1");
        assert!(cart.products.is_empty());
    }

    #[test]
    fn test_add_product_appends_new_line_item() {
        let mut cart = Cart::new("cart-1".to_string());
        cart.add_product("1695000000000", 2);

        assert_eq!(cart.products.len(), 1);
        assert_eq!(cart.products[0].id, "1695000000000");
        assert_eq!(cart.products[0].quantity, 2);
    }

    #[test]
    fn test_add_product_accumulates_quantity() {
        let mut cart = Cart::new("cart-1".to_string());
        cart.add_product("1695000000000", 2);
        cart.add_product("1695000000000", 3);

        // One line item with the summed quantity, never two entries
        assert_eq!(cart.products.len(), 1);
        assert_eq!(cart.product_quantity("1695000000000"), 5);
    }

    #[test]
    fn test_add_different_products_keeps_separate_line_items() {
        let mut cart = Cart::new("cart-1".to_string());
        cart.add_product("1695000000000", 1);
        cart.add_product("1695000000001", 4);

        assert_eq!(cart.products.len(), 2);
        assert_eq!(cart.product_quantity("1695000000001"), 4);
    }

    #[test]
    fn test_create_cart_request_ignores_submitted_products() {
        let request: CreateCartRequest =
            serde_json::from_str(r#"{"id": "cart-1", "products": [{"id": "p", "quantity": 1}]}"#)
                .unwrap();
        assert_eq!(request.id, "cart-1");
    }
}
