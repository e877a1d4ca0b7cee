//! Product catalog
//!
//! Minimal product registry backing redemption order lines. The redemption
//! engine looks up its discount product by name and creates it on first use.

use crate::types::ProductId;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A catalog product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub list_price: Decimal,
}

/// Registry of products keyed by ID
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: BTreeMap<ProductId, Product>,
    next_id: ProductId,
}

impl ProductCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        ProductCatalog {
            products: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Get a product by ID
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Find a product by exact name
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.values().find(|product| product.name == name)
    }

    /// Look up a product by name, creating it with a zero list price if it
    /// does not exist yet
    pub fn get_or_create(&mut self, name: &str) -> ProductId {
        if let Some(product) = self.find_by_name(name) {
            return product.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.products.insert(
            id,
            Product {
                id,
                name: name.to_string(),
                list_price: Decimal::ZERO,
            },
        );
        id
    }
}
