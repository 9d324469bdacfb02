//! # Catalog Types
//!
//! Search query, product, variant and category records for the checkout API.
//! The server owns the schema; these shapes are lenient so that extra or
//! missing fields do not break decoding.

use crate::error::{CultError, CultResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default page size for product search
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Product search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Free-text query
    pub query: String,
    /// Category slug filter
    pub category: Option<String>,
    /// Lower price bound (USD, inclusive)
    pub price_min: Option<f64>,
    /// Upper price bound (USD, inclusive)
    pub price_max: Option<f64>,
    /// Only return products in stock
    pub in_stock: bool,
    /// Page size
    pub limit: u32,
    /// Page offset
    pub offset: Option<u32>,
}

impl SearchQuery {
    /// Create a query with default filters (in stock only, 20 results)
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: None,
            price_min: None,
            price_max: None,
            in_stock: true,
            limit: DEFAULT_SEARCH_LIMIT,
            offset: None,
        }
    }

    /// Builder: filter by category slug
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: set lower price bound
    pub fn with_price_min(mut self, price_min: f64) -> Self {
        self.price_min = Some(price_min);
        self
    }

    /// Builder: set upper price bound
    pub fn with_price_max(mut self, price_max: f64) -> Self {
        self.price_max = Some(price_max);
        self
    }

    /// Builder: include or exclude out-of-stock products
    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Builder: set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Builder: set page offset
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Reject bounds the server could never satisfy
    pub fn validate(&self) -> CultResult<()> {
        for (name, bound) in [("priceMin", self.price_min), ("priceMax", self.price_max)] {
            if let Some(value) = bound {
                if !value.is_finite() || value < 0.0 {
                    return Err(CultError::InvalidRequest(format!(
                        "{} must be a non-negative number, got {}",
                        name, value
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(CultError::InvalidRequest(format!(
                    "priceMin ({}) must not exceed priceMax ({})",
                    min, max
                )));
            }
        }

        Ok(())
    }

    /// Serialize into query-string pairs.
    ///
    /// `q`, `limit` and `inStock` are always present; the optional filters
    /// appear only when set.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.query.clone()),
            ("limit", self.limit.to_string()),
            ("inStock", if self.in_stock { "true" } else { "false" }.to_string()),
        ];

        if let Some(ref category) = self.category {
            params.push(("category", category.clone()));
        }
        if let Some(price_min) = self.price_min {
            params.push(("priceMin", price_min.to_string()));
        }
        if let Some(price_max) = self.price_max {
            params.push(("priceMax", price_max.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }

        params
    }
}

/// Product price; `usd` is always present, other currencies pass through
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductPrice {
    pub usd: f64,

    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

/// A purchasable variant of a product (size, colour, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Price override (USD); the product price applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default)]
    pub in_stock: bool,
}

impl Variant {
    /// USD price of this variant, falling back to the product price
    pub fn effective_price(&self, product: &Product) -> f64 {
        self.price.unwrap_or(product.price.usd)
    }
}

/// A product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    pub slug: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub price: ProductPrice,

    #[serde(default)]
    pub in_stock: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Variants; only populated on the detail endpoint
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// First variant, if the product has any
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// Find a variant by ID
    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

/// Result page of a product search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Total matches on the server (may exceed `products.len()`)
    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub products: Vec<Product>,
}

/// A category, optionally with nested subcategories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub slug: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,

    #[serde(default)]
    pub subcategories: Vec<Category>,
}

impl Category {
    /// Depth-first walk over this category and all of its descendants
    pub fn walk(&self) -> Vec<&Category> {
        let mut out = vec![self];
        for sub in &self.subcategories {
            out.extend(sub.walk());
        }
        out
    }
}

/// Envelope returned by `GET /categories`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_params_omit_optional_filters() {
        let params = SearchQuery::new("alpaca socks").to_params();

        assert_eq!(params.len(), 3);
        assert_eq!(param(&params, "q"), Some("alpaca socks"));
        assert_eq!(param(&params, "limit"), Some("20"));
        assert_eq!(param(&params, "inStock"), Some("true"));
        assert!(param(&params, "category").is_none());
        assert!(param(&params, "priceMin").is_none());
        assert!(param(&params, "priceMax").is_none());
        assert!(param(&params, "offset").is_none());
    }

    #[test]
    fn test_full_params() {
        let params = SearchQuery::new("tee")
            .with_category("mens-tees")
            .with_price_min(10.0)
            .with_price_max(49.5)
            .with_in_stock(false)
            .with_limit(5)
            .with_offset(10)
            .to_params();

        assert_eq!(param(&params, "inStock"), Some("false"));
        assert_eq!(param(&params, "category"), Some("mens-tees"));
        assert_eq!(param(&params, "priceMin"), Some("10"));
        assert_eq!(param(&params, "priceMax"), Some("49.5"));
        assert_eq!(param(&params, "limit"), Some("5"));
        assert_eq!(param(&params, "offset"), Some("10"));
    }

    #[test]
    fn test_zero_offset_is_still_sent() {
        let params = SearchQuery::new("tee").with_offset(0).to_params();
        assert_eq!(param(&params, "offset"), Some("0"));
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(SearchQuery::new("x").validate().is_ok());
        assert!(SearchQuery::new("x")
            .with_price_min(50.0)
            .with_price_max(50.0)
            .validate()
            .is_ok());

        let err = SearchQuery::new("x")
            .with_price_min(60.0)
            .with_price_max(50.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CultError::InvalidRequest(_)));

        assert!(SearchQuery::new("x").with_price_max(-1.0).validate().is_err());
        assert!(SearchQuery::new("x").with_price_min(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_product_detail_decoding() {
        let json = r#"{
            "id": "prod_1",
            "slug": "bitcoin-tee",
            "name": "Bitcoin Tee",
            "description": "Soft cotton",
            "price": { "usd": 29.99, "sol": 0.15 },
            "inStock": true,
            "variants": [
                { "id": "var_s", "name": "Small", "inStock": true },
                { "id": "var_xl", "name": "XL", "price": 34.99, "inStock": false }
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.slug, "bitcoin-tee");
        assert_eq!(product.price.usd, 29.99);
        assert!(product.price.other.contains_key("sol"));
        assert_eq!(product.variants.len(), 2);

        let small = product.default_variant().unwrap();
        assert_eq!(small.effective_price(&product), 29.99);

        let xl = product.variant("var_xl").unwrap();
        assert_eq!(xl.effective_price(&product), 34.99);
        assert!(!xl.in_stock);
    }

    #[test]
    fn test_search_results_decoding() {
        let json = r#"{
            "total": 42,
            "products": [
                { "id": "p1", "slug": "a", "name": "A", "price": { "usd": 10 }, "inStock": true }
            ]
        }"#;
        let results: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.total, 42);
        assert_eq!(results.products.len(), 1);
        assert!(results.products[0].variants.is_empty());
    }

    #[test]
    fn test_category_tree() {
        let json = r#"{
            "categories": [
                {
                    "slug": "apparel",
                    "name": "Apparel",
                    "productCount": 12,
                    "subcategories": [
                        { "slug": "mens-tees", "name": "Men's Tees", "productCount": 7 }
                    ]
                },
                { "slug": "coffee", "name": "Coffee" }
            ]
        }"#;
        let response: CategoriesResponse = serde_json::from_str(json).unwrap();
        let categories = response.categories;

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].product_count, Some(12));
        assert_eq!(categories[0].subcategories[0].slug, "mens-tees");
        assert!(categories[1].subcategories.is_empty());

        let names: Vec<&str> = categories[0].walk().into_iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Apparel", "Men's Tees"]);
    }
}
