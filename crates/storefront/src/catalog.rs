//! Static product catalog.
//!
//! The catalog is embedded at compile time from `content/catalog.json` and
//! parsed once at startup. It holds the products offered by the store and
//! the hero slides shown on the home page; both are read-only afterwards.

use std::collections::HashSet;

use serde::Deserialize;
use sole_store_core::{Product, ProductError, ProductId};

const CATALOG_JSON: &str = include_str!("../content/catalog.json");

/// Errors loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("invalid product: {0}")]
    InvalidProduct(#[from] ProductError),
    #[error("catalog has no hero slides")]
    NoSlides,
}

/// One hero slider panel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeroSlide {
    pub title: String,
    pub tagline: String,
    pub image: String,
}

/// Products and slides offered by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    slides: Vec<HeroSlide>,
    products: Vec<Product>,
}

impl Catalog {
    /// Parse the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded document is invalid (see
    /// [`Catalog::from_json`]).
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(CATALOG_JSON)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a product id repeats, a
    /// product fails validation, or there are no slides.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for product in &catalog.products {
            product.validate()?;
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        if catalog.slides.is_empty() {
            return Err(CatalogError::NoSlides);
        }

        Ok(catalog)
    }

    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products whose name contains `term`, ignoring case.
    ///
    /// A blank term matches every product.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let term = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|product| term.is_empty() || product.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Hero slides in display order. Never empty.
    #[must_use]
    pub fn slides(&self) -> &[HeroSlide] {
        &self.slides
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.slides().len(), 3);

        let product = catalog.find(ProductId::new(1)).unwrap();
        assert_eq!(product.name, "Nike Air Force 1");
        assert_eq!(product.price.display(), "$110.00");
        assert_eq!(product.default_color(), "White");
    }

    #[test]
    fn test_find_unknown() {
        let catalog = Catalog::load().unwrap();
        assert!(catalog.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::load().unwrap();

        let names: Vec<&str> = catalog
            .search("AIR")
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Nike Air Force 1", "Nike Air Jordan"]);

        assert_eq!(catalog.search("  ").len(), 5);
        assert!(catalog.search("sandals").is_empty());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let product = r#"{"id": 1, "name": "A", "price": {"amount": "1"}, "image": "",
            "category": "", "description": "", "colors": ["Red"], "sizes": ["9"]}"#;
        let json = format!(
            r#"{{"slides": [{{"title": "t", "tagline": "", "image": ""}}],
                "products": [{product}, {product}]}}"#
        );

        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::DuplicateId(id)) if id == ProductId::new(1)
        ));
    }

    #[test]
    fn test_rejects_product_without_sizes() {
        let json = r#"{"slides": [{"title": "t", "tagline": "", "image": ""}],
            "products": [{"id": 1, "name": "A", "price": {"amount": "1"}, "image": "",
            "category": "", "description": "", "colors": ["Red"], "sizes": []}]}"#;

        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::InvalidProduct(ProductError::NoSizes(_)))
        ));
    }

    #[test]
    fn test_rejects_missing_slides() {
        let json = r#"{"slides": [], "products": []}"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::NoSlides)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{"),
            Err(CatalogError::Parse(_))
        ));
    }
}
