//! Catalog products.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Size preselected when a product is added without an explicit choice.
pub const DEFAULT_SIZE: &str = "9";

/// Errors found when checking a product definition.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product declares no colors.
    #[error("product {0} has no colors")]
    NoColors(ProductId),
    /// The product declares no sizes.
    #[error("product {0} has no sizes")]
    NoSizes(ProductId),
    /// The product price is below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// A product offered by the store.
///
/// Products are static reference data: they are loaded once and copied by
/// value into the cart and wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image path relative to the static asset root.
    pub image: String,
    pub category: String,
    pub description: String,
    /// Available colors, in display order. Never empty.
    pub colors: Vec<String>,
    /// Available sizes, in display order. Never empty.
    pub sizes: Vec<String>,
}

impl Product {
    /// Check the invariants every catalog product must satisfy.
    ///
    /// # Errors
    ///
    /// Returns an error if the product has no colors, no sizes, or a negative
    /// price.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.colors.is_empty() {
            return Err(ProductError::NoColors(self.id));
        }
        if self.sizes.is_empty() {
            return Err(ProductError::NoSizes(self.id));
        }
        if self.price.is_negative() {
            return Err(ProductError::NegativePrice(self.id));
        }
        Ok(())
    }

    /// The color used when none is chosen: the first declared color.
    #[must_use]
    pub fn default_color(&self) -> &str {
        self.colors.first().map_or("", String::as_str)
    }

    /// The size used when none is chosen.
    ///
    /// [`DEFAULT_SIZE`] when the product offers it, otherwise its first size.
    #[must_use]
    pub fn default_size(&self) -> &str {
        if self.offers_size(DEFAULT_SIZE) {
            DEFAULT_SIZE
        } else {
            self.sizes.first().map_or("", String::as_str)
        }
    }

    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_decimal::Decimal;

    use super::*;

    fn sizes() -> Vec<String> {
        ["7", "8", "9", "10", "11", "12"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn air_force() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Nike Air Force 1".to_string(),
            price: Price::usd(Decimal::from(110)),
            image: "./img/air.png".to_string(),
            category: "Air Force".to_string(),
            description: "The iconic Air Force 1.".to_string(),
            colors: vec!["White".to_string(), "Black".to_string()],
            sizes: sizes(),
        }
    }

    pub fn jordan() -> Product {
        Product {
            id: ProductId::new(2),
            name: "Nike Air Jordan".to_string(),
            price: Price::usd(Decimal::from(170)),
            image: "./img/jordan.png".to_string(),
            category: "Air Jordan".to_string(),
            description: "From the court to the streets.".to_string(),
            colors: vec!["Red".to_string(), "Black".to_string()],
            sizes: sizes(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::fixtures::air_force;
    use super::*;

    #[test]
    fn test_defaults() {
        let product = air_force();
        assert_eq!(product.default_color(), "White");
        assert_eq!(product.default_size(), "9");
    }

    #[test]
    fn test_default_size_falls_back_to_first_size() {
        let mut product = air_force();
        product.sizes = vec!["4".to_string(), "5".to_string()];
        assert_eq!(product.default_size(), "4");
    }

    #[test]
    fn test_offers_options() {
        let product = air_force();
        assert!(product.offers_size("12"));
        assert!(!product.offers_size("13"));
        assert!(product.offers_color("Black"));
        assert!(!product.offers_color("black"));
    }

    #[test]
    fn test_validate() {
        assert!(air_force().validate().is_ok());

        let mut product = air_force();
        product.colors.clear();
        assert_eq!(
            product.validate(),
            Err(ProductError::NoColors(ProductId::new(1)))
        );

        let mut product = air_force();
        product.sizes.clear();
        assert_eq!(
            product.validate(),
            Err(ProductError::NoSizes(ProductId::new(1)))
        );

        let mut product = air_force();
        product.price = Price::usd(Decimal::from(-5));
        assert_eq!(
            product.validate(),
            Err(ProductError::NegativePrice(ProductId::new(1)))
        );
    }

    #[test]
    fn test_json_keeps_field_names() {
        let json = serde_json::to_value(air_force()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Nike Air Force 1");
        assert_eq!(json["price"]["amount"], "110");
        assert_eq!(json["colors"][0], "White");
    }
}
