//! Display data for templates.
//!
//! Templates only see these flattened, preformatted views; prices are
//! already strings and positions are already computed.

use sole_store_core::{Cart, CartLineItem, HeroSlider, Product};

use crate::catalog::HeroSlide;

/// Milliseconds between automatic slide advances.
pub const SLIDE_AUTOPLAY_MS: u32 = 5000;

/// Product card display data.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub description: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub default_size: String,
    pub default_color: String,
    pub wishlisted: bool,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, wishlisted: bool) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            colors: product.colors.clone(),
            sizes: product.sizes.clone(),
            default_size: product.default_size().to_string(),
            default_color: product.default_color().to_string(),
            wishlisted,
        }
    }
}

/// Cart line display data.
#[derive(Clone)]
pub struct CartItemView {
    /// Index in the cart, used by the quantity and remove buttons.
    pub position: usize,
    pub name: String,
    pub image: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl CartItemView {
    fn new(position: usize, line: &CartLineItem) -> Self {
        Self {
            position,
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            size: line.size.clone(),
            color: line.color.clone(),
            quantity: line.quantity,
            price: line.product.price.display(),
            line_price: line.line_price().display(),
        }
    }
}

/// Cart display data.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(position, line)| CartItemView::new(position, line))
                .collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
        }
    }
}

/// Hero slide display data.
#[derive(Clone)]
pub struct SlideView {
    pub index: usize,
    pub prev: usize,
    pub next: usize,
    pub title: String,
    pub tagline: String,
    pub image: String,
    /// Index of every slide, for the dot navigation.
    pub dots: Vec<usize>,
    pub autoplay_ms: u32,
}

impl SlideView {
    /// View of the slide `slider` currently shows.
    ///
    /// `slides` must have `slider.len()` entries.
    #[must_use]
    pub fn new(slider: HeroSlider, slides: &[HeroSlide]) -> Option<Self> {
        let slide = slides.get(slider.current())?;

        let mut prev = slider;
        prev.step(-1);
        let mut next = slider;
        next.step(1);

        Some(Self {
            index: slider.current(),
            prev: prev.current(),
            next: next.current(),
            title: slide.title.clone(),
            tagline: slide.tagline.clone(),
            image: slide.image.clone(),
            dots: (0..slider.len()).collect(),
            autoplay_ms: SLIDE_AUTOPLAY_MS,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sole_store_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_cart_view_formats_lines_and_total() {
        let catalog = Catalog::load().unwrap();
        let air_force = catalog.find(ProductId::new(1)).unwrap();
        let jordan = catalog.find(ProductId::new(2)).unwrap();

        let mut cart = Cart::new();
        cart.add(air_force, "9", "White").unwrap();
        cart.add(air_force, "9", "White").unwrap();
        cart.add(jordan, "10", "Red").unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "$390.00");
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].line_price, "$220.00");
        assert_eq!(view.items[1].position, 1);
        assert_eq!(view.items[1].size, "10");
    }

    #[test]
    fn test_slide_view_neighbours_wrap() {
        let catalog = Catalog::load().unwrap();
        let slides = catalog.slides();

        let view = SlideView::new(HeroSlider::new(slides.len()).unwrap(), slides).unwrap();
        assert_eq!(view.index, 0);
        assert_eq!(view.prev, slides.len() - 1);
        assert_eq!(view.next, 1);
        assert_eq!(view.dots.len(), slides.len());
        assert_eq!(view.autoplay_ms, SLIDE_AUTOPLAY_MS);
    }

    #[test]
    fn test_product_view_defaults() {
        let catalog = Catalog::load().unwrap();
        let view = ProductView::new(catalog.find(ProductId::new(1)).unwrap(), true);

        assert_eq!(view.price, "$110.00");
        assert_eq!(view.default_size, "9");
        assert_eq!(view.default_color, "White");
        assert!(view.wishlisted);
    }
}
