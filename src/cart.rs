//! Shopping cart
//!
//! Session-scoped line items. The total is always computed from the
//! current lines; there is no stored total to fall out of sync.

use tracing::debug;

use crate::model::{CartItem, Id, Product};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, i| count.saturating_add(i.quantity))
    }

    /// Adds `quantity` units of `product`, merging into an existing line.
    ///
    /// A merged line saturates at `u32::MAX` units.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity,
            }),
        }
        debug!(product_id = product.id, quantity, "Added to cart");
    }

    pub fn remove_item(&mut self, id: Id) {
        self.items.retain(|i| i.id != id);
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, id: Id, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.items.iter_mut().find(|i| i.id == id) {
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn product(id: Id, name: &str, price: f64) -> Product {
        Product {
            id,
            name: name.into(),
            price,
            original_price: None,
            image: "https://images.example.com/p.jpg".into(),
            category: Category::Girls,
            is_new: None,
            is_sale: None,
            rating: 5,
        }
    }

    #[test]
    fn same_product_twice_increments_quantity() {
        let dress = product(1, "Moroccan Print Dress", 249.0);
        let mut cart = Cart::new();
        cart.add_item(&dress, 1);
        cart.add_item(&dress, 1);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), 498.0);
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Dress", 249.0), 2);
        cart.add_item(&product(2, "T-shirt", 129.0), 3);
        cart.add_item(&product(5, "Hat", 89.5), 1);

        let expected: f64 = cart.items().iter().map(|i| i.price * f64::from(i.quantity)).sum();
        assert_eq!(cart.total(), expected);
        assert_eq!(cart.total(), 249.0 * 2.0 + 129.0 * 3.0 + 89.5);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn non_positive_quantity_removes_the_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Dress", 249.0), 1);
        cart.add_item(&product(2, "T-shirt", 129.0), 1);

        cart.set_quantity(1, 4);
        assert_eq!(cart.items()[0].quantity, 4);

        cart.set_quantity(1, 0);
        cart.set_quantity(2, -3);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn merging_past_the_quantity_limit_saturates() {
        let dress = product(1, "Dress", 249.0);
        let mut cart = Cart::new();
        cart.add_item(&dress, u32::MAX);
        cart.add_item(&dress, 1);

        assert_eq!(cart.items()[0].quantity, u32::MAX);
        assert_eq!(cart.total(), 249.0 * f64::from(u32::MAX));

        cart.add_item(&product(2, "T-shirt", 129.0), 5);
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn set_quantity_ignores_unknown_lines() {
        let mut cart = Cart::new();
        cart.set_quantity(7, 2);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_everything() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Dress", 249.0), 2);
        cart.remove_item(99);
        assert_eq!(cart.items().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }
}
