use crate::catalog::SharedCatalog;
use crate::error::{Error, Result};
use crate::store::{CartLine, StateKey, Store};

use super::Toasts;

/// Largest quantity a single line accepts through [`CartService::update_quantity`].
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Cart mutations on top of the `cart` key.
///
/// Every mutation reads the current lines, edits a copy and writes the whole
/// sequence back, so subscribers always see a complete cart.
#[derive(Clone)]
pub struct CartService {
    store: Store,
    catalog: SharedCatalog,
    toasts: Toasts,
}

impl CartService {
    pub fn new(store: Store, catalog: SharedCatalog, toasts: Toasts) -> Self {
        Self {
            store,
            catalog,
            toasts,
        }
    }

    /// Add one unit of `product_id`.
    ///
    /// Returns `Ok(false)` without touching the store if the catalog has no
    /// such product.
    pub fn add(&self, product_id: &str) -> Result<bool> {
        let Some(name) = self
            .catalog
            .borrow()
            .product(product_id)
            .map(|p| p.name.clone())
        else {
            tracing::debug!(product = product_id, "add to cart ignored: unknown product");
            return Ok(false);
        };

        let mut cart = self.store.cart();
        match cart.iter_mut().find(|line| line.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => cart.push(CartLine::new(product_id, 1)),
        }
        tracing::info!(product = product_id, "added to cart");

        self.store.write(StateKey::Cart, cart)?;
        self.toasts.show(format!("{name} added to cart!"));
        Ok(true)
    }

    /// Drop the line for `product_id`, if any.
    pub fn remove(&self, product_id: &str) -> Result<()> {
        let mut cart = self.store.cart();
        cart.retain(|line| line.product_id != product_id);
        tracing::info!(product = product_id, "removed from cart");
        self.store.write(StateKey::Cart, cart)
    }

    /// Set the quantity of an existing line. Zero or less removes it; a
    /// product that is not in the cart is left alone.
    ///
    /// Quantities above [`MAX_LINE_QUANTITY`] are rejected with
    /// [`Error::InvalidNumber`] and the cart is not written.
    pub fn update_quantity(&self, product_id: &str, quantity: i64) -> Result<()> {
        if quantity > i64::from(MAX_LINE_QUANTITY) {
            tracing::debug!(product = product_id, quantity, "quantity update rejected");
            return Err(Error::InvalidNumber(quantity.to_string()));
        }

        let mut cart = self.store.cart();
        let Some(line) = cart.iter_mut().find(|line| line.product_id == product_id) else {
            tracing::debug!(product = product_id, "quantity update ignored: not in cart");
            return Ok(());
        };

        if quantity <= 0 {
            return self.remove(product_id);
        }
        line.quantity = u32::try_from(quantity).map_err(|_| Error::InvalidNumber(quantity.to_string()))?;
        self.store.write(StateKey::Cart, cart)
    }

    /// Sum of price times quantity. Lines for unknown products count as zero.
    pub fn total(&self) -> u64 {
        let catalog = self.catalog.borrow();
        self.store
            .cart()
            .iter()
            .filter_map(|line| {
                catalog
                    .product(&line.product_id)
                    .map(|p| p.price.saturating_mul(u64::from(line.quantity)))
            })
            .fold(0, u64::saturating_add)
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.store
            .cart()
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Estimated CO2 saved by the cart, in kilograms.
    pub fn co2_impact_kg(&self) -> f64 {
        co2_impact_kg(&self.catalog.borrow(), &self.store.cart())
    }
}

/// Carbon footprint score times quantity, over 100, summed across lines.
pub fn co2_impact_kg(catalog: &crate::catalog::Catalog, cart: &[CartLine]) -> f64 {
    cart.iter()
        .filter_map(|line| {
            catalog.product(&line.product_id).map(|p| {
                f64::from(p.score.carbon_footprint) * f64::from(line.quantity) / 100.0
            })
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::runtime::Scheduler;
    use std::time::Duration;

    fn service() -> (CartService, Store, Toasts) {
        let store = Store::new();
        store.write(StateKey::Cart, Vec::<CartLine>::new()).unwrap();
        let toasts = Toasts::new(Scheduler::new(), Duration::from_secs(3));
        let cart = CartService::new(store.clone(), Catalog::builtin().shared(), toasts.clone());
        (cart, store, toasts)
    }

    #[test]
    fn adding_twice_merges_lines() {
        let (cart, store, toasts) = service();
        assert!(cart.add("p1").unwrap());
        assert!(cart.add("p1").unwrap());

        assert_eq!(store.cart(), vec![CartLine::new("p1", 2)]);
        assert_eq!(cart.total(), 598);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(
            toasts.last().as_deref(),
            Some("Organic Bamboo Toothbrush Set added to cart!")
        );
    }

    #[test]
    fn unknown_product_is_ignored() {
        let (cart, store, toasts) = service();
        assert!(!cart.add("p99").unwrap());
        assert!(store.cart().is_empty());
        assert!(toasts.history().is_empty());
    }

    #[test]
    fn add_then_remove_empties_the_cart() {
        let (cart, store, _) = service();
        cart.add("p1").unwrap();
        cart.remove("p1").unwrap();
        assert!(store.cart().is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn update_quantity_edges() {
        let (cart, store, _) = service();
        cart.add("p2").unwrap();
        cart.add("p4").unwrap();

        cart.update_quantity("p2", 3).unwrap();
        assert_eq!(cart.total(), 3 * 1299 + 899);

        // not in the cart: nothing happens
        cart.update_quantity("p3", 5).unwrap();
        assert_eq!(store.cart().len(), 2);

        cart.update_quantity("p2", 0).unwrap();
        assert_eq!(store.cart(), vec![CartLine::new("p4", 1)]);

        cart.update_quantity("p4", -1).unwrap();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        let (cart, store, _) = service();
        cart.add("p1").unwrap();

        let err = cart.update_quantity("p1", 4_294_967_295).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber(ref n) if n == "4294967295"));
        assert_eq!(store.cart(), vec![CartLine::new("p1", 1)]);

        cart.update_quantity("p1", i64::from(MAX_LINE_QUANTITY)).unwrap();
        cart.add("p1").unwrap();
        assert_eq!(store.cart(), vec![CartLine::new("p1", MAX_LINE_QUANTITY + 1)]);
    }

    #[test]
    fn saturated_lines_do_not_overflow() {
        let (cart, store, _) = service();
        store
            .write(
                StateKey::Cart,
                vec![CartLine::new("p1", u32::MAX), CartLine::new("p2", u32::MAX)],
            )
            .unwrap();

        cart.add("p1").unwrap();
        assert_eq!(store.cart()[0].quantity, u32::MAX);
        assert_eq!(cart.item_count(), 2 * u64::from(u32::MAX));
        assert_eq!(cart.total(), (299 + 1299) * u64::from(u32::MAX));
    }

    #[test]
    fn co2_impact_follows_carbon_scores() {
        let (cart, _, _) = service();
        cart.add("p1").unwrap();
        cart.add("p1").unwrap();
        cart.add("p2").unwrap();
        // 98 * 2 / 100 + 85 / 100
        assert!((cart.co2_impact_kg() - 2.81).abs() < 1e-9);
    }
}
