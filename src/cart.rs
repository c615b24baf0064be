//! Cart

use smallvec::SmallVec;

use crate::catalog::CatalogItem;

/// A catalog item selected for purchase, with its quantity.
///
/// Invariant: `quantity` is at least 1 for as long as the line exists,
/// and never exceeds the item's stock at the time of the last add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    item: CatalogItem,
    quantity: u32,
}

impl CartLine {
    /// The catalog item this line refers to.
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// Units of the item in the cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line extended price: unit price times quantity.
    pub fn extended_price(&self) -> u64 {
        self.item.unit_price * u64::from(self.quantity)
    }
}

/// Outcome of adding an item to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The line was created or its quantity incremented.
    Added,

    /// The line already holds every unit in stock; the cart is unchanged.
    /// This is the documented soft cap, not an error.
    AtCapacity,
}

/// In-memory cart for a single checkout session.
///
/// Lines keep insertion order and are keyed by item identifier; there is
/// never more than one line per item. All mutation is synchronous and
/// goes through `&mut self`.
#[derive(Debug, Default)]
pub struct Cart {
    lines: SmallVec<[CartLine; 8]>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item` to the cart.
    ///
    /// A new line starts at quantity 1. An existing line is incremented
    /// unless it already holds the item's full stock, in which case the
    /// cart is left unchanged and [`AddOutcome::AtCapacity`] is returned.
    /// Items with no stock at all are also reported as at capacity.
    pub fn add_item(&mut self, item: &CatalogItem) -> AddOutcome {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            if line.quantity >= item.stock {
                return AddOutcome::AtCapacity;
            }

            line.quantity += 1;

            return AddOutcome::Added;
        }

        if item.stock == 0 {
            return AddOutcome::AtCapacity;
        }

        self.lines.push(CartLine {
            item: item.clone(),
            quantity: 1,
        });

        AddOutcome::Added
    }

    /// Remove one unit of the item with the given identifier.
    ///
    /// The line is deleted when its quantity reaches zero. Unknown
    /// identifiers are ignored.
    pub fn remove_item(&mut self, id: u32) {
        for line in &mut self.lines {
            if line.item.id == id {
                line.quantity -= 1;
                break;
            }
        }

        self.lines.retain(|line| line.quantity > 0);
    }

    /// Sum of extended prices across all lines. Zero for an empty cart.
    pub fn subtotal(&self) -> u64 {
        self.lines.iter().map(CartLine::extended_price).sum()
    }

    /// Remove every line. Used after a completed checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity currently held for the given item, if any.
    pub fn quantity_of(&self, id: u32) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.item.id == id)
            .map(|line| line.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, unit_price: u64, stock: u32) -> CatalogItem {
        CatalogItem {
            id,
            name: format!("item-{id}"),
            unit_price,
            stock,
        }
    }

    #[test]
    fn add_item_creates_line_at_quantity_one() {
        let mut cart = Cart::new();

        let outcome = cart.add_item(&item(1, 10_000, 5));

        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(cart.quantity_of(1), Some(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn add_item_increments_existing_line() {
        let mut cart = Cart::new();
        let kopi = item(1, 10_000, 5);

        cart.add_item(&kopi);
        cart.add_item(&kopi);

        assert_eq!(cart.quantity_of(1), Some(2));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn add_item_is_capped_at_stock() {
        let mut cart = Cart::new();
        let kopi = item(1, 10_000, 2);

        assert_eq!(cart.add_item(&kopi), AddOutcome::Added);
        assert_eq!(cart.add_item(&kopi), AddOutcome::Added);
        assert_eq!(cart.add_item(&kopi), AddOutcome::AtCapacity);

        assert_eq!(cart.quantity_of(1), Some(2));
    }

    #[test]
    fn add_item_with_no_stock_is_at_capacity() {
        let mut cart = Cart::new();

        let outcome = cart.add_item(&item(1, 10_000, 0));

        assert_eq!(outcome, AddOutcome::AtCapacity);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_item_decrements_quantity() {
        let mut cart = Cart::new();
        let kopi = item(1, 10_000, 5);

        cart.add_item(&kopi);
        cart.add_item(&kopi);
        cart.remove_item(1);

        assert_eq!(cart.quantity_of(1), Some(1));
    }

    #[test]
    fn removing_last_unit_deletes_the_line() {
        let mut cart = Cart::new();
        let kopi = item(1, 10_000, 5);

        cart.add_item(&kopi);
        cart.remove_item(1);

        assert_eq!(cart.quantity_of(1), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn add_after_delete_recreates_line_at_quantity_one() {
        let mut cart = Cart::new();
        let kopi = item(1, 10_000, 5);

        cart.add_item(&kopi);
        cart.add_item(&kopi);
        cart.remove_item(1);
        cart.remove_item(1);
        cart.add_item(&kopi);

        assert_eq!(cart.quantity_of(1), Some(1));
    }

    #[test]
    fn remove_item_unknown_id_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 10_000, 5));

        cart.remove_item(99);

        assert_eq!(cart.quantity_of(1), Some(1));
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() {
        let cart = Cart::new();

        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn subtotal_sums_extended_prices() {
        let mut cart = Cart::new();
        let kopi = item(1, 10_000, 5);
        let teh = item(2, 5_000, 3);

        cart.add_item(&kopi);
        cart.add_item(&kopi);
        cart.add_item(&teh);

        assert_eq!(cart.subtotal(), 25_000);
    }

    #[test]
    fn quantity_never_exceeds_stock_over_any_sequence() {
        let mut cart = Cart::new();
        let kopi = item(1, 10_000, 3);

        for _ in 0..10 {
            cart.add_item(&kopi);
        }
        cart.remove_item(1);
        for _ in 0..10 {
            cart.add_item(&kopi);
        }

        assert_eq!(cart.quantity_of(1), Some(3));
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 10_000, 5));
        cart.add_item(&item(2, 5_000, 3));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&item(2, 5_000, 3));
        cart.add_item(&item(1, 10_000, 5));

        let ids: Vec<u32> = cart.lines().iter().map(|line| line.item().id).collect();

        assert_eq!(ids, vec![2, 1]);
    }
}
