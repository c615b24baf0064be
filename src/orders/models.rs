//! Order payload models.

use serde::{Deserialize, Serialize};

use crate::{cart::Cart, payment::PaymentMethod};

/// Contact identifier recorded for walk-in sales.
const WALK_IN_CONTACT_ID: u32 = 0;

/// Operator identifier until per-user sessions are wired up.
const DEFAULT_OPERATOR_ID: u32 = 1;

/// Store identifier for the single-store deployment.
const DEFAULT_STORE_ID: u32 = 1;

/// One ordered item as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    /// Catalog item identifier.
    pub item_id: u32,

    /// Units purchased.
    pub qty: u32,

    /// Unit sale price at submission time, in minor currency units.
    pub unit_price: u64,
}

/// Write-once order snapshot sent to the create-order endpoint.
///
/// Built from the cart at submission time and sent exactly once; there
/// is no automatic retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    /// Contact the sale is recorded against.
    pub contact_id: u32,

    /// Items purchased.
    pub items: Vec<OrderItem>,

    /// Cash amount handed over, in minor currency units.
    pub amount_tendered: u64,

    /// Payment method tag.
    pub payment_method: &'static str,

    /// Free-form note, currently always empty.
    pub note: String,

    /// Operator recording the sale.
    pub operator_id: u32,

    /// Store the sale belongs to.
    pub store_id: u32,
}

impl OrderRequest {
    /// Snapshot the cart into an order payload.
    #[must_use]
    pub fn from_cart(cart: &Cart, tendered: u64, method: PaymentMethod) -> Self {
        let items = cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                item_id: line.item().id,
                qty: line.quantity(),
                unit_price: line.item().unit_price,
            })
            .collect();

        Self {
            contact_id: WALK_IN_CONTACT_ID,
            items,
            amount_tendered: tendered,
            payment_method: method.wire_tag(),
            note: String::new(),
            operator_id: DEFAULT_OPERATOR_ID,
            store_id: DEFAULT_STORE_ID,
        }
    }
}

/// Server acknowledgement of a recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderReceipt {
    /// Server-assigned invoice identifier.
    pub invoice: String,
}
