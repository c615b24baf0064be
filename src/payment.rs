//! Payment methods and checkout routing.

use jiff::Timestamp;
use thiserror::Error;

use crate::{cart::Cart, orders::OrderRequest};

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash handed over at the register.
    Cash,

    /// Bank transfer via BRI.
    TransferBri,

    /// Bank transfer via BCA.
    TransferBca,

    /// Bank transfer via BNI.
    TransferBni,
}

impl PaymentMethod {
    /// Every method, in the order the register offers them.
    pub const ALL: [Self; 4] = [
        Self::Cash,
        Self::TransferBri,
        Self::TransferBca,
        Self::TransferBni,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::TransferBri => "Transfer BRI",
            Self::TransferBca => "Transfer BCA",
            Self::TransferBni => "Transfer BNI",
        }
    }

    /// Tag sent in the order payload.
    #[must_use]
    pub fn wire_tag(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::TransferBri => "transfer_bri",
            Self::TransferBca => "transfer_bca",
            Self::TransferBni => "transfer_bni",
        }
    }

    /// Bank label for transfer methods: the label minus its
    /// `"Transfer "` prefix. `None` for cash.
    #[must_use]
    pub fn bank(self) -> Option<&'static str> {
        match self {
            Self::Cash => None,
            Self::TransferBri => Some("BRI"),
            Self::TransferBca => Some("BCA"),
            Self::TransferBni => Some("BNI"),
        }
    }

    /// Whether this method settles by bank transfer.
    #[must_use]
    pub fn is_transfer(self) -> bool {
        !matches!(self, Self::Cash)
    }
}

/// An item name and quantity shown on the transfer notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeLine {
    /// Item display name.
    pub name: String,

    /// Units being paid for.
    pub quantity: u32,
}

/// Display payload shown while awaiting a bank transfer.
///
/// This is a display-only placeholder path: no settlement verification
/// happens, the user simply confirms once the transfer is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferNotice {
    /// Target bank label.
    pub bank: &'static str,

    /// Amount to transfer, in minor currency units.
    pub amount: u64,

    /// Reference code to quote with the transfer.
    pub reference: String,

    /// Item names and quantities being paid for.
    pub lines: Vec<NoticeLine>,
}

impl TransferNotice {
    /// Build a notice for the given bank from the current cart.
    #[must_use]
    pub fn new(bank: &'static str, cart: &Cart, now: Timestamp) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| NoticeLine {
                name: line.item().name.clone(),
                quantity: line.quantity(),
            })
            .collect();

        Self {
            bank,
            amount: cart.subtotal(),
            reference: reference_code(now),
            lines,
        }
    }
}

/// Reference code: `TRX-` plus the last six digits of the
/// epoch-millisecond timestamp.
fn reference_code(now: Timestamp) -> String {
    format!("TRX-{:06}", now.as_millisecond().rem_euclid(1_000_000))
}

/// Routed continuation of a checkout attempt.
#[derive(Debug)]
pub enum PaymentFlow {
    /// Cash: the order is ready to submit.
    Submit(OrderRequest),

    /// Transfer: show the notice and wait for user confirmation before
    /// completing the checkout.
    Transfer(TransferNotice),
}

/// Errors raised before any order is submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The tendered cash amount does not cover the subtotal.
    #[error("tendered amount {tendered} is less than the subtotal {subtotal}")]
    InsufficientPayment {
        /// Cash amount entered by the user.
        tendered: u64,

        /// Amount owed.
        subtotal: u64,
    },
}

/// Route a checkout attempt by payment method.
///
/// Cash checks the tendered amount against the subtotal and yields an
/// [`OrderRequest`] ready for submission. Transfer methods yield a
/// [`TransferNotice`] instead; nothing is submitted for them.
///
/// # Errors
///
/// Returns [`PaymentError::InsufficientPayment`] for a cash payment
/// whose tendered amount is below the subtotal. No network call is made
/// in that case.
pub fn route(
    method: PaymentMethod,
    cart: &Cart,
    tendered: u64,
    now: Timestamp,
) -> Result<PaymentFlow, PaymentError> {
    match method.bank() {
        None => {
            let subtotal = cart.subtotal();

            if tendered < subtotal {
                return Err(PaymentError::InsufficientPayment { tendered, subtotal });
            }

            Ok(PaymentFlow::Submit(OrderRequest::from_cart(
                cart, tendered, method,
            )))
        }
        Some(bank) => Ok(PaymentFlow::Transfer(TransferNotice::new(bank, cart, now))),
    }
}
