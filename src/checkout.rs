//! Checkout session orchestration.

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    cart::{AddOutcome, Cart},
    catalog::{CatalogError, CatalogItem, CatalogSource},
    orders::{OrderError, OrderGateway, OrderReceipt},
    payment::{PaymentError, PaymentFlow, PaymentMethod, TransferNotice, route},
};

/// Where the session currently is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Catalog shown; cart mutable.
    Browsing,

    /// Payment method picker open.
    SelectingMethod,

    /// A cash order submission is outstanding.
    Submitting,

    /// Transfer notice shown; waiting for the user to confirm.
    AwaitingTransfer,
}

/// Errors surfaced to the register operator.
///
/// None are fatal to the session and none are retried automatically;
/// every failure leaves the cart untouched so the attempt can be
/// repeated.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The payment was rejected before any submission.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Order submission failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The identifier does not match any catalog item.
    #[error("unknown catalog item {0}")]
    UnknownItem(u32),

    /// An order submission is already outstanding.
    #[error("an order submission is already in flight")]
    SubmissionInFlight,

    /// There is no transfer awaiting confirmation.
    #[error("no transfer is awaiting confirmation")]
    NoPendingTransfer,
}

/// Result of choosing a payment method.
#[derive(Debug)]
pub enum PaymentOutcome {
    /// Cash order recorded; the cart has been cleared and the tendered
    /// amount reset.
    Completed(OrderReceipt),

    /// Transfer notice produced; the cart is kept until
    /// [`CheckoutSession::confirm_transfer`] is called.
    TransferPending(TransferNotice),
}

/// One checkout session at the register.
///
/// Owns the only [`Cart`] for the session, the tendered cash amount,
/// and the catalog fetched on entry. All mutation goes through
/// `&mut self`, so cart operations can never interleave.
#[derive(Debug)]
pub struct CheckoutSession<G> {
    gateway: G,
    catalog: Vec<CatalogItem>,
    cart: Cart,
    tendered: u64,
    phase: CheckoutPhase,
}

impl<G> CheckoutSession<G>
where
    G: OrderGateway,
{
    /// Open a session, fetching the catalog once.
    ///
    /// The catalog is not refreshed for the lifetime of the session.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Catalog`] if the catalog cannot be
    /// loaded.
    pub async fn open<C>(catalog_source: &C, gateway: G) -> Result<Self, CheckoutError>
    where
        C: CatalogSource,
    {
        let catalog = catalog_source.list_items().await?;

        Ok(Self {
            gateway,
            catalog,
            cart: Cart::new(),
            tendered: 0,
            phase: CheckoutPhase::Browsing,
        })
    }

    /// The catalog fetched when the session opened.
    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    /// The session cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cash amount entered so far.
    pub fn tendered(&self) -> u64 {
        self.tendered
    }

    /// Set the cash amount entered by the user.
    pub fn set_tendered(&mut self, amount: u64) {
        self.tendered = amount;
    }

    /// Current phase of the checkout flow.
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Add one unit of the identified catalog item to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownItem`] if the identifier is not
    /// in the catalog.
    pub fn add_to_cart(&mut self, id: u32) -> Result<AddOutcome, CheckoutError> {
        let item = self
            .catalog
            .iter()
            .find(|item| item.id == id)
            .ok_or(CheckoutError::UnknownItem(id))?;

        Ok(self.cart.add_item(item))
    }

    /// Remove one unit of the identified item from the cart. Unknown
    /// identifiers are ignored.
    pub fn remove_from_cart(&mut self, id: u32) {
        self.cart.remove_item(id);
    }

    /// Open the payment method picker.
    ///
    /// There is deliberately no empty-cart guard; a zero-subtotal
    /// checkout is allowed.
    pub fn begin_payment(&mut self) {
        if self.phase == CheckoutPhase::Browsing {
            self.phase = CheckoutPhase::SelectingMethod;
        }
    }

    /// Choose a payment method and run the corresponding flow.
    ///
    /// Cash submits the order immediately: on success the cart is
    /// cleared and the tendered amount reset to zero. Transfer methods
    /// produce a [`TransferNotice`] and keep the cart until
    /// [`Self::confirm_transfer`] is called.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::SubmissionInFlight`]: a submission is already
    ///   outstanding; the call is rejected without any network activity.
    /// - [`CheckoutError::Payment`]: the tendered amount does not cover
    ///   the subtotal; no network call is made.
    /// - [`CheckoutError::Order`]: the submission failed. The cart and
    ///   tendered amount are left untouched for a manual retry.
    pub async fn choose_method(
        &mut self,
        method: PaymentMethod,
    ) -> Result<PaymentOutcome, CheckoutError> {
        if self.phase == CheckoutPhase::Submitting {
            return Err(CheckoutError::SubmissionInFlight);
        }

        let flow = match route(method, &self.cart, self.tendered, Timestamp::now()) {
            Ok(flow) => flow,
            Err(error) => {
                self.phase = CheckoutPhase::Browsing;
                return Err(error.into());
            }
        };

        match flow {
            PaymentFlow::Submit(order) => {
                self.phase = CheckoutPhase::Submitting;

                match self.gateway.create_order(&order).await {
                    Ok(receipt) => {
                        self.cart.clear();
                        self.tendered = 0;
                        self.phase = CheckoutPhase::Browsing;

                        Ok(PaymentOutcome::Completed(receipt))
                    }
                    Err(error) => {
                        self.phase = CheckoutPhase::Browsing;

                        Err(CheckoutError::Order(error))
                    }
                }
            }
            PaymentFlow::Transfer(notice) => {
                self.phase = CheckoutPhase::AwaitingTransfer;

                Ok(PaymentOutcome::TransferPending(notice))
            }
        }
    }

    /// Acknowledge a transfer notice, completing the checkout.
    ///
    /// Clears the cart and resets the tendered amount. No settlement
    /// verification happens; the acknowledgment is the whole path.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NoPendingTransfer`] when no transfer
    /// notice is awaiting confirmation.
    pub fn confirm_transfer(&mut self) -> Result<(), CheckoutError> {
        if self.phase != CheckoutPhase::AwaitingTransfer {
            return Err(CheckoutError::NoPendingTransfer);
        }

        self.cart.clear();
        self.tendered = 0;
        self.phase = CheckoutPhase::Browsing;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use testresult::TestResult;

    use crate::{
        catalog::MockCatalogSource,
        orders::{MockOrderGateway, OrderReceipt},
    };

    use super::*;

    fn catalog_fixture() -> Vec<CatalogItem> {
        vec![
            CatalogItem {
                id: 1,
                name: "Kopi Sachet".to_owned(),
                unit_price: 10_000,
                stock: 5,
            },
            CatalogItem {
                id: 2,
                name: "Teh Botol".to_owned(),
                unit_price: 5_000,
                stock: 3,
            },
        ]
    }

    fn catalog_source() -> MockCatalogSource {
        let mut source = MockCatalogSource::new();
        source
            .expect_list_items()
            .returning(|| Ok(catalog_fixture()));

        source
    }

    async fn session_with_two_lines(
        gateway: MockOrderGateway,
    ) -> CheckoutSession<MockOrderGateway> {
        let mut session = CheckoutSession::open(&catalog_source(), gateway)
            .await
            .expect("open should succeed");

        session.add_to_cart(1).expect("add kopi");
        session.add_to_cart(1).expect("add kopi again");
        session.add_to_cart(2).expect("add teh");

        session
    }

    #[tokio::test]
    async fn open_fetches_the_catalog_once() -> TestResult {
        let session = CheckoutSession::open(&catalog_source(), MockOrderGateway::new()).await?;

        assert_eq!(session.catalog().len(), 2);
        assert!(session.cart().is_empty());
        assert_eq!(session.tendered(), 0);
        assert_eq!(session.phase(), CheckoutPhase::Browsing);

        Ok(())
    }

    #[tokio::test]
    async fn add_to_cart_unknown_item_errors() -> TestResult {
        let mut session =
            CheckoutSession::open(&catalog_source(), MockOrderGateway::new()).await?;

        let result = session.add_to_cart(99);

        assert!(
            matches!(result, Err(CheckoutError::UnknownItem(99))),
            "expected UnknownItem, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cash_checkout_clears_cart_and_resets_tender() -> TestResult {
        let mut gateway = MockOrderGateway::new();
        gateway
            .expect_create_order()
            .withf(|order| order.amount_tendered == 25_000 && order.items.len() == 2)
            .times(1)
            .returning(|_| {
                Ok(OrderReceipt {
                    invoice: "INV-001".to_owned(),
                })
            });

        let mut session = session_with_two_lines(gateway).await;
        session.set_tendered(25_000);
        session.begin_payment();

        let outcome = session.choose_method(PaymentMethod::Cash).await?;

        match outcome {
            PaymentOutcome::Completed(receipt) => assert_eq!(receipt.invoice, "INV-001"),
            other => panic!("expected Completed, got {other:?}"),
        }
        assert!(session.cart().is_empty());
        assert_eq!(session.tendered(), 0);
        assert_eq!(session.phase(), CheckoutPhase::Browsing);

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_tender_makes_no_network_call() {
        // No expectation set: any gateway call would fail the test.
        let mut session = session_with_two_lines(MockOrderGateway::new()).await;
        session.set_tendered(20_000);
        session.begin_payment();

        let result = session.choose_method(PaymentMethod::Cash).await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::Payment(PaymentError::InsufficientPayment {
                    tendered: 20_000,
                    subtotal: 25_000,
                }))
            ),
            "expected InsufficientPayment, got {result:?}"
        );
        assert_eq!(session.cart().len(), 2);
        assert_eq!(session.tendered(), 20_000);
    }

    #[tokio::test]
    async fn rejected_submission_leaves_cart_untouched() {
        let mut gateway = MockOrderGateway::new();
        gateway.expect_create_order().times(1).returning(|_| {
            Err(OrderError::Rejected {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            })
        });

        let mut session = session_with_two_lines(gateway).await;
        session.set_tendered(25_000);
        session.begin_payment();

        let result = session.choose_method(PaymentMethod::Cash).await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::Order(OrderError::Rejected { status }))
                    if status == StatusCode::INTERNAL_SERVER_ERROR
            ),
            "expected Rejected, got {result:?}"
        );
        assert_eq!(session.cart().len(), 2);
        assert_eq!(session.tendered(), 25_000);
        assert_eq!(session.phase(), CheckoutPhase::Browsing);
    }

    #[tokio::test]
    async fn transfer_keeps_cart_until_confirmed() -> TestResult {
        // No gateway expectation: the transfer path must not submit.
        let mut session = session_with_two_lines(MockOrderGateway::new()).await;
        session.begin_payment();

        let outcome = session.choose_method(PaymentMethod::TransferBca).await?;

        match outcome {
            PaymentOutcome::TransferPending(notice) => {
                assert_eq!(notice.bank, "BCA");
                assert_eq!(notice.amount, 25_000);
                assert!(notice.reference.starts_with("TRX-"), "got {notice:?}");
                assert_eq!(notice.reference.len(), "TRX-".len() + 6);
            }
            other => panic!("expected TransferPending, got {other:?}"),
        }
        assert_eq!(session.cart().len(), 2);
        assert_eq!(session.phase(), CheckoutPhase::AwaitingTransfer);

        session.confirm_transfer()?;

        assert!(session.cart().is_empty());
        assert_eq!(session.tendered(), 0);
        assert_eq!(session.phase(), CheckoutPhase::Browsing);

        Ok(())
    }

    #[tokio::test]
    async fn confirm_without_pending_transfer_errors() {
        let mut session = session_with_two_lines(MockOrderGateway::new()).await;

        let result = session.confirm_transfer();

        assert!(
            matches!(result, Err(CheckoutError::NoPendingTransfer)),
            "expected NoPendingTransfer, got {result:?}"
        );
        assert_eq!(session.cart().len(), 2);
    }

    #[tokio::test]
    async fn zero_subtotal_cash_checkout_is_allowed() -> TestResult {
        let mut gateway = MockOrderGateway::new();
        gateway
            .expect_create_order()
            .withf(|order| order.items.is_empty() && order.amount_tendered == 0)
            .times(1)
            .returning(|_| {
                Ok(OrderReceipt {
                    invoice: "INV-002".to_owned(),
                })
            });

        let mut session = CheckoutSession::open(&catalog_source(), gateway).await?;
        session.begin_payment();

        let outcome = session.choose_method(PaymentMethod::Cash).await?;

        assert!(
            matches!(outcome, PaymentOutcome::Completed(_)),
            "an empty cart still checks out, got {outcome:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn soft_cap_is_reported_not_raised() {
        let mut session = session_with_two_lines(MockOrderGateway::new()).await;

        // Teh Botol has stock 3; two more adds hit the cap.
        session.add_to_cart(2).expect("second teh");
        session.add_to_cart(2).expect("third teh");
        let outcome = session.add_to_cart(2).expect("capped add still succeeds");

        assert_eq!(outcome, AddOutcome::AtCapacity);
        assert_eq!(session.cart().quantity_of(2), Some(3));
    }
}
