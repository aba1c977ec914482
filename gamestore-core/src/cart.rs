//! Cart contents, the checkout phase machine and the cart controller.
//!
//! Every mutation is request-then-reload: the cart is fetched again after a
//! successful change and nothing is merged locally. The total is always
//! recomputed from the lines; whatever total the backend reports is ignored.
use crate::api::{StoreClient, Transport};
use crate::checkout::{CheckoutPhase, PaymentMethod};
use crate::money::{Money, null_as_default};
use crate::notice::Notices;
use crate::orders::Order;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(alias = "id")]
    pub cart_id: i64,
    pub game_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Money,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default)]
    pub gameicon: Option<String>,
}

impl CartLine {
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.price * self.quantity
    }
}

/// `GET /cart` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(rename = "cartItems", default)]
    pub lines: Vec<CartLine>,
    #[serde(rename = "itemCount", default)]
    pub item_count: u32,
}

/// Σ price × quantity over the lines, in whole cents.
#[must_use]
pub fn cart_total(lines: &[CartLine]) -> Money {
    lines.iter().map(CartLine::subtotal).sum()
}

/// Notification text for a stock-limit rejection.
#[must_use]
pub fn stock_notice(available: u32) -> String {
    match available {
        0 => String::from("Sorry, this game is out of stock"),
        1 => String::from("Only 1 left in stock"),
        n => format!("Only {n} left in stock"),
    }
}

/// How a line mutation (quantity change or removal) ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Accepted; carries the freshly reloaded cart.
    Reloaded(CartSnapshot),
    /// Rejected for stock; carries the available quantity.
    StockLimited(u32),
    Failed(String),
    /// Accepted, but reading the cart back failed.
    ReloadFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    LoadStarted,
    Loaded(CartSnapshot),
    LoadFailed(String),
    LineStarted(i64),
    LineFinished { cart_id: i64, outcome: LineOutcome },
    CheckoutStarted,
    CheckoutCancelled,
    PaymentSelected(PaymentMethod),
    OrderStarted,
    OrderPlaced(Order),
    OrderFailed(String),
    NoticeDismissed(u64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub item_count: u32,
    /// Line ids with a request outstanding; only their controls are disabled.
    pub in_flight: BTreeSet<i64>,
    pub phase: CheckoutPhase,
    pub payment_method: PaymentMethod,
    pub placing: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub notices: Notices,
    /// Order created by the last successful checkout.
    pub placed_order: Option<Order>,
}

impl CartState {
    pub fn apply(&mut self, event: CartEvent) {
        match event {
            CartEvent::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            CartEvent::Loaded(snapshot) => {
                self.loading = false;
                self.error = None;
                self.replace_lines(snapshot);
            }
            CartEvent::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            CartEvent::LineStarted(cart_id) => {
                self.in_flight.insert(cart_id);
            }
            CartEvent::LineFinished { cart_id, outcome } => {
                self.in_flight.remove(&cart_id);
                match outcome {
                    LineOutcome::Reloaded(snapshot) => self.replace_lines(snapshot),
                    LineOutcome::StockLimited(available) => {
                        self.notices.error(stock_notice(available));
                    }
                    LineOutcome::Failed(message) | LineOutcome::ReloadFailed(message) => {
                        self.notices.error(message);
                    }
                }
            }
            CartEvent::CheckoutStarted => {
                if self.phase == CheckoutPhase::Cart && !self.lines.is_empty() {
                    self.phase = CheckoutPhase::Payment;
                }
            }
            CartEvent::CheckoutCancelled => {
                if self.phase == CheckoutPhase::Payment {
                    self.phase = CheckoutPhase::Cart;
                }
            }
            CartEvent::PaymentSelected(method) => self.payment_method = method,
            CartEvent::OrderStarted => self.placing = true,
            CartEvent::OrderPlaced(order) => {
                self.placing = false;
                self.lines.clear();
                self.total = Money::ZERO;
                self.item_count = 0;
                self.phase = CheckoutPhase::Confirmation;
                self.notices.success("Order placed successfully!");
                self.placed_order = Some(order);
            }
            CartEvent::OrderFailed(message) => {
                self.placing = false;
                self.notices.error(message);
            }
            CartEvent::NoticeDismissed(id) => self.notices.dismiss(id),
        }
    }

    fn replace_lines(&mut self, snapshot: CartSnapshot) {
        self.total = cart_total(&snapshot.lines);
        self.item_count = if snapshot.item_count == 0 {
            snapshot.lines.iter().map(|l| l.quantity).sum()
        } else {
            snapshot.item_count
        };
        self.lines = snapshot.lines;
    }

    #[must_use]
    pub fn line(&self, cart_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.cart_id == cart_id)
    }

    #[must_use]
    pub fn is_busy(&self, cart_id: i64) -> bool {
        self.in_flight.contains(&cart_id)
    }

    /// Whether a quantity change should be sent at all.
    ///
    /// Quantities below one, unknown lines, unchanged quantities and lines
    /// already in flight are no-ops.
    #[must_use]
    pub fn accepts_quantity(&self, cart_id: i64, quantity: u32) -> bool {
        quantity >= 1
            && !self.is_busy(cart_id)
            && self.line(cart_id).is_some_and(|l| l.quantity != quantity)
    }

    #[must_use]
    pub fn accepts_removal(&self, cart_id: i64) -> bool {
        !self.is_busy(cart_id) && self.line(cart_id).is_some()
    }

    #[must_use]
    pub fn can_place_order(&self) -> bool {
        !self.lines.is_empty() && !self.placing && self.phase != CheckoutPhase::Confirmation
    }
}

/// Result of an add-to-cart from the catalog or a game page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Added; carries the refreshed header count when it could be read.
    Added(Option<u32>),
    StockLimited(u32),
    Failed(String),
}

pub async fn fetch_cart<T: Transport>(client: &StoreClient<T>) -> CartEvent {
    match client.cart().await {
        Ok(snapshot) => CartEvent::Loaded(snapshot),
        Err(err) => {
            log::error!("failed to load cart: {err}");
            CartEvent::LoadFailed(err.user_message("Failed to load your cart"))
        }
    }
}

async fn reload_after<T: Transport>(client: &StoreClient<T>) -> LineOutcome {
    match client.cart().await {
        Ok(snapshot) => LineOutcome::Reloaded(snapshot),
        Err(err) => {
            log::error!("cart reload after mutation failed: {err}");
            LineOutcome::ReloadFailed(err.user_message("Failed to refresh your cart"))
        }
    }
}

/// Send a quantity change and reload on success.
pub async fn submit_quantity<T: Transport>(
    client: &StoreClient<T>,
    cart_id: i64,
    quantity: u32,
) -> CartEvent {
    let outcome = match client.update_cart_item(cart_id, quantity).await {
        Ok(()) => reload_after(client).await,
        Err(err) => match err.stock_exceeded() {
            Some(available) => LineOutcome::StockLimited(available),
            None => LineOutcome::Failed(err.user_message("Failed to update quantity")),
        },
    };
    CartEvent::LineFinished { cart_id, outcome }
}

pub async fn submit_removal<T: Transport>(client: &StoreClient<T>, cart_id: i64) -> CartEvent {
    let outcome = match client.remove_cart_item(cart_id).await {
        Ok(()) => reload_after(client).await,
        Err(err) => LineOutcome::Failed(err.user_message("Failed to remove item")),
    };
    CartEvent::LineFinished { cart_id, outcome }
}

pub async fn submit_order<T: Transport>(
    client: &StoreClient<T>,
    method: PaymentMethod,
) -> CartEvent {
    match client.create_order(method).await {
        Ok(order) => {
            log::info!("order {} placed with {method}", order.order_id);
            CartEvent::OrderPlaced(order)
        }
        Err(err) => CartEvent::OrderFailed(err.user_message("Failed to place order")),
    }
}

pub async fn add_to_cart<T: Transport>(
    client: &StoreClient<T>,
    game_id: i64,
    quantity: u32,
) -> AddOutcome {
    match client.add_to_cart(game_id, quantity).await {
        Ok(()) => AddOutcome::Added(client.cart_count().await.ok()),
        Err(err) => match err.stock_exceeded() {
            Some(available) => AddOutcome::StockLimited(available),
            None => AddOutcome::Failed(err.user_message("Failed to add to cart")),
        },
    }
}

/// Cart screen bound to a client.
pub struct CartController<T> {
    client: StoreClient<T>,
    state: CartState,
}

impl<T: Transport> CartController<T> {
    #[must_use]
    pub fn new(client: StoreClient<T>) -> Self {
        Self {
            client,
            state: CartState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub const fn client(&self) -> &StoreClient<T> {
        &self.client
    }

    pub async fn load_cart(&mut self) {
        self.state.apply(CartEvent::LoadStarted);
        let event = fetch_cart(&self.client).await;
        self.state.apply(event);
    }

    /// Returns whether a request was sent.
    pub async fn update_quantity(&mut self, cart_id: i64, quantity: u32) -> bool {
        if !self.state.accepts_quantity(cart_id, quantity) {
            return false;
        }
        self.state.apply(CartEvent::LineStarted(cart_id));
        let event = submit_quantity(&self.client, cart_id, quantity).await;
        self.state.apply(event);
        true
    }

    pub async fn remove_item(&mut self, cart_id: i64) -> bool {
        if !self.state.accepts_removal(cart_id) {
            return false;
        }
        self.state.apply(CartEvent::LineStarted(cart_id));
        let event = submit_removal(&self.client, cart_id).await;
        self.state.apply(event);
        true
    }

    pub async fn add_to_cart(&mut self, game_id: i64, quantity: u32) -> AddOutcome {
        let outcome = add_to_cart(&self.client, game_id, quantity).await;
        match &outcome {
            AddOutcome::Added(Some(count)) => self.state.item_count = *count,
            AddOutcome::Added(None) => {}
            AddOutcome::StockLimited(available) => {
                self.state.notices.error(stock_notice(*available));
            }
            AddOutcome::Failed(message) => {
                self.state.notices.error(message.clone());
            }
        }
        outcome
    }

    pub fn start_checkout(&mut self) {
        self.state.apply(CartEvent::CheckoutStarted);
    }

    pub fn cancel_checkout(&mut self) {
        self.state.apply(CartEvent::CheckoutCancelled);
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.state.apply(CartEvent::PaymentSelected(method));
    }

    /// Place the order; returns the created order on success.
    pub async fn place_order(&mut self) -> Option<Order> {
        if !self.state.can_place_order() {
            return None;
        }
        self.state.apply(CartEvent::OrderStarted);
        let event = submit_order(&self.client, self.state.payment_method).await;
        self.state.apply(event);
        self.state.placed_order.clone().filter(|_| self.state.phase == CheckoutPhase::Confirmation)
    }

    pub fn dismiss_notice(&mut self, id: u64) {
        self.state.apply(CartEvent::NoticeDismissed(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::OrderStatus;

    fn line(cart_id: i64, price: &str, quantity: u32) -> CartLine {
        CartLine {
            cart_id,
            game_id: cart_id * 10,
            title: format!("Game {cart_id}"),
            price: Money::parse(price).unwrap(),
            quantity,
            gameicon: None,
        }
    }

    fn loaded(lines: Vec<CartLine>) -> CartState {
        let mut state = CartState::default();
        state.apply(CartEvent::Loaded(CartSnapshot {
            lines,
            item_count: 0,
        }));
        state
    }

    #[test]
    fn total_is_recomputed_from_lines() {
        let snapshot: CartSnapshot = serde_json::from_str(
            r#"{"cartItems": [
                {"cart_id": 1, "game_id": 7, "title": "Hades", "price": "19.99", "quantity": 2},
                {"cart_id": 2, "game_id": 8, "title": "Celeste", "price": "5.00", "quantity": 1}
            ], "itemCount": 3, "total": "999.00"}"#,
        )
        .unwrap();
        let mut state = CartState::default();
        state.apply(CartEvent::Loaded(snapshot));
        assert_eq!(state.total.to_decimal_string(), "44.98");
        assert_eq!(state.item_count, 3);
    }

    #[test]
    fn null_columns_from_a_deleted_game_do_not_break_the_cart() {
        let snapshot: CartSnapshot = serde_json::from_str(
            r#"{"cartItems": [
                {"cart_id": 1, "game_id": 7, "title": null, "price": null, "quantity": null},
                {"cart_id": 2, "game_id": 8, "title": "Celeste", "price": "5.00", "quantity": 2}
            ], "itemCount": 2}"#,
        )
        .unwrap();
        assert_eq!(snapshot.lines[0].title, "");
        assert_eq!(snapshot.lines[0].subtotal(), Money::ZERO);
        assert_eq!(cart_total(&snapshot.lines).to_decimal_string(), "10.00");
    }

    #[test]
    fn quantity_guard_rejects_floor_and_busy_lines() {
        let mut state = loaded(vec![line(1, "10.00", 2)]);
        assert!(!state.accepts_quantity(1, 0));
        assert!(!state.accepts_quantity(1, 2));
        assert!(!state.accepts_quantity(99, 3));
        assert!(state.accepts_quantity(1, 3));
        state.apply(CartEvent::LineStarted(1));
        assert!(!state.accepts_quantity(1, 3));
        assert!(!state.accepts_removal(1));
    }

    #[test]
    fn stock_limited_outcome_leaves_lines_alone() {
        let mut state = loaded(vec![line(1, "10.00", 2)]);
        let before = state.lines.clone();
        state.apply(CartEvent::LineStarted(1));
        state.apply(CartEvent::LineFinished {
            cart_id: 1,
            outcome: LineOutcome::StockLimited(3),
        });
        assert_eq!(state.lines, before);
        assert!(state.in_flight.is_empty());
        assert!(state.notices.latest().unwrap().text.contains('3'));
    }

    #[test]
    fn checkout_phases_follow_the_machine() {
        let mut empty = CartState::default();
        empty.apply(CartEvent::CheckoutStarted);
        assert_eq!(empty.phase, CheckoutPhase::Cart);

        let mut state = loaded(vec![line(1, "10.00", 1)]);
        state.apply(CartEvent::CheckoutStarted);
        assert_eq!(state.phase, CheckoutPhase::Payment);
        state.apply(CartEvent::CheckoutCancelled);
        assert_eq!(state.phase, CheckoutPhase::Cart);
        state.apply(CartEvent::CheckoutStarted);
        state.apply(CartEvent::PaymentSelected(PaymentMethod::GiftCard));
        state.apply(CartEvent::OrderFailed(String::from("Insufficient stock")));
        assert_eq!(state.phase, CheckoutPhase::Payment);
        assert_eq!(state.lines.len(), 1);

        state.apply(CartEvent::OrderPlaced(Order {
            order_id: 41,
            created_at: None,
            status: OrderStatus::Pending,
            total_amount: Money::from_cents(1000),
            payment_method: Some(String::from("Gift Card")),
            items: Vec::new(),
            username: None,
            email: None,
        }));
        assert_eq!(state.phase, CheckoutPhase::Confirmation);
        assert!(state.lines.is_empty());
        assert!(!state.can_place_order());
        state.apply(CartEvent::CheckoutCancelled);
        assert_eq!(state.phase, CheckoutPhase::Confirmation);
    }

    #[test]
    fn stock_notice_names_the_quantity() {
        assert_eq!(stock_notice(3), "Only 3 left in stock");
        assert_eq!(stock_notice(1), "Only 1 left in stock");
        assert!(stock_notice(0).contains("out of stock"));
    }
}
