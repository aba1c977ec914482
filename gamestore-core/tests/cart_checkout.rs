use futures::executor::block_on;
use gamestore_core::mock::FakeBackend;
use gamestore_core::{
    AddOutcome, CartController, CheckoutPhase, Method, Money, PaymentMethod, StoreClient,
};
use serde_json::json;

fn shopper_with_cart() -> (FakeBackend, CartController<FakeBackend>) {
    let backend = FakeBackend::seeded();
    backend.sign_in_as("shopper@example.com");
    let mut cart = CartController::new(StoreClient::new(backend.clone()));
    let hades = backend.game_id("Hades").unwrap();
    let celeste = backend.game_id("Celeste").unwrap();
    assert!(matches!(block_on(cart.add_to_cart(hades, 2)), AddOutcome::Added(Some(2))));
    assert!(matches!(block_on(cart.add_to_cart(celeste, 1)), AddOutcome::Added(Some(3))));
    block_on(cart.load_cart());
    backend.clear_log();
    (backend, cart)
}

#[test]
fn total_is_recomputed_client_side() {
    let (backend, mut cart) = shopper_with_cart();
    assert_eq!(cart.state().total.to_decimal_string(), "44.98");

    backend.respond_once(
        Method::Get,
        "/cart",
        200,
        json!({
            "cartItems": [
                {"cart_id": 1, "game_id": 1, "title": "A", "price": "19.99", "quantity": 2},
                {"cart_id": 2, "game_id": 2, "title": "B", "price": "5.00", "quantity": 1}
            ],
            "itemCount": 3,
            "total": "1.00"
        }),
    );
    block_on(cart.load_cart());
    assert_eq!(cart.state().total, Money::from_cents(4498));
}

#[test]
fn quantity_below_one_sends_nothing() {
    let (backend, mut cart) = shopper_with_cart();
    let before = cart.state().clone();
    let line = before.lines[0].cart_id;
    assert!(!block_on(cart.update_quantity(line, 0)));
    assert_eq!(cart.state(), &before);
    assert!(backend.requests().is_empty());
}

#[test]
fn stock_exceeded_notifies_without_reload() {
    let (backend, mut cart) = shopper_with_cart();
    let before = cart.state().lines.clone();
    let line = before[0].cart_id;
    backend.respond_once(
        Method::Post,
        "/cart/update",
        400,
        json!({"message": "Requested quantity exceeds available stock", "availableQuantity": 3}),
    );
    assert!(block_on(cart.update_quantity(line, 9)));
    assert_eq!(cart.state().lines, before);
    assert!(cart.state().in_flight.is_empty());
    let notice = cart.state().notices.latest().unwrap();
    assert!(notice.text.contains('3'), "notice was {:?}", notice.text);
    assert_eq!(backend.calls(Method::Get, "/cart"), 0);
}

#[test]
fn accepted_update_reloads_the_cart() {
    let (backend, mut cart) = shopper_with_cart();
    let line = cart.state().lines[0].cart_id;
    assert!(block_on(cart.update_quantity(line, 3)));
    assert_eq!(backend.calls(Method::Post, "/cart/update"), 1);
    assert_eq!(backend.calls(Method::Get, "/cart"), 1);
    assert_eq!(cart.state().line(line).map(|l| l.quantity), Some(3));
    assert_eq!(cart.state().total.to_decimal_string(), "64.97");
}

#[test]
fn other_failures_show_a_generic_notice() {
    let (backend, mut cart) = shopper_with_cart();
    let line = cart.state().lines[1].cart_id;
    backend.respond_once(Method::Post, "/cart/remove", 500, serde_json::Value::Null);
    assert!(block_on(cart.remove_item(line)));
    assert_eq!(cart.state().lines.len(), 2);
    assert_eq!(
        cart.state().notices.latest().map(|n| n.text.as_str()),
        Some("Failed to remove item")
    );

    assert!(block_on(cart.remove_item(line)));
    assert_eq!(cart.state().lines.len(), 1);
}

#[test]
fn checkout_runs_through_every_phase() {
    let backend = FakeBackend::seeded();
    backend.sign_in_as("shopper@example.com");
    let mut empty = CartController::new(StoreClient::new(backend.clone()));
    block_on(empty.load_cart());
    empty.start_checkout();
    assert_eq!(empty.state().phase, CheckoutPhase::Cart);
    assert!(block_on(empty.place_order()).is_none());
    assert_eq!(backend.calls(Method::Post, "/orders/create"), 0);

    let (backend, mut cart) = shopper_with_cart();
    cart.start_checkout();
    assert_eq!(cart.state().phase, CheckoutPhase::Payment);
    cart.cancel_checkout();
    assert_eq!(cart.state().phase, CheckoutPhase::Cart);
    cart.start_checkout();
    cart.select_payment_method(PaymentMethod::DigitalWallet);

    let order = block_on(cart.place_order()).expect("order placed");
    assert_eq!(cart.state().phase, CheckoutPhase::Confirmation);
    assert!(cart.state().lines.is_empty());
    assert_eq!(order.total_amount.to_decimal_string(), "44.98");
    assert_eq!(order.payment_method.as_deref(), Some("Digital Wallet"));
    let sent = backend.requests();
    assert_eq!(sent.last().and_then(|r| r.body.clone()), Some(json!({"paymentMethod": "Digital Wallet"})));
}

#[test]
fn failed_order_stays_on_payment_with_server_message() {
    let (backend, mut cart) = shopper_with_cart();
    cart.start_checkout();
    backend.respond_once(
        Method::Post,
        "/orders/create",
        400,
        json!({"message": "Insufficient stock for Celeste"}),
    );
    assert!(block_on(cart.place_order()).is_none());
    assert_eq!(cart.state().phase, CheckoutPhase::Payment);
    assert_eq!(cart.state().lines.len(), 2);
    assert_eq!(
        cart.state().notices.latest().map(|n| n.text.as_str()),
        Some("Insufficient stock for Celeste")
    );
}

#[test]
fn reloading_twice_is_idempotent() {
    let (_backend, mut cart) = shopper_with_cart();
    block_on(cart.load_cart());
    let first = cart.state().clone();
    block_on(cart.load_cart());
    assert_eq!(cart.state(), &first);
    assert_eq!(cart.state().lines.len(), 2);
}

#[test]
fn adding_past_stock_reports_available_quantity() {
    let (backend, mut cart) = shopper_with_cart();
    let celeste = backend.game_id("Celeste").unwrap();
    assert_eq!(block_on(cart.add_to_cart(celeste, 5)), AddOutcome::StockLimited(3));
    assert_eq!(
        cart.state().notices.latest().map(|n| n.text.as_str()),
        Some("Only 3 left in stock")
    );
}
