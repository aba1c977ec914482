use futures::executor::block_on;
use gamestore_core::mock::FakeBackend;
use gamestore_core::{
    CartController, Method, OrderStatus, OrdersController, StoreClient, plan_search,
    SearchPlan,
};
use serde_json::json;

/// Place `count` single-item orders and return the backend.
fn backend_with_orders(count: usize) -> FakeBackend {
    let backend = FakeBackend::seeded();
    backend.sign_in_as("shopper@example.com");
    let hades = backend.game_id("Hades").unwrap();
    let mut cart = CartController::new(StoreClient::new(backend.clone()));
    for _ in 0..count {
        block_on(cart.add_to_cart(hades, 1));
        block_on(cart.load_cart());
        cart.start_checkout();
        assert!(block_on(cart.place_order()).is_some());
        cart = CartController::new(StoreClient::new(backend.clone()));
    }
    backend.clear_log();
    backend
}

#[test]
fn numeric_term_uses_the_lookup_endpoint() {
    let backend = backend_with_orders(2);
    let mut orders = OrdersController::new(StoreClient::new(backend.clone()));
    block_on(orders.load_orders(None));
    let wanted = orders.state().scoped[1].order_id;

    block_on(orders.search_orders(&wanted.to_string()));
    assert_eq!(backend.calls(Method::Get, "/orders/search"), 1);
    let sent = backend.requests().pop().unwrap();
    assert_eq!(sent.query_value("orderId"), Some(wanted.to_string().as_str()));
    assert_eq!(orders.state().visible.len(), 1);
    assert_eq!(orders.state().visible[0].order_id, wanted);
}

#[test]
fn non_numeric_term_filters_locally() {
    let backend = backend_with_orders(2);
    let mut orders = OrdersController::new(StoreClient::new(backend.clone()));
    block_on(orders.load_orders(None));
    block_on(orders.search_orders("abc"));
    assert_eq!(backend.calls(Method::Get, "/orders/search"), 0);
    assert!(orders.state().visible.is_empty());

    block_on(orders.search_orders(""));
    assert_eq!(orders.state().visible.len(), 2);
    assert_eq!(plan_search("104"), SearchPlan::ById(104));
}

#[test]
fn missing_order_is_an_empty_result() {
    let backend = backend_with_orders(1);
    let mut orders = OrdersController::new(StoreClient::new(backend.clone()));
    block_on(orders.load_orders(None));
    block_on(orders.search_orders("999999"));
    assert!(orders.state().visible.is_empty());
    assert_eq!(orders.state().search_error, None);
}

#[test]
fn status_filter_and_chips() {
    let backend = backend_with_orders(1);
    let mut orders = OrdersController::new(StoreClient::new(backend.clone()));
    block_on(orders.load_orders(Some(OrderStatus::Pending)));
    let sent = backend.requests().pop().unwrap();
    assert_eq!(sent.query_value("status"), Some("pending"));
    assert_eq!(orders.state().visible.len(), 1);

    let chips = orders.state().status_chips();
    assert_eq!(chips[0].label, "All");
    assert_eq!(chips[0].count, 1);
    assert_eq!(chips[1].status, Some(OrderStatus::Pending));

    block_on(orders.load_orders(Some(OrderStatus::Shipped)));
    assert!(orders.state().visible.is_empty());
}

#[test]
fn inconsistent_status_casing_is_normalized() {
    let backend = backend_with_orders(0);
    backend.respond_once(
        Method::Get,
        "/orders",
        200,
        json!({
            "orders": [
                {"order_id": 1, "order_date": "2024-02-01T00:00:00Z", "order_status": "Cancelled",
                 "total_amount": "12.00", "items": []},
                {"order_id": 2, "created_at": "2024-02-02T00:00:00Z", "status": "SHIPPED",
                 "total_amount": "8.50", "items": null}
            ],
            "statusCounts": [{"status": "cancelled", "count": 1}, {"status": "Shipped", "count": "1"}]
        }),
    );
    let mut orders = OrdersController::new(StoreClient::new(backend));
    block_on(orders.load_orders(None));
    let state = orders.state();
    assert_eq!(state.visible[0].status, OrderStatus::Canceled);
    assert_eq!(state.visible[1].status, OrderStatus::Shipped);
    assert!(state.visible[1].items_unavailable());
    assert_eq!(state.status_counts.get(&OrderStatus::Canceled), Some(&1));
}

#[test]
fn load_failure_keeps_an_error_for_retry() {
    let backend = backend_with_orders(0);
    backend.set_offline(true);
    let mut orders = OrdersController::new(StoreClient::new(backend.clone()));
    block_on(orders.load_orders(None));
    assert!(orders.state().error.is_some());
    assert!(!orders.state().loading);

    backend.set_offline(false);
    block_on(orders.load_orders(None));
    assert_eq!(orders.state().error, None);
}

#[test]
fn accordion_expands_one_order_at_a_time() {
    let backend = backend_with_orders(2);
    let mut orders = OrdersController::new(StoreClient::new(backend));
    block_on(orders.load_orders(None));
    let a = orders.state().visible[0].order_id;
    let b = orders.state().visible[1].order_id;
    orders.toggle_expand(a);
    orders.toggle_expand(b);
    assert!(orders.state().is_expanded(b));
    assert!(!orders.state().is_expanded(a));
    assert!(!orders.state().visible[0].items_unavailable());
}
