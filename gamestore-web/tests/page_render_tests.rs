use futures::executor::block_on;
use gamestore_core::{
    CartEvent, CartLine, CartSnapshot, CartState, CatalogQuery, CatalogState, FormState, Game,
    GameLookup, LoginForm, Money, Order, OrderItem, OrderListing, OrderStatus, OrdersEvent,
    OrdersState, PaymentMethod, SignupForm,
};
use gamestore_web::pages::{
    cart::{CartPage, CartPageProps},
    catalog::{CatalogPage, CatalogPageProps},
    game_detail::{GameDetailPage, GameDetailPageProps},
    login::{LoginPage, LoginPageProps},
    not_found::{NotFound, Props as NotFoundProps},
    orders::{OrdersPage, OrdersPageProps},
    signup::{SignupPage, SignupPageProps},
};
use yew::{AttrValue, Callback, LocalServerRenderer};

fn game(id: i64, title: &str, cents: i64, stock: u32) -> Game {
    Game {
        game_id: id,
        title: title.to_string(),
        description: String::from("A game."),
        price: Money::from_cents(cents),
        genre: String::from("RPG"),
        platform: String::from("PC"),
        stock_quantity: stock,
        gameicon: None,
        created_at: None,
    }
}

fn line(cart_id: i64, title: &str, cents: i64, quantity: u32) -> CartLine {
    CartLine {
        cart_id,
        game_id: cart_id + 100,
        title: title.to_string(),
        price: Money::from_cents(cents),
        quantity,
        gameicon: None,
    }
}

fn order(id: i64, status: OrderStatus, items: Vec<OrderItem>) -> Order {
    Order {
        order_id: id,
        created_at: None,
        status,
        total_amount: Money::from_cents(4498),
        payment_method: Some(String::from("Credit Card")),
        items,
        username: None,
        email: None,
    }
}

fn cart_props(state: CartState) -> CartPageProps {
    CartPageProps {
        state,
        on_quantity: Callback::noop(),
        on_remove: Callback::noop(),
        on_checkout: Callback::noop(),
        on_cancel: Callback::noop(),
        on_payment: Callback::noop(),
        on_place_order: Callback::noop(),
        on_browse: Callback::noop(),
        on_retry: Callback::noop(),
    }
}

fn loaded_cart() -> CartState {
    let mut state = CartState::default();
    state.apply(CartEvent::Loaded(CartSnapshot {
        lines: vec![line(1, "Hades", 1999, 2), line(2, "Celeste", 500, 1)],
        item_count: 3,
    }));
    state
}

fn render_cart(state: CartState) -> String {
    block_on(LocalServerRenderer::<CartPage>::with_props(cart_props(state)).render())
}

#[test]
fn not_found_renders_defaults_and_overrides() {
    let props = NotFoundProps {
        title: AttrValue::from("Page not found"),
        message: AttrValue::from("The page you are looking for does not exist."),
        on_go_home: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("Page not found"));
    assert!(html.contains("Back to the store"));
}

#[test]
fn login_page_shows_flash_banner_and_field_errors() {
    let mut form = FormState::new(LoginForm::default());
    assert!(form.begin_submit().is_none());
    let props = LoginPageProps {
        form: form.clone(),
        flash: Some(AttrValue::from("Account created. Please log in.")),
        on_input: Callback::noop(),
        on_submit: Callback::noop(),
        on_signup: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LoginPage>::with_props(props).render());
    assert!(html.contains("Account created. Please log in."));
    assert!(html.contains("Email is required"));
    assert!(html.contains("Password is required"));

    form.fail(String::from("Invalid credentials"));
    let props = LoginPageProps {
        form,
        flash: None,
        on_input: Callback::noop(),
        on_submit: Callback::noop(),
        on_signup: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LoginPage>::with_props(props).render());
    assert!(html.contains("form-banner"));
    assert!(html.contains("Invalid credentials"));
}

#[test]
fn signup_page_renders_its_fields() {
    let props = SignupPageProps {
        form: FormState::new(SignupForm::default()),
        on_input: Callback::noop(),
        on_submit: Callback::noop(),
        on_login: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<SignupPage>::with_props(props).render());
    assert!(html.contains("name=\"username\""));
    assert!(html.contains("name=\"email\""));
    assert!(html.contains("name=\"password\""));
}

#[test]
fn catalog_renders_cards_free_prices_and_stock() {
    let mut state = CatalogState::default();
    state.set_genres(vec![String::from("RPG"), String::from("Roguelike")]);
    state.begin_load(CatalogQuery::All);
    state.finish_load(Ok(vec![
        game(1, "Hades", 2499, 3),
        game(2, "Stardew Valley", 0, 9),
        game(3, "Disco Elysium", 3999, 0),
    ]));
    let props = CatalogPageProps {
        state,
        search_term: AttrValue::default(),
        on_search: Callback::noop(),
        on_genre: Callback::noop(),
        on_sort: Callback::noop(),
        on_add: Callback::noop(),
        on_open: Callback::noop(),
        on_retry: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<CatalogPage>::with_props(props).render());
    assert!(html.contains("Hades"));
    assert!(html.contains("$24.99"));
    assert!(html.contains("Free"));
    assert!(html.contains("Out of stock"));
    assert!(html.contains("Roguelike"));
    assert!(html.contains("All"));
}

#[test]
fn catalog_shows_empty_and_error_states() {
    let mut state = CatalogState::default();
    state.finish_load(Ok(Vec::new()));
    let props = CatalogPageProps {
        state: state.clone(),
        search_term: AttrValue::from("zzz"),
        on_search: Callback::noop(),
        on_genre: Callback::noop(),
        on_sort: Callback::noop(),
        on_add: Callback::noop(),
        on_open: Callback::noop(),
        on_retry: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<CatalogPage>::with_props(props.clone()).render());
    assert!(html.contains("No games match your search."));

    state.finish_load(Err(String::from("Failed to load games")));
    let props = CatalogPageProps { state, ..props };
    let html = block_on(LocalServerRenderer::<CatalogPage>::with_props(props).render());
    assert!(html.contains("Failed to load games"));
    assert!(html.contains("Try again"));
}

#[test]
fn game_detail_covers_found_missing_and_failed() {
    let render = |lookup: Option<GameLookup>| {
        let props = GameDetailPageProps {
            lookup,
            adding: false,
            on_add: Callback::noop(),
            on_back: Callback::noop(),
            on_retry: Callback::noop(),
        };
        block_on(LocalServerRenderer::<GameDetailPage>::with_props(props).render())
    };
    let html = render(Some(GameLookup::Found(game(1, "Hades", 2499, 3))));
    assert!(html.contains("Hades"));
    assert!(html.contains("3 in stock"));
    assert!(html.contains("Add to cart"));

    let html = render(Some(GameLookup::NotFound));
    assert!(html.contains("Game not found"));

    let html = render(Some(GameLookup::Failed(String::from("Failed to load game details"))));
    assert!(html.contains("Failed to load game details"));

    let html = render(None);
    assert!(html.contains("Loading game"));
}

#[test]
fn cart_lists_lines_with_the_client_side_total() {
    let html = render_cart(loaded_cart());
    assert!(html.contains("Hades"));
    assert!(html.contains("cart-total"));
    assert!(html.contains("$44.98"));
    assert!(html.contains("Proceed to checkout"));
}

#[test]
fn cart_payment_step_offers_every_method() {
    let mut state = loaded_cart();
    state.apply(CartEvent::CheckoutStarted);
    state.apply(CartEvent::PaymentSelected(PaymentMethod::GiftCard));
    let html = render_cart(state);
    for method in PaymentMethod::ALL {
        assert!(html.contains(method.label()));
    }
    assert!(html.contains("Back to cart"));
    assert!(html.contains("Place order"));
}

#[test]
fn cart_confirmation_and_empty_states() {
    let mut state = loaded_cart();
    state.apply(CartEvent::CheckoutStarted);
    state.apply(CartEvent::OrderStarted);
    state.apply(CartEvent::OrderPlaced(order(42, OrderStatus::Pending, Vec::new())));
    let html = render_cart(state);
    assert!(html.contains("Thank you for your order!"));
    assert!(html.contains("Order #42"));

    let html = render_cart(CartState {
        loading: false,
        ..CartState::default()
    });
    assert!(html.contains("Your cart is empty."));
}

#[test]
fn cart_load_failure_offers_retry() {
    let mut state = CartState::default();
    state.apply(CartEvent::LoadFailed(String::from("Failed to load your cart")));
    let html = render_cart(state);
    assert!(html.contains("Failed to load your cart"));
    assert!(html.contains("Try again"));
}

fn orders_props(state: OrdersState) -> OrdersPageProps {
    OrdersPageProps {
        state,
        on_filter: Callback::noop(),
        on_search: Callback::noop(),
        on_toggle: Callback::noop(),
        on_retry: Callback::noop(),
    }
}

#[test]
fn orders_render_cards_chips_and_unavailable_items() {
    let mut state = OrdersState::default();
    state.apply(OrdersEvent::Loaded(OrderListing {
        orders: vec![
            order(7, OrderStatus::Shipped, Vec::new()),
            order(
                8,
                OrderStatus::Pending,
                vec![OrderItem {
                    order_item_id: 1,
                    title: Some(String::from("Hades")),
                    price: Money::from_cents(1999),
                    quantity: 1,
                    subtotal: Money::from_cents(1999),
                }],
            ),
        ],
        status_counts: Default::default(),
    }));
    state.apply(OrdersEvent::Toggled(7));
    let html = block_on(LocalServerRenderer::<OrdersPage>::with_props(orders_props(state)).render());
    assert!(html.contains("Order #7"));
    assert!(html.contains("Order #8"));
    assert!(html.contains("Items no longer available"));
    assert!(html.contains("Shipped"));
    assert!(html.contains("status-chip"));
}

#[test]
fn orders_highlight_and_empty_messages() {
    let mut state = OrdersState::default();
    state.apply(OrdersEvent::Highlight(order(42, OrderStatus::Pending, Vec::new())));
    state.apply(OrdersEvent::Loaded(OrderListing::default()));
    let html = block_on(LocalServerRenderer::<OrdersPage>::with_props(orders_props(state.clone())).render());
    assert!(html.contains("Order #42 placed: $44.98"));
    assert!(html.contains("You have no orders yet."));

    state.apply(OrdersEvent::TermChanged(String::from("999")));
    state.apply(OrdersEvent::SearchResults(Vec::new()));
    let html = block_on(LocalServerRenderer::<OrdersPage>::with_props(orders_props(state)).render());
    assert!(html.contains("No orders match your search."));
}
