use futures::executor::block_on;
use gamestore_core::admin::games::save_game;
use gamestore_core::admin::inventory::save_stock;
use gamestore_core::admin::orders::save_order_status;
use gamestore_core::admin::users::save_user;
use gamestore_core::mock::FakeBackend;
use gamestore_core::{
    AdminList, AdminUser, FormModel, FormState, Game, GameForm, InventoryRow, Method, Order,
    OrderStatus, Reconcile, Role, Settled, StockDrafts, StoreClient, UserForm,
};

fn admin_backend() -> (FakeBackend, StoreClient<FakeBackend>) {
    let backend = FakeBackend::seeded();
    backend.sign_in_as("admin@example.com");
    let client = StoreClient::new(backend.clone());
    (backend, client)
}

#[test]
fn delete_waits_for_confirmation() {
    let (backend, client) = admin_backend();
    let mut games: AdminList<Game> = AdminList::default();
    block_on(games.load_with(client.admin_games()));
    assert_eq!(games.items.len(), 4);
    let target = games.items[0].game_id;
    backend.clear_log();

    games.request_delete(target);
    assert!(backend.requests().is_empty());
    games.cancel_delete();
    let settled = block_on(games.confirm_delete(|id| client.delete_game(id), || client.admin_games()));
    assert_eq!(settled, None);
    assert!(backend.requests().is_empty());

    games.request_delete(target);
    let settled = block_on(games.confirm_delete(|id| client.delete_game(id), || client.admin_games()));
    assert_eq!(settled, Some(Settled::Patched));
    assert_eq!(backend.calls(Method::Delete, &format!("/admin/games/{target}")), 1);
    assert!(games.get(target).is_none());
    assert_eq!(games.pending_delete, None);
}

#[test]
fn create_prepends_and_update_replaces() {
    let (backend, client) = admin_backend();
    let mut games: AdminList<Game> = AdminList::default();
    block_on(games.load_with(client.admin_games()));

    let mut form = FormState::new(GameForm::default());
    for (field, value) in [
        ("title", "Hollow Knight"),
        ("price", "14.99"),
        ("genre", "Metroidvania"),
        ("platform", "PC"),
        ("stock_quantity", "7"),
    ] {
        form.edit(field, value.to_string());
    }
    let payload = form.begin_submit().expect("valid form");
    let settled = block_on(games.commit(None, save_game(&client, None, &payload), || {
        client.admin_games()
    }));
    assert_eq!(settled, Settled::Patched);
    assert_eq!(games.items[0].title, "Hollow Knight");
    let created = games.items[0].game_id;

    let mut edit = FormState::new(GameForm::from_game(&games.items[0]));
    edit.edit("price", String::from("9.99"));
    let payload = edit.begin_submit().expect("valid edit");
    block_on(games.commit(
        Some(created),
        save_game(&client, Some(created), &payload),
        || client.admin_games(),
    ));
    assert_eq!(games.get(created).map(|g| g.price.to_decimal_string()), Some(String::from("9.99")));
    assert_eq!(games.items.len(), 5);
    assert_eq!(backend.calls(Method::Get, "/admin/games"), 1);
}

#[test]
fn terse_backend_forces_a_reload() {
    let (backend, client) = admin_backend();
    backend.set_terse_mutations(true);
    let mut users: AdminList<AdminUser> = AdminList::default();
    block_on(users.load_with(client.admin_users()));

    let form = UserForm {
        username: String::from("newbie"),
        email: String::from("newbie@example.com"),
        password: String::from("secret"),
        role: String::from("user"),
        editing: false,
    };
    let payload = form.validate().unwrap();
    let settled = block_on(users.commit(None, save_user(&client, None, &payload), || {
        client.admin_users()
    }));
    assert_eq!(settled, Settled::Reloaded);
    assert_eq!(backend.calls(Method::Get, "/admin/users"), 2);
    assert!(users.items.iter().any(|u| u.username == "newbie"));
}

#[test]
fn reload_strategy_refetches_after_delete() {
    let (backend, client) = admin_backend();
    let mut users = AdminList::<AdminUser>::with_reconcile(Reconcile::Reload);
    block_on(users.load_with(client.admin_users()));
    let shopper = users
        .items
        .iter()
        .find(|u| u.role == Role::User)
        .map(|u| u.user_id)
        .unwrap();
    users.request_delete(shopper);
    let settled =
        block_on(users.confirm_delete(|id| client.delete_user(id), || client.admin_users()));
    assert_eq!(settled, Some(Settled::Reloaded));
    assert_eq!(backend.calls(Method::Get, "/admin/users"), 2);
    assert_eq!(users.items.len(), 1);
}

#[test]
fn server_rejection_is_a_banner_and_keeps_rows() {
    let (_backend, client) = admin_backend();
    let mut users: AdminList<AdminUser> = AdminList::default();
    block_on(users.load_with(client.admin_users()));
    let mut form = FormState::new(UserForm::default());
    form.edit("username", String::from("dupe"));
    form.edit("email", String::from("shopper@example.com"));
    form.edit("password", String::from("pw"));
    let payload = form.begin_submit().unwrap();
    let settled = block_on(users.commit(None, save_user(&client, None, &payload), || {
        client.admin_users()
    }));
    let message = match settled {
        Settled::Failed(message) => message,
        other => panic!("expected failure, got {other:?}"),
    };
    form.fail(message);
    assert_eq!(form.banner.as_deref(), Some("Email already registered"));
    assert!(form.errors.is_empty());
    assert_eq!(users.items.len(), 2);
}

#[test]
fn order_status_update_patches_the_row() {
    let (backend, client) = admin_backend();
    backend.sign_in_as("shopper@example.com");
    let hades = backend.game_id("Hades").unwrap();
    block_on(client.add_to_cart(hades, 1)).unwrap();
    block_on(client.create_order(gamestore_core::PaymentMethod::GiftCard)).unwrap();
    backend.sign_in_as("admin@example.com");

    let mut orders: AdminList<Order> = AdminList::default();
    block_on(orders.load_with(client.admin_orders()));
    let order = orders.items[0].clone();
    block_on(orders.commit(
        Some(order.order_id),
        save_order_status(&client, &order, &OrderStatus::Shipped),
        || client.admin_orders(),
    ));
    assert_eq!(orders.items[0].status, OrderStatus::Shipped);
    let sent = backend.requests().pop().unwrap();
    assert_eq!(sent.body, Some(serde_json::json!({"status": "shipped"})));

    orders.set_category(Some(String::from("Shipped")));
    assert_eq!(orders.visible().len(), 1);
}

#[test]
fn inventory_drafts_send_only_on_save() {
    let (backend, client) = admin_backend();
    let mut rows: AdminList<InventoryRow> = AdminList::default();
    block_on(rows.load_with(client.inventory()));
    let row = rows.items[1].clone();
    backend.clear_log();

    let mut drafts = StockDrafts::default();
    drafts.increment(&row);
    drafts.increment(&row);
    drafts.discard(row.game_id);
    drafts.set_input(&row, "42");
    assert!(backend.requests().is_empty());

    let value = drafts.value(&row);
    block_on(rows.commit(
        Some(row.game_id),
        save_stock(&client, &row, value),
        || client.inventory(),
    ));
    drafts.discard(row.game_id);
    assert_eq!(backend.stock(row.game_id), Some(42));
    assert_eq!(rows.get(row.game_id).map(|r| r.stock_quantity), Some(42));
    assert_eq!(backend.requests().len(), 1);
}
