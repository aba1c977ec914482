use futures::executor::block_on;
use gamestore_core::{
    AdminList, AdminUser, ApiError, Game, GameForm, InventoryRow, Money, Order, OrderStatus,
    OrderStatusForm, Role, StockDrafts, UserForm,
};
use gamestore_web::pages::admin::games::{AdminGamesPage, AdminGamesPageProps};
use gamestore_web::pages::admin::inventory::{AdminInventoryPage, AdminInventoryPageProps};
use gamestore_web::pages::admin::orders::{AdminOrdersPage, AdminOrdersPageProps};
use gamestore_web::pages::admin::users::{AdminUsersPage, AdminUsersPageProps};
use gamestore_web::pages::admin::{Editor, TableActions};
use yew::{Callback, LocalServerRenderer};

fn actions() -> TableActions {
    TableActions {
        on_term: Callback::noop(),
        on_category: Callback::noop(),
        on_retry: Callback::noop(),
    }
}

fn game(id: i64, title: &str, genre: &str) -> Game {
    Game {
        game_id: id,
        title: title.to_string(),
        description: String::new(),
        price: Money::from_cents(1999),
        genre: genre.to_string(),
        platform: String::from("PC"),
        stock_quantity: 7,
        gameicon: None,
        created_at: None,
    }
}

fn games_props(list: AdminList<Game>, editor: Option<Editor<GameForm>>) -> AdminGamesPageProps {
    AdminGamesPageProps {
        list,
        editor,
        actions: actions(),
        on_new: Callback::noop(),
        on_edit: Callback::noop(),
        on_delete: Callback::noop(),
        on_confirm_delete: Callback::noop(),
        on_cancel_delete: Callback::noop(),
        on_form_input: Callback::noop(),
        on_form_submit: Callback::noop(),
        on_form_cancel: Callback::noop(),
    }
}

fn render_games(props: AdminGamesPageProps) -> String {
    block_on(LocalServerRenderer::<AdminGamesPage>::with_props(props).render())
}

#[test]
fn games_table_lists_rows_and_genre_filter() {
    let mut list = AdminList::default();
    list.finish_load(Ok(vec![game(1, "Hades", "Roguelike"), game(2, "Celeste", "Platformer")]));
    let html = render_games(games_props(list, None));
    assert!(html.contains("Hades"));
    assert!(html.contains("Celeste"));
    assert!(html.contains("All genres"));
    assert!(html.contains("Platformer"));
    assert!(html.contains("Add game"));
    assert!(!html.contains("modal-open"));
}

#[test]
fn games_editor_shows_mode_errors_and_banner() {
    let mut list = AdminList::default();
    list.finish_load(Ok(vec![game(1, "Hades", "Roguelike")]));

    let mut editor = Editor::<GameForm>::create();
    assert!(editor.form.begin_submit().is_none());
    let html = render_games(games_props(list.clone(), Some(editor)));
    assert!(html.contains("modal-open"));
    assert!(html.contains("field-error"));

    let mut editor = Editor::edit(1, GameForm::from_game(&game(1, "Hades", "Roguelike")));
    editor.form.fail(String::from("Title already exists"));
    let html = render_games(games_props(list, Some(editor)));
    assert!(html.contains("Edit game"));
    assert!(html.contains("Title already exists"));
}

#[test]
fn games_delete_asks_for_confirmation() {
    let mut list = AdminList::default();
    list.finish_load(Ok(vec![game(1, "Hades", "Roguelike")]));
    list.request_delete(1);
    let html = render_games(games_props(list, None));
    assert!(html.contains("Delete game"));
    assert!(html.contains("This cannot be undone."));
}

#[test]
fn games_list_failure_and_empty_filter() {
    let mut list = AdminList::<Game>::default();
    list.finish_load(Err(ApiError::Transport(String::from("refused"))));
    let html = render_games(games_props(list, None));
    assert!(html.contains("Unable to reach the server."));
    assert!(html.contains("Try again"));

    let mut list = AdminList::default();
    list.finish_load(Ok(vec![game(1, "Hades", "Roguelike")]));
    list.set_term("zelda");
    let html = render_games(games_props(list, None));
    assert!(html.contains("No games found."));
}

#[test]
fn users_editor_relaxes_password_when_editing() {
    let user = AdminUser {
        user_id: 3,
        username: String::from("kai"),
        email: String::from("kai@example.com"),
        role: Role::Admin,
        created_at: None,
    };
    let mut list = AdminList::default();
    list.finish_load(Ok(vec![user.clone()]));
    let props = AdminUsersPageProps {
        list,
        editor: Some(Editor::edit(3, UserForm::from_user(&user))),
        actions: actions(),
        on_new: Callback::noop(),
        on_edit: Callback::noop(),
        on_delete: Callback::noop(),
        on_confirm_delete: Callback::noop(),
        on_cancel_delete: Callback::noop(),
        on_form_input: Callback::noop(),
        on_form_submit: Callback::noop(),
        on_form_cancel: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<AdminUsersPage>::with_props(props).render());
    assert!(html.contains("kai@example.com"));
    assert!(html.contains("Edit user"));
    assert!(html.contains("New password (optional)"));
}

#[test]
fn orders_table_shows_customer_and_status_editor() {
    let order = Order {
        order_id: 12,
        created_at: None,
        status: OrderStatus::Processing,
        total_amount: Money::from_cents(5998),
        payment_method: None,
        items: Vec::new(),
        username: Some(String::from("pat")),
        email: Some(String::from("pat@example.com")),
    };
    let mut list = AdminList::default();
    list.finish_load(Ok(vec![order.clone()]));
    let props = AdminOrdersPageProps {
        list,
        editor: Some(Editor::edit(12, OrderStatusForm::from_order(&order))),
        actions: actions(),
        on_edit: Callback::noop(),
        on_delete: Callback::noop(),
        on_confirm_delete: Callback::noop(),
        on_cancel_delete: Callback::noop(),
        on_form_input: Callback::noop(),
        on_form_submit: Callback::noop(),
        on_form_cancel: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<AdminOrdersPage>::with_props(props).render());
    assert!(html.contains("#12"));
    assert!(html.contains("pat@example.com"));
    assert!(html.contains("$59.98"));
    assert!(html.contains("Update order #12"));
    for status in OrderStatus::KNOWN {
        assert!(html.contains(&status.label()));
    }
}

#[test]
fn inventory_rows_reflect_drafts_and_levels() {
    let rows = vec![
        InventoryRow {
            game_id: 1,
            title: String::from("Hades"),
            platform: String::from("PC"),
            genre: String::from("Roguelike"),
            stock_quantity: 0,
        },
        InventoryRow {
            game_id: 2,
            title: String::from("Celeste"),
            platform: String::from("Switch"),
            genre: String::from("Platformer"),
            stock_quantity: 3,
        },
    ];
    let mut drafts = StockDrafts::default();
    drafts.set_input(&rows[1], "12");
    let mut list = AdminList::default();
    list.finish_load(Ok(rows));
    let props = AdminInventoryPageProps {
        list,
        drafts,
        actions: actions(),
        on_increment: Callback::noop(),
        on_decrement: Callback::noop(),
        on_input: Callback::noop(),
        on_save: Callback::noop(),
        on_discard: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<AdminInventoryPage>::with_props(props).render());
    assert!(html.contains("Out of stock"));
    assert!(html.contains("Low stock"));
    assert!(html.contains("value=\"12\""));
    assert!(html.contains("bg-base-200"));
}
