use futures::executor::block_on;
use gamestore_core::{NoticeKind, Notices, OrderStatus, Role, SessionUser};
use gamestore_web::components::confirm_dialog::ConfirmDialogProps;
use gamestore_web::components::header::HeaderProps;
use gamestore_web::components::modal::ModalProps;
use gamestore_web::components::notice_stack::NoticeStackProps;
use gamestore_web::components::status_badge::StatusBadgeProps;
use gamestore_web::components::{ConfirmDialog, Header, Modal, NoticeStack, StatusBadge};
use gamestore_web::router::Route;
use yew::html::ChildrenRenderer;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn user(role: Role) -> SessionUser {
    SessionUser {
        id: 1,
        username: String::from("pat"),
        email: String::from("pat@example.com"),
        role,
    }
}

fn header(user: Option<SessionUser>, cart_count: u32) -> String {
    let props = HeaderProps {
        user,
        cart_count,
        current: Some(Route::Catalog),
        on_navigate: Callback::noop(),
        on_logout: Callback::noop(),
    };
    block_on(LocalServerRenderer::<Header>::with_props(props).render())
}

#[test]
fn header_links_follow_the_role() {
    let html = header(None, 0);
    assert!(html.contains("Log in"));
    assert!(html.contains("Sign up"));
    assert!(!html.contains("Log out"));

    let html = header(Some(user(Role::User)), 3);
    assert!(html.contains("My Orders"));
    assert!(html.contains("cart-count"));
    assert!(html.contains("Log out"));
    assert!(html.contains("aria-current=\"page\""));
    assert!(!html.contains("Inventory"));

    let html = header(Some(user(Role::Admin)), 0);
    assert!(html.contains("Inventory"));
    assert!(html.contains("/admin/users"));
    assert!(!html.contains("cart-count"));
}

#[test]
fn shopper_badge_is_hidden_at_zero() {
    let html = header(Some(user(Role::User)), 0);
    assert!(!html.contains("cart-count"));
}

#[test]
fn modal_renders_only_when_open() {
    let props = |open| ModalProps {
        open,
        title: AttrValue::from("Edit game"),
        actions: None,
        class: Default::default(),
        on_close: Callback::noop(),
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(props(true)).render());
    assert!(html.contains("modal-open"));
    assert!(html.contains("Edit game"));

    let html = block_on(LocalServerRenderer::<Modal>::with_props(props(false)).render());
    assert!(!html.contains("modal-box"));
}

#[test]
fn confirm_dialog_shows_message_and_label() {
    let props = ConfirmDialogProps {
        open: true,
        title: AttrValue::from("Delete user"),
        message: AttrValue::from("Delete kai? This cannot be undone."),
        confirm_label: AttrValue::from("Delete"),
        busy: false,
        on_confirm: Callback::noop(),
        on_cancel: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ConfirmDialog>::with_props(props).render());
    assert!(html.contains("Delete kai? This cannot be undone."));
    assert!(html.contains("btn-error"));
    assert!(html.contains("Cancel"));
}

#[test]
fn notice_stack_lists_each_notice() {
    let mut notices = Notices::default();
    notices.push(NoticeKind::Success, "Added to cart");
    notices.push(NoticeKind::Error, "Only 2 left in stock");
    let props = NoticeStackProps {
        notices,
        on_dismiss: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NoticeStack>::with_props(props).render());
    assert!(html.contains("Added to cart"));
    assert!(html.contains("Only 2 left in stock"));

    let props = NoticeStackProps {
        notices: Notices::default(),
        on_dismiss: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NoticeStack>::with_props(props).render());
    assert!(!html.contains("toast"));
}

#[test]
fn status_badges_carry_tone_and_icon() {
    let render = |status| {
        block_on(LocalServerRenderer::<StatusBadge>::with_props(StatusBadgeProps { status }).render())
    };
    let html = render(OrderStatus::Delivered);
    assert!(html.contains("Delivered"));
    assert!(html.contains("badge-success"));

    let html = render(OrderStatus::Canceled);
    assert!(html.contains("badge-error"));

    let html = render(OrderStatus::Other(String::from("on hold")));
    assert!(html.contains("badge-neutral"));
}
