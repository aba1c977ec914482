mod admin;
mod auth;
mod cart;
mod catalog;
mod orders;

pub use admin::{AdminGamesScreen, AdminInventoryScreen, AdminOrdersScreen, AdminUsersScreen};
pub use auth::{LoginScreen, SignupScreen};
pub use cart::CartScreen;
pub use catalog::{CatalogScreen, GameScreen};
pub use orders::OrdersScreen;

use crate::pages::not_found::NotFound;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundScreen)]
pub fn not_found_screen() -> Html {
    let navigator = use_navigator();
    let go_home = Callback::from(move |()| {
        if let Some(nav) = &navigator {
            nav.push(&Route::Home);
        }
    });
    html! { <NotFound on_go_home={go_home} /> }
}
