use crate::router::Route;
use gamestore_core::SessionUser;
use yew::prelude::*;
use yew_router::Routable;

#[derive(Properties, PartialEq, Clone)]
pub struct HeaderProps {
    pub user: Option<SessionUser>,
    #[prop_or_default]
    pub cart_count: u32,
    #[prop_or_default]
    pub current: Option<Route>,
    pub on_navigate: Callback<Route>,
    pub on_logout: Callback<()>,
}

/// Anchor that navigates in-app; `href` keeps open-in-new-tab working.
#[must_use]
pub fn nav_link(route: Route, label: &str, current: Option<&Route>, on_navigate: &Callback<Route>) -> Html {
    let active = current == Some(&route);
    let href = crate::paths::asset_path(&route.to_path());
    let onclick = {
        let cb = on_navigate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(route.clone());
        })
    };
    html! {
        <a href={href} class={classes!("btn", "btn-ghost", "btn-sm", active.then_some("btn-active"))}
            aria-current={active.then_some("page")} onclick={onclick}>
            { label.to_string() }
        </a>
    }
}

#[function_component(Header)]
pub fn header(p: &HeaderProps) -> Html {
    let current = p.current.as_ref();
    let logout = {
        let cb = p.on_logout.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let links = match &p.user {
        Some(user) if user.is_admin() => html! {
            <>
                { nav_link(Route::AdminGames, "Games", current, &p.on_navigate) }
                { nav_link(Route::AdminUsers, "Users", current, &p.on_navigate) }
                { nav_link(Route::AdminOrders, "Orders", current, &p.on_navigate) }
                { nav_link(Route::AdminInventory, "Inventory", current, &p.on_navigate) }
            </>
        },
        Some(_) => html! {
            <>
                { nav_link(Route::Catalog, "Store", current, &p.on_navigate) }
                { nav_link(Route::Orders, "My Orders", current, &p.on_navigate) }
                <span class="indicator">
                    if p.cart_count > 0 {
                        <span class="indicator-item badge badge-primary cart-count">{ p.cart_count }</span>
                    }
                    { nav_link(Route::Cart, "Cart", current, &p.on_navigate) }
                </span>
            </>
        },
        None => html! {
            <>
                { nav_link(Route::Login, "Log in", current, &p.on_navigate) }
                { nav_link(Route::Signup, "Sign up", current, &p.on_navigate) }
            </>
        },
    };
    html! {
        <header role="banner" class="navbar bg-base-200">
            <div class="navbar-start">
                <span class="text-xl font-bold">{"Game Store"}</span>
            </div>
            <nav aria-label="Main" class="navbar-center gap-1">{ links }</nav>
            <div class="navbar-end gap-2">
                { p.user.as_ref().map(|user| html! {
                    <>
                        <span class="text-sm">{ user.username.clone() }</span>
                        <button type="button" class="btn btn-outline btn-sm" onclick={logout}>{"Log out"}</button>
                    </>
                }).unwrap_or_default() }
            </div>
        </header>
    }
}
