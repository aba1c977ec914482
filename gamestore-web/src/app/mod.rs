//! Browser shell: router, session guard, and the screens that own state
//! and talk to the backend. Only the route mapping is platform-neutral.
#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

#[cfg(target_arch = "wasm32")]
pub mod context;
pub mod guard;
#[cfg(target_arch = "wasm32")]
pub mod hooks;
#[cfg(target_arch = "wasm32")]
pub mod screens;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
fn switch(route: &Route, ctx: &context::AppContext) -> Html {
    use screens::*;
    let ctx = ctx.clone();
    match route {
        Route::Login => html! { <LoginScreen ctx={ctx} /> },
        Route::Signup => html! { <SignupScreen ctx={ctx} /> },
        Route::Catalog => html! { <CatalogScreen ctx={ctx} /> },
        Route::GameDetail { id } => html! { <GameScreen ctx={ctx} id={*id} /> },
        Route::Cart => html! { <CartScreen ctx={ctx} /> },
        Route::Orders => html! { <OrdersScreen ctx={ctx} /> },
        Route::AdminGames => html! { <AdminGamesScreen ctx={ctx} /> },
        Route::AdminUsers => html! { <AdminUsersScreen ctx={ctx} /> },
        Route::AdminOrders => html! { <AdminOrdersScreen ctx={ctx} /> },
        Route::AdminInventory => html! { <AdminInventoryScreen ctx={ctx} /> },
        Route::Home | Route::NotFound => html! { <NotFoundScreen /> },
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    use gamestore_core::{GuardOutcome, RouteAccess, check_access, sign_out};

    let ctx = context::use_app_context();
    let navigator = use_navigator();
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    let guard_epoch = hooks::use_view_epoch();
    let verdict = use_state(|| None::<(Route, GuardOutcome)>);

    {
        let ctx = ctx.clone();
        let verdict = verdict.clone();
        let guard_epoch = guard_epoch.clone();
        use_effect_with(route.clone(), move |route| {
            let ticket = guard_epoch.advance();
            let access = route.access();
            if access != RouteAccess::Public {
                let route = route.clone();
                yew::platform::spawn_local(async move {
                    let outcome = check_access(&ctx.client, &ctx.session, access).await;
                    if guard_epoch.accept(ticket, ()).is_some() {
                        ctx.user.set(ctx.session.read());
                        verdict.set(Some((route, outcome)));
                    }
                });
            }
        });
    }

    {
        let ctx = ctx.clone();
        use_effect_with((*ctx.user).clone(), move |_| ctx.refresh_cart_count());
    }

    let on_navigate = {
        let navigator = navigator.clone();
        Callback::from(move |target: Route| {
            if let Some(nav) = &navigator {
                nav.push(&target);
            }
        })
    };
    let on_logout = {
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        Callback::from(move |()| {
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                sign_out(&ctx.client, &ctx.session).await;
                ctx.user.set(None);
                ctx.cart_count.set(0);
                if let Some(nav) = navigator {
                    nav.push(&Route::entry());
                }
            });
        })
    };

    let body = if route.access() == RouteAccess::Public {
        switch(&route, &ctx)
    } else {
        match &*verdict {
            Some((checked, outcome)) if *checked == route => {
                match guard::redirect_for(&route, outcome, (*ctx.user).as_ref()) {
                    Some(target) => html! { <Redirect<Route> to={target} /> },
                    None => switch(&route, &ctx),
                }
            }
            _ => crate::pages::loading_spinner("Checking your session"),
        }
    };

    html! {
        <>
            <crate::components::Header
                user={(*ctx.user).clone()}
                cart_count={*ctx.cart_count}
                current={Some(route.clone())}
                on_navigate={on_navigate}
                on_logout={on_logout} />
            <main id="main" class="container mx-auto">{ body }</main>
        </>
    }
}
