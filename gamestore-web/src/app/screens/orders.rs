use crate::app::context::ScreenProps;
use crate::app::hooks::{settle, use_debounce, use_view_epoch};
use crate::pages::orders::OrdersPage;
use crate::state::OrdersModel;
use gamestore_core::constants::SEARCH_DEBOUNCE_MS;
use gamestore_core::orders::{fetch_orders, run_search};
use gamestore_core::{Order, OrderStatus, OrdersEvent, SearchPlan, plan_search};
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(OrdersScreen)]
pub fn orders_screen(props: &ScreenProps) -> Html {
    let client = Rc::clone(&props.ctx.client);
    let location = use_location();
    let model = use_reducer(OrdersModel::default);
    let epoch = use_view_epoch();
    let debounce = use_debounce();

    let load = {
        let client = Rc::clone(&client);
        let dispatcher = model.dispatcher();
        let epoch = Rc::clone(&epoch);
        let debounce = Rc::clone(&debounce);
        Callback::from(move |filter: Option<OrderStatus>| {
            debounce.cancel();
            let ticket = epoch.advance();
            dispatcher.dispatch(OrdersEvent::LoadStarted(filter.clone()));
            let client = Rc::clone(&client);
            let dispatcher = dispatcher.clone();
            let epoch = Rc::clone(&epoch);
            spawn_local(async move {
                let event = fetch_orders(&client, filter.as_ref()).await;
                if let Some(event) = epoch.accept(ticket, event) {
                    dispatcher.dispatch(event);
                }
            });
        })
    };

    {
        let dispatcher = model.dispatcher();
        let placed = location.as_ref().and_then(|loc| loc.state::<Order>());
        let load = load.clone();
        use_effect_with((), move |_| {
            if let Some(order) = placed {
                dispatcher.dispatch(OrdersEvent::Highlight((*order).clone()));
            }
            load.emit(None);
        });
    }

    let on_search = {
        let dispatcher = model.dispatcher();
        let epoch = Rc::clone(&epoch);
        Callback::from(move |term: String| {
            dispatcher.dispatch(OrdersEvent::TermChanged(term.clone()));
            let ticket = debounce.touch();
            let client = Rc::clone(&client);
            let dispatcher = dispatcher.clone();
            let debounce = Rc::clone(&debounce);
            let epoch = Rc::clone(&epoch);
            spawn_local(async move {
                if !settle(&debounce, ticket, SEARCH_DEBOUNCE_MS).await {
                    return;
                }
                let view = epoch.ticket();
                if matches!(plan_search(&term), SearchPlan::ById(_)) {
                    dispatcher.dispatch(OrdersEvent::SearchStarted);
                }
                let event = run_search(&client, &term).await;
                if debounce.should_fire(ticket) {
                    if let Some(event) = epoch.accept(view, event) {
                        dispatcher.dispatch(event);
                    }
                }
            });
        })
    };
    let on_toggle = {
        let dispatcher = model.dispatcher();
        Callback::from(move |order_id: i64| dispatcher.dispatch(OrdersEvent::Toggled(order_id)))
    };
    let on_retry = {
        let load = load.clone();
        let filter = model.0.filter.clone();
        Callback::from(move |()| load.emit(filter.clone()))
    };

    html! {
        <OrdersPage state={model.0.clone()} on_filter={load} on_search={on_search}
            on_toggle={on_toggle} on_retry={on_retry} />
    }
}
