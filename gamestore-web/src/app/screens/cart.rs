use crate::app::context::ScreenProps;
use crate::app::hooks::{use_notice_timer, use_view_epoch};
use crate::components::NoticeStack;
use crate::dom::{js_error_message, sleep_ms};
use crate::pages::cart::CartPage;
use crate::router::Route;
use crate::state::CartModel;
use gamestore_core::cart::{fetch_cart, submit_order, submit_quantity, submit_removal};
use gamestore_core::constants::ORDER_REDIRECT_DELAY_MS;
use gamestore_core::{CartEvent, PaymentMethod};
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(CartScreen)]
pub fn cart_screen(props: &ScreenProps) -> Html {
    let ctx = props.ctx.clone();
    let navigator = use_navigator();
    let model = use_reducer(CartModel::default);
    let epoch = use_view_epoch();
    let attempt = use_state(|| 0_u32);

    {
        let client = Rc::clone(&ctx.client);
        let dispatcher = model.dispatcher();
        let epoch = Rc::clone(&epoch);
        use_effect_with(*attempt, move |_| {
            let ticket = epoch.ticket();
            dispatcher.dispatch(CartEvent::LoadStarted);
            spawn_local(async move {
                let event = fetch_cart(&client).await;
                if let Some(event) = epoch.accept(ticket, event) {
                    dispatcher.dispatch(event);
                }
            });
        });
    }
    {
        let count = ctx.cart_count.clone();
        use_effect_with(model.0.item_count, move |items| {
            if *count != *items {
                count.set(*items);
            }
        });
    }
    use_notice_timer(model.0.notices.ids(), {
        let dispatcher = model.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(CartEvent::NoticeDismissed(id)))
    });

    let on_quantity = {
        let client = Rc::clone(&ctx.client);
        let model = model.clone();
        let epoch = Rc::clone(&epoch);
        Callback::from(move |(cart_id, quantity): (i64, u32)| {
            if !model.0.accepts_quantity(cart_id, quantity) {
                return;
            }
            let dispatcher = model.dispatcher();
            dispatcher.dispatch(CartEvent::LineStarted(cart_id));
            let client = Rc::clone(&client);
            let epoch = Rc::clone(&epoch);
            let ticket = epoch.ticket();
            spawn_local(async move {
                let event = submit_quantity(&client, cart_id, quantity).await;
                if let Some(event) = epoch.accept(ticket, event) {
                    dispatcher.dispatch(event);
                }
            });
        })
    };
    let on_remove = {
        let client = Rc::clone(&ctx.client);
        let model = model.clone();
        let epoch = Rc::clone(&epoch);
        Callback::from(move |cart_id: i64| {
            if !model.0.accepts_removal(cart_id) {
                return;
            }
            let dispatcher = model.dispatcher();
            dispatcher.dispatch(CartEvent::LineStarted(cart_id));
            let client = Rc::clone(&client);
            let epoch = Rc::clone(&epoch);
            let ticket = epoch.ticket();
            spawn_local(async move {
                let event = submit_removal(&client, cart_id).await;
                if let Some(event) = epoch.accept(ticket, event) {
                    dispatcher.dispatch(event);
                }
            });
        })
    };
    let on_checkout = {
        let dispatcher = model.dispatcher();
        Callback::from(move |()| dispatcher.dispatch(CartEvent::CheckoutStarted))
    };
    let on_cancel = {
        let dispatcher = model.dispatcher();
        Callback::from(move |()| dispatcher.dispatch(CartEvent::CheckoutCancelled))
    };
    let on_payment = {
        let dispatcher = model.dispatcher();
        Callback::from(move |method: PaymentMethod| {
            dispatcher.dispatch(CartEvent::PaymentSelected(method));
        })
    };
    let on_place_order = {
        let client = Rc::clone(&ctx.client);
        let count = ctx.cart_count.clone();
        let model = model.clone();
        let epoch = Rc::clone(&epoch);
        let navigator = navigator.clone();
        Callback::from(move |()| {
            if !model.0.can_place_order() {
                return;
            }
            let method = model.0.payment_method;
            let dispatcher = model.dispatcher();
            dispatcher.dispatch(CartEvent::OrderStarted);
            let client = Rc::clone(&client);
            let count = count.clone();
            let epoch = Rc::clone(&epoch);
            let ticket = epoch.ticket();
            let navigator = navigator.clone();
            spawn_local(async move {
                let event = submit_order(&client, method).await;
                let Some(event) = epoch.accept(ticket, event) else {
                    return;
                };
                let placed = match &event {
                    CartEvent::OrderPlaced(order) => Some(order.clone()),
                    _ => None,
                };
                dispatcher.dispatch(event);
                let Some(order) = placed else {
                    return;
                };
                count.set(0);
                if let Err(err) = sleep_ms(ORDER_REDIRECT_DELAY_MS).await {
                    log::warn!("redirect timer failed: {}", js_error_message(&err));
                }
                if epoch.is_current(ticket) {
                    if let Some(nav) = &navigator {
                        nav.push_with_state(&Route::Orders, order);
                    }
                }
            });
        })
    };
    let on_browse = Callback::from(move |()| {
        if let Some(nav) = &navigator {
            nav.push(&Route::Catalog);
        }
    });
    let on_retry = {
        let attempt = attempt.clone();
        Callback::from(move |()| attempt.set(*attempt + 1))
    };
    let on_dismiss = {
        let dispatcher = model.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(CartEvent::NoticeDismissed(id)))
    };

    html! {
        <>
            <CartPage state={model.0.clone()}
                on_quantity={on_quantity} on_remove={on_remove}
                on_checkout={on_checkout} on_cancel={on_cancel}
                on_payment={on_payment} on_place_order={on_place_order}
                on_browse={on_browse} on_retry={on_retry} />
            <NoticeStack notices={model.0.notices.clone()} on_dismiss={on_dismiss} />
        </>
    }
}
