use super::{error_panel, loading_spinner};
use crate::paths::game_image;
use gamestore_core::{CartLine, CartState, CheckoutPhase, PaymentMethod};
use yew::html::TargetCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CartPageProps {
    pub state: CartState,
    /// `(cart_id, quantity)`; the container drops values below one.
    pub on_quantity: Callback<(i64, u32)>,
    pub on_remove: Callback<i64>,
    pub on_checkout: Callback<()>,
    pub on_cancel: Callback<()>,
    pub on_payment: Callback<PaymentMethod>,
    pub on_place_order: Callback<()>,
    pub on_browse: Callback<()>,
    pub on_retry: Callback<()>,
}

fn emit_unit(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(()))
}

fn steps(phase: CheckoutPhase) -> Html {
    let all = [CheckoutPhase::Cart, CheckoutPhase::Payment, CheckoutPhase::Confirmation];
    html! {
        <ul class="steps w-full checkout-steps">
            { for all.iter().map(|step| {
                let done = step.step() <= phase.step();
                html! { <li class={classes!("step", done.then_some("step-primary"))}>{ step.label() }</li> }
            }) }
        </ul>
    }
}

fn line_row(line: &CartLine, busy: bool, editable: bool, props: &CartPageProps) -> Html {
    let id = line.cart_id;
    let qty = line.quantity;
    let dec = {
        let cb = props.on_quantity.clone();
        Callback::from(move |_| cb.emit((id, qty.saturating_sub(1))))
    };
    let inc = {
        let cb = props.on_quantity.clone();
        Callback::from(move |_| cb.emit((id, qty.saturating_add(1))))
    };
    let typed = {
        let cb = props.on_quantity.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                let value = input.value().trim().parse::<u32>().unwrap_or(0);
                cb.emit((id, value));
            }
        })
    };
    let remove = {
        let cb = props.on_remove.clone();
        Callback::from(move |_| cb.emit(id))
    };
    html! {
        <tr key={id.to_string()} class={classes!("cart-line", busy.then_some("opacity-60"))}>
            <td class="flex items-center gap-3">
                <img class="w-12 h-12 rounded" src={game_image(line.gameicon.as_deref())} alt="" />
                <span>{ line.title.clone() }</span>
            </td>
            <td>{ line.price.display_price() }</td>
            <td>
                if editable {
                    <div class="join">
                        <button type="button" class="btn btn-sm join-item" aria-label="Decrease quantity"
                            disabled={busy || qty <= 1} onclick={dec}>{"−"}</button>
                        <input type="number" min="1" class="input input-sm input-bordered join-item w-16"
                            aria-label="Quantity" value={qty.to_string()} disabled={busy} onchange={typed} />
                        <button type="button" class="btn btn-sm join-item" aria-label="Increase quantity"
                            disabled={busy} onclick={inc}>{"+"}</button>
                    </div>
                } else {
                    <span>{ qty }</span>
                }
            </td>
            <td class="line-subtotal">{ line.subtotal().to_string() }</td>
            <td>
                if editable {
                    <button type="button" class="btn btn-ghost btn-sm" disabled={busy} onclick={remove}>
                        { if busy { "Working…" } else { "Remove" } }
                    </button>
                }
            </td>
        </tr>
    }
}

fn lines_table(state: &CartState, editable: bool, props: &CartPageProps) -> Html {
    html! {
        <table class="table">
            <thead>
                <tr><th>{"Game"}</th><th>{"Price"}</th><th>{"Quantity"}</th><th>{"Subtotal"}</th><th></th></tr>
            </thead>
            <tbody>
                { for state.lines.iter().map(|line| line_row(line, state.is_busy(line.cart_id), editable, props)) }
            </tbody>
            <tfoot>
                <tr>
                    <th colspan="3">{"Total"}</th>
                    <th class="cart-total">{ state.total.to_string() }</th>
                    <th></th>
                </tr>
            </tfoot>
        </table>
    }
}

fn payment_picker(state: &CartState, props: &CartPageProps) -> Html {
    html! {
        <fieldset class="space-y-2 payment-methods" disabled={state.placing}>
            <legend class="font-semibold">{"Payment method"}</legend>
            { for PaymentMethod::ALL.iter().map(|method| {
                let method = *method;
                let cb = props.on_payment.clone();
                let onchange = Callback::from(move |_: Event| cb.emit(method));
                html! {
                    <label class="label cursor-pointer justify-start gap-2">
                        <input type="radio" name="payment" class="radio radio-primary"
                            value={method.label()} checked={state.payment_method == method} onchange={onchange} />
                        <span>{ method.label() }</span>
                    </label>
                }
            }) }
        </fieldset>
    }
}

#[function_component(CartPage)]
pub fn cart_page(props: &CartPageProps) -> Html {
    let state = &props.state;
    if let Some(error) = &state.error {
        return error_panel(error, &props.on_retry);
    }
    if state.loading && state.lines.is_empty() && state.phase == CheckoutPhase::Cart {
        return loading_spinner("Loading your cart");
    }

    let content = match state.phase {
        CheckoutPhase::Confirmation => {
            let order_line = state.placed_order.as_ref().map(|order| html! {
                <p class="placed-order">
                    { format!("Order #{} · {} · {}", order.order_id, order.total_amount, order.payment_method.clone().unwrap_or_default()) }
                </p>
            }).unwrap_or_default();
            html! {
                <div class="text-center space-y-3 confirmation">
                    <h2 class="text-2xl font-bold">{"Thank you for your order!"}</h2>
                    { order_line }
                    <p class="opacity-70">{"Taking you to your order history…"}</p>
                </div>
            }
        }
        _ if state.lines.is_empty() => html! {
            <div class="text-center space-y-3 empty-cart">
                <p>{"Your cart is empty."}</p>
                <button type="button" class="btn btn-primary" onclick={emit_unit(&props.on_browse)}>{"Browse games"}</button>
            </div>
        },
        CheckoutPhase::Cart => html! {
            <>
                { lines_table(state, true, props) }
                <div class="flex justify-end">
                    <button type="button" class="btn btn-primary" onclick={emit_unit(&props.on_checkout)}>
                        {"Proceed to checkout"}
                    </button>
                </div>
            </>
        },
        CheckoutPhase::Payment => html! {
            <>
                { lines_table(state, false, props) }
                { payment_picker(state, props) }
                <div class="flex justify-between">
                    <button type="button" class="btn btn-ghost" disabled={state.placing}
                        onclick={emit_unit(&props.on_cancel)}>{"Back to cart"}</button>
                    <button type="button" class="btn btn-primary" disabled={!state.can_place_order()}
                        onclick={emit_unit(&props.on_place_order)}>
                        { if state.placing { "Placing order…" } else { "Place order" } }
                    </button>
                </div>
            </>
        },
    };

    html! {
        <section class="cart p-4 space-y-4">
            <h1 class="text-2xl font-bold">{"Your cart"}</h1>
            { steps(state.phase) }
            { content }
        </section>
    }
}
