use super::{error_panel, loading_spinner};
use crate::components::StatusBadge;
use gamestore_core::{Order, OrderStatus, OrdersState};
use yew::html::TargetCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct OrdersPageProps {
    pub state: OrdersState,
    pub on_filter: Callback<Option<OrderStatus>>,
    /// Raw keystrokes; the container debounces them.
    pub on_search: Callback<String>,
    pub on_toggle: Callback<i64>,
    pub on_retry: Callback<()>,
}

fn order_items(order: &Order) -> Html {
    if order.items_unavailable() {
        return html! { <p class="italic opacity-70 items-unavailable">{"Items no longer available"}</p> };
    }
    html! {
        <table class="table table-sm">
            <thead><tr><th>{"Game"}</th><th>{"Price"}</th><th>{"Qty"}</th><th>{"Subtotal"}</th></tr></thead>
            <tbody>
                { for order.items.iter().map(|item| html! {
                    <tr key={item.order_item_id.to_string()}>
                        <td>{ item.display_title().to_string() }</td>
                        <td>{ item.price.display_price() }</td>
                        <td>{ item.quantity }</td>
                        <td>{ item.subtotal.to_string() }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}

fn order_card(order: &Order, expanded: bool, on_toggle: &Callback<i64>) -> Html {
    let id = order.order_id;
    let toggle = {
        let cb = on_toggle.clone();
        Callback::from(move |_| cb.emit(id))
    };
    html! {
        <div key={id.to_string()} class={classes!("collapse", "collapse-arrow", "bg-base-100", "shadow", "order-card", expanded.then_some("collapse-open"))}>
            <button type="button" class="collapse-title flex justify-between items-center w-full text-left"
                aria-expanded={expanded.to_string()} onclick={toggle}>
                <span class="font-semibold">{ format!("Order #{id}") }</span>
                <span class="text-sm opacity-70">{ order.display_date() }</span>
                <StatusBadge status={order.status.clone()} />
                <span class="font-semibold">{ order.total_amount.to_string() }</span>
            </button>
            if expanded {
                <div class="collapse-content">
                    { order.payment_method.as_ref().map(|m| html! {
                        <p class="text-sm">{ format!("Paid with {m}") }</p>
                    }).unwrap_or_default() }
                    { order_items(order) }
                </div>
            }
        </div>
    }
}

#[function_component(OrdersPage)]
pub fn orders_page(props: &OrdersPageProps) -> Html {
    let state = &props.state;
    let on_search = {
        let cb = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let chips = state.status_chips().into_iter().map(|chip| {
        let active = chip.status == state.filter;
        let cb = props.on_filter.clone();
        let status = chip.status.clone();
        let onclick = Callback::from(move |_| cb.emit(status.clone()));
        html! {
            <button type="button" class={classes!("btn", "btn-sm", "status-chip", if active { "btn-primary" } else { "btn-ghost" })}
                aria-pressed={active.to_string()} onclick={onclick}>
                { chip.label }
                <span class="badge badge-sm ml-1">{ chip.count }</span>
            </button>
        }
    });

    let list = if let Some(error) = &state.error {
        error_panel(error, &props.on_retry)
    } else if state.loading && state.scoped.is_empty() {
        loading_spinner("Loading your orders")
    } else if state.visible.is_empty() {
        let text = if state.term.trim().is_empty() {
            "You have no orders yet."
        } else {
            "No orders match your search."
        };
        html! { <p class="text-center py-8 empty-state">{ text }</p> }
    } else {
        html! {
            <div class="space-y-2">
                { for state.visible.iter().map(|order| order_card(order, state.is_expanded(order.order_id), &props.on_toggle)) }
            </div>
        }
    };

    html! {
        <section class="orders p-4 space-y-4">
            <h1 class="text-2xl font-bold">{"My orders"}</h1>
            { state.highlight.as_ref().map(|order| html! {
                <div class="alert alert-success new-order" role="status">
                    { format!("Order #{} placed: {}", order.order_id, order.total_amount) }
                </div>
            }).unwrap_or_default() }
            <div class="flex flex-wrap gap-2 items-center">
                <input type="search" class="input input-bordered w-full max-w-xs" placeholder="Search by order number"
                    aria-label="Search orders" value={state.term.clone()} oninput={on_search} />
                if state.searching {
                    <span class="loading loading-dots loading-sm" aria-label="Searching"></span>
                }
            </div>
            { state.search_error.as_ref().map(|msg| html! {
                <div class="alert alert-warning" role="alert">{ msg.clone() }</div>
            }).unwrap_or_default() }
            <div class="flex flex-wrap gap-1" role="group" aria-label="Filter by status">{ for chips }</div>
            { list }
        </section>
    }
}
