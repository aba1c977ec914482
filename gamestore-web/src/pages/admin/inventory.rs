use super::{TableActions, list_placeholder, toolbar};
use gamestore_core::{AdminList, InventoryRow, StockDrafts};
use yew::html::TargetCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AdminInventoryPageProps {
    pub list: AdminList<InventoryRow>,
    pub drafts: StockDrafts,
    pub actions: TableActions,
    pub on_increment: Callback<i64>,
    pub on_decrement: Callback<i64>,
    /// `(game_id, raw input)`.
    pub on_input: Callback<(i64, String)>,
    pub on_save: Callback<i64>,
    pub on_discard: Callback<i64>,
}

fn level_class(row: &InventoryRow) -> &'static str {
    match row.stock_level() {
        "Out of stock" => "badge-error",
        "Low stock" => "badge-warning",
        _ => "badge-success",
    }
}

fn stock_row(row: &InventoryRow, props: &AdminInventoryPageProps) -> Html {
    let id = row.game_id;
    let busy = props.list.is_busy(id);
    let dirty = props.drafts.is_dirty(row);
    let value = props.drafts.value(row);
    let emit = |cb: &Callback<i64>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id))
    };
    let typed = {
        let cb = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit((id, input.value()));
            }
        })
    };
    html! {
        <tr key={id.to_string()} class={classes!(dirty.then_some("bg-base-200"))}>
            <td>{ row.title.clone() }</td>
            <td>{ row.platform.clone() }</td>
            <td>{ row.stock_quantity }</td>
            <td><span class={classes!("badge", level_class(row))}>{ row.stock_level() }</span></td>
            <td>
                <div class="join">
                    <button type="button" class="btn btn-sm join-item" aria-label="Decrease stock"
                        disabled={busy || value == 0} onclick={emit(&props.on_decrement)}>{"−"}</button>
                    <input type="number" min="0" class="input input-sm input-bordered join-item w-20"
                        aria-label="Stock" value={value.to_string()} disabled={busy} oninput={typed} />
                    <button type="button" class="btn btn-sm join-item" aria-label="Increase stock"
                        disabled={busy} onclick={emit(&props.on_increment)}>{"+"}</button>
                </div>
            </td>
            <td class="flex gap-1">
                <button type="button" class="btn btn-primary btn-xs" disabled={busy || !dirty}
                    onclick={emit(&props.on_save)}>{ if busy { "Saving…" } else { "Save" } }</button>
                <button type="button" class="btn btn-ghost btn-xs" disabled={busy || !dirty}
                    onclick={emit(&props.on_discard)}>{"Discard"}</button>
            </td>
        </tr>
    }
}

#[function_component(AdminInventoryPage)]
pub fn admin_inventory_page(props: &AdminInventoryPageProps) -> Html {
    let list = &props.list;
    let table = list_placeholder(list, &props.actions.on_retry).unwrap_or_else(|| html! {
        <table class="table">
            <thead>
                <tr><th>{"Title"}</th><th>{"Platform"}</th><th>{"In stock"}</th><th>{"Level"}</th><th>{"New stock"}</th><th></th></tr>
            </thead>
            <tbody>
                { for list.visible().into_iter().map(|row| stock_row(row, props)) }
            </tbody>
        </table>
    });
    html! {
        <section class="admin-inventory p-4 space-y-4">
            <h1 class="text-2xl font-bold">{"Inventory"}</h1>
            { toolbar(list, "stock levels", &props.actions, Html::default()) }
            { table }
        </section>
    }
}
