use super::{Editor, TableActions, editor_actions, form_banner, list_placeholder, row_buttons, toolbar};
use crate::components::{ConfirmDialog, Modal, SelectField, StatusBadge, field_error};
use gamestore_core::{AdminList, Order, OrderStatus, OrderStatusForm};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AdminOrdersPageProps {
    pub list: AdminList<Order>,
    #[prop_or_default]
    pub editor: Option<Editor<OrderStatusForm>>,
    pub actions: TableActions,
    pub on_edit: Callback<i64>,
    pub on_delete: Callback<i64>,
    pub on_confirm_delete: Callback<()>,
    pub on_cancel_delete: Callback<()>,
    pub on_form_input: Callback<(String, String)>,
    pub on_form_submit: Callback<()>,
    pub on_form_cancel: Callback<()>,
}

fn editor_modal(editor: &Editor<OrderStatusForm>, props: &AdminOrdersPageProps) -> Html {
    let state = &editor.form;
    let options = OrderStatus::KNOWN
        .iter()
        .map(|s| (AttrValue::from(s.as_wire().to_string()), AttrValue::from(s.label())))
        .collect::<Vec<_>>();
    let title = editor
        .editing
        .map_or_else(|| String::from("Update order"), |id| format!("Update order #{id}"));
    let actions = editor_actions(state.submitting, &props.on_form_submit, &props.on_form_cancel);
    html! {
        <Modal open={true} title={title} on_close={props.on_form_cancel.clone()} actions={actions}>
            { form_banner(state) }
            <SelectField name="status" label="Status" value={state.form.status.clone()} options={options}
                placeholder="Choose a status"
                error={field_error(state.error("status"))} disabled={state.submitting}
                on_change={props.on_form_input.clone()} />
        </Modal>
    }
}

#[function_component(AdminOrdersPage)]
pub fn admin_orders_page(props: &AdminOrdersPageProps) -> Html {
    let list = &props.list;
    let table = list_placeholder(list, &props.actions.on_retry).unwrap_or_else(|| html! {
        <table class="table">
            <thead>
                <tr><th>{"Order"}</th><th>{"Customer"}</th><th>{"Date"}</th><th>{"Total"}</th><th>{"Status"}</th><th></th></tr>
            </thead>
            <tbody>
                { for list.visible().into_iter().map(|order| html! {
                    <tr key={order.order_id.to_string()}>
                        <td>{ format!("#{}", order.order_id) }</td>
                        <td>
                            <div>{ order.username.clone().unwrap_or_default() }</div>
                            <div class="text-xs opacity-70">{ order.email.clone().unwrap_or_default() }</div>
                        </td>
                        <td>{ order.display_date() }</td>
                        <td>{ order.total_amount.to_string() }</td>
                        <td><StatusBadge status={order.status.clone()} /></td>
                        <td>{ row_buttons(order.order_id, list.is_busy(order.order_id), &props.on_edit, &props.on_delete) }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    });
    let pending = list.pending_delete;
    html! {
        <section class="admin-orders p-4 space-y-4">
            <h1 class="text-2xl font-bold">{"Manage orders"}</h1>
            { toolbar(list, "statuses", &props.actions, Html::default()) }
            { table }
            { props.editor.as_ref().map(|editor| editor_modal(editor, props)).unwrap_or_default() }
            <ConfirmDialog open={pending.is_some()} title="Delete order"
                message={pending.map(|id| format!("Delete order #{id}?")).unwrap_or_default()}
                on_confirm={props.on_confirm_delete.clone()} on_cancel={props.on_cancel_delete.clone()} />
        </section>
    }
}
