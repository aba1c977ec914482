use super::{Editor, TableActions, editor_actions, form_banner, list_placeholder, row_buttons, toolbar};
use crate::components::{ConfirmDialog, Modal, SelectField, TextField, field_error};
use gamestore_core::{AdminEntity, AdminList, AdminUser, UserForm};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AdminUsersPageProps {
    pub list: AdminList<AdminUser>,
    #[prop_or_default]
    pub editor: Option<Editor<UserForm>>,
    pub actions: TableActions,
    pub on_new: Callback<()>,
    pub on_edit: Callback<i64>,
    pub on_delete: Callback<i64>,
    pub on_confirm_delete: Callback<()>,
    pub on_cancel_delete: Callback<()>,
    pub on_form_input: Callback<(String, String)>,
    pub on_form_submit: Callback<()>,
    pub on_form_cancel: Callback<()>,
}

fn editor_modal(editor: &Editor<UserForm>, props: &AdminUsersPageProps) -> Html {
    let state = &editor.form;
    let form = &state.form;
    let field = |name: &'static str, label: &'static str, kind: &'static str, value: &str| {
        html! {
            <TextField name={name} label={label} input_type={kind} value={value.to_string()}
                error={field_error(state.error(name))} disabled={state.submitting}
                on_input={props.on_form_input.clone()} />
        }
    };
    let password_label = if form.editing { "New password (optional)" } else { "Password" };
    let roles = vec![
        (AttrValue::from("user"), AttrValue::from("User")),
        (AttrValue::from("admin"), AttrValue::from("Admin")),
    ];
    let actions = editor_actions(state.submitting, &props.on_form_submit, &props.on_form_cancel);
    html! {
        <Modal open={true} title={editor.title(AdminUser::NOUN)} on_close={props.on_form_cancel.clone()} actions={actions}>
            { form_banner(state) }
            { field("username", "Username", "text", &form.username) }
            { field("email", "Email", "email", &form.email) }
            { field("password", password_label, "password", &form.password) }
            <SelectField name="role" label="Role" value={form.role.clone()} options={roles}
                error={field_error(state.error("role"))} disabled={state.submitting}
                on_change={props.on_form_input.clone()} />
        </Modal>
    }
}

#[function_component(AdminUsersPage)]
pub fn admin_users_page(props: &AdminUsersPageProps) -> Html {
    let list = &props.list;
    let new_button = {
        let cb = props.on_new.clone();
        html! {
            <button type="button" class="btn btn-primary btn-sm ml-auto" onclick={Callback::from(move |_| cb.emit(()))}>
                {"Add user"}
            </button>
        }
    };
    let table = list_placeholder(list, &props.actions.on_retry).unwrap_or_else(|| html! {
        <table class="table">
            <thead>
                <tr><th>{"Username"}</th><th>{"Email"}</th><th>{"Role"}</th><th>{"Joined"}</th><th></th></tr>
            </thead>
            <tbody>
                { for list.visible().into_iter().map(|user| html! {
                    <tr key={user.user_id.to_string()}>
                        <td>{ user.username.clone() }</td>
                        <td>{ user.email.clone() }</td>
                        <td><span class={classes!("badge", user.role.is_admin().then_some("badge-secondary"))}>{ user.role.as_str() }</span></td>
                        <td>{ user.created_at.clone().unwrap_or_else(|| String::from("-")) }</td>
                        <td>{ row_buttons(user.user_id, list.is_busy(user.user_id), &props.on_edit, &props.on_delete) }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    });
    let pending = list.pending_delete.and_then(|id| list.get(id));
    html! {
        <section class="admin-users p-4 space-y-4">
            <h1 class="text-2xl font-bold">{"Manage users"}</h1>
            { toolbar(list, "roles", &props.actions, new_button) }
            { table }
            { props.editor.as_ref().map(|editor| editor_modal(editor, props)).unwrap_or_default() }
            <ConfirmDialog open={pending.is_some()} title="Delete user"
                message={pending.map(|u| format!("Delete the account \"{}\"?", u.username)).unwrap_or_default()}
                on_confirm={props.on_confirm_delete.clone()} on_cancel={props.on_cancel_delete.clone()} />
        </section>
    }
}
