use super::{Editor, TableActions, editor_actions, form_banner, list_placeholder, row_buttons, toolbar};
use crate::components::{ConfirmDialog, Modal, TextField, field_error};
use gamestore_core::{AdminEntity, AdminList, Game, GameForm};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AdminGamesPageProps {
    pub list: AdminList<Game>,
    #[prop_or_default]
    pub editor: Option<Editor<GameForm>>,
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

fn editor_modal(editor: &Editor<GameForm>, props: &AdminGamesPageProps) -> Html {
    let state = &editor.form;
    let form = &state.form;
    let field = |name: &'static str, label: &'static str, value: &str| {
        html! {
            <TextField name={name} label={label} value={value.to_string()}
                error={field_error(state.error(name))} disabled={state.submitting}
                on_input={props.on_form_input.clone()} />
        }
    };
    let actions = editor_actions(state.submitting, &props.on_form_submit, &props.on_form_cancel);
    html! {
        <Modal open={true} title={editor.title(Game::NOUN)} on_close={props.on_form_cancel.clone()} actions={actions}>
            { form_banner(state) }
            { field("title", "Title", &form.title) }
            <TextField name="description" label="Description" multiline={true}
                value={form.description.clone()} disabled={state.submitting}
                on_input={props.on_form_input.clone()} />
            <div class="grid grid-cols-2 gap-2">
                { field("price", "Price", &form.price) }
                { field("stock_quantity", "Stock", &form.stock_quantity) }
                { field("genre", "Genre", &form.genre) }
                { field("platform", "Platform", &form.platform) }
            </div>
            { field("gameicon", "Image file", &form.gameicon) }
        </Modal>
    }
}

#[function_component(AdminGamesPage)]
pub fn admin_games_page(props: &AdminGamesPageProps) -> Html {
    let list = &props.list;
    let new_button = {
        let cb = props.on_new.clone();
        html! {
            <button type="button" class="btn btn-primary btn-sm ml-auto" onclick={Callback::from(move |_| cb.emit(()))}>
                {"Add game"}
            </button>
        }
    };
    let table = list_placeholder(list, &props.actions.on_retry).unwrap_or_else(|| html! {
        <table class="table">
            <thead>
                <tr><th>{"Title"}</th><th>{"Genre"}</th><th>{"Platform"}</th><th>{"Price"}</th><th>{"Stock"}</th><th></th></tr>
            </thead>
            <tbody>
                { for list.visible().into_iter().map(|game| html! {
                    <tr key={game.game_id.to_string()}>
                        <td>{ game.title.clone() }</td>
                        <td>{ game.genre.clone() }</td>
                        <td>{ game.platform.clone() }</td>
                        <td>{ game.price.display_price() }</td>
                        <td>{ game.stock_quantity }</td>
                        <td>{ row_buttons(game.game_id, list.is_busy(game.game_id), &props.on_edit, &props.on_delete) }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    });
    let pending = list.pending_delete.and_then(|id| list.get(id));
    html! {
        <section class="admin-games p-4 space-y-4">
            <h1 class="text-2xl font-bold">{"Manage games"}</h1>
            { toolbar(list, "genres", &props.actions, new_button) }
            { table }
            { props.editor.as_ref().map(|editor| editor_modal(editor, props)).unwrap_or_default() }
            <ConfirmDialog open={pending.is_some()} title="Delete game"
                message={pending.map(|g| format!("Delete \"{}\"? This cannot be undone.", g.title)).unwrap_or_default()}
                on_confirm={props.on_confirm_delete.clone()} on_cancel={props.on_cancel_delete.clone()} />
        </section>
    }
}
