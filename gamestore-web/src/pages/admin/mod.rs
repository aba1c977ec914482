//! Admin management screens. Each page is a filterable table plus a modal
//! editor and a delete confirmation, all driven by an `AdminList`.
pub mod games;
pub mod inventory;
pub mod orders;
pub mod users;

use gamestore_core::{AdminEntity, AdminList, FormModel, FormState};
use yew::html::TargetCast;
use yew::prelude::*;

/// Open editor modal: `editing == None` creates a new row.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor<F> {
    pub editing: Option<i64>,
    pub form: FormState<F>,
}

impl<F: FormModel> Editor<F> {
    #[must_use]
    pub fn create() -> Self {
        Self {
            editing: None,
            form: FormState::new(F::default()),
        }
    }

    #[must_use]
    pub fn edit(id: i64, form: F) -> Self {
        Self {
            editing: Some(id),
            form: FormState::new(form),
        }
    }

    #[must_use]
    pub fn title(&self, noun: &str) -> String {
        match self.editing {
            Some(_) => format!("Edit {noun}"),
            None => format!("Add {noun}"),
        }
    }
}

/// Callbacks shared by every admin table.
#[derive(Clone, PartialEq)]
pub struct TableActions {
    pub on_term: Callback<String>,
    pub on_category: Callback<Option<String>>,
    pub on_retry: Callback<()>,
}

/// Search box plus the categorical filter for one admin list.
pub fn toolbar<E: AdminEntity>(
    list: &AdminList<E>,
    category_label: &str,
    actions: &TableActions,
    extra: Html,
) -> Html {
    let on_term = {
        let cb = actions.on_term.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let on_category = {
        let cb = actions.on_category.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                let value = select.value();
                cb.emit((!value.is_empty()).then_some(value));
            }
        })
    };
    let selected = list.category.clone().unwrap_or_default();
    html! {
        <div class="flex flex-wrap gap-2 items-center admin-toolbar">
            <input type="search" class="input input-bordered w-full max-w-xs" placeholder="Search"
                aria-label="Search" value={list.term.clone()} oninput={on_term} />
            <select class="select select-bordered" aria-label={category_label.to_string()} onchange={on_category}>
                <option value="" selected={selected.is_empty()}>{ format!("All {category_label}") }</option>
                { for list.categories().into_iter().map(|c| {
                    let is_selected = c.eq_ignore_ascii_case(&selected);
                    html! { <option value={c.clone()} selected={is_selected}>{ c }</option> }
                }) }
            </select>
            { extra }
        </div>
    }
}

/// Loading, error, or empty placeholder; `None` means render the table.
pub fn list_placeholder<E: AdminEntity>(list: &AdminList<E>, on_retry: &Callback<()>) -> Option<Html> {
    if let Some(error) = &list.error {
        return Some(super::error_panel(error, on_retry));
    }
    if list.loading && list.items.is_empty() {
        return Some(super::loading_spinner("Loading"));
    }
    if list.visible().is_empty() {
        return Some(html! { <p class="text-center py-8 empty-state">{ format!("No {}s found.", E::NOUN) }</p> });
    }
    None
}

/// Edit and delete buttons for one row.
pub fn row_buttons(id: i64, busy: bool, on_edit: &Callback<i64>, on_delete: &Callback<i64>) -> Html {
    let edit = {
        let cb = on_edit.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let delete = {
        let cb = on_delete.clone();
        Callback::from(move |_| cb.emit(id))
    };
    html! {
        <div class="flex gap-1">
            <button type="button" class="btn btn-ghost btn-xs" disabled={busy} onclick={edit}>{"Edit"}</button>
            <button type="button" class="btn btn-ghost btn-xs text-error" disabled={busy} onclick={delete}>{"Delete"}</button>
        </div>
    }
}

/// Submit/cancel buttons for an editor modal.
pub fn editor_actions(submitting: bool, on_submit: &Callback<()>, on_cancel: &Callback<()>) -> Html {
    let submit = {
        let cb = on_submit.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cancel = {
        let cb = on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <>
            <button type="button" class="btn btn-ghost" onclick={cancel}>{"Cancel"}</button>
            <button type="button" class="btn btn-primary" disabled={submitting} onclick={submit}>
                { if submitting { "Saving…" } else { "Save" } }
            </button>
        </>
    }
}

/// Form-level server failure shown above the fields.
pub fn form_banner<F>(form: &FormState<F>) -> Html {
    form.banner
        .as_ref()
        .map(|msg| html! { <div class="alert alert-error form-banner" role="alert">{ msg.clone() }</div> })
        .unwrap_or_default()
}
