pub mod admin;
pub mod cart;
pub mod catalog;
pub mod game_detail;
pub mod login;
pub mod not_found;
pub mod orders;
pub mod signup;

use yew::prelude::*;

/// Blocking error panel with a manual retry.
#[must_use]
pub fn error_panel(message: &str, on_retry: &Callback<()>) -> Html {
    let retry = {
        let cb = on_retry.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="alert alert-error error-panel" role="alert">
            <span>{ message.to_string() }</span>
            <button type="button" class="btn btn-sm" onclick={retry}>{"Try again"}</button>
        </div>
    }
}

#[must_use]
pub fn loading_spinner(label: &str) -> Html {
    html! {
        <div class="flex justify-center py-8" aria-busy="true">
            <span class="loading loading-spinner loading-lg"></span>
            <span class="sr-only">{ label.to_string() }</span>
        </div>
    }
}

/// Form submit handler that keeps the browser from reloading the page.
#[must_use]
pub fn submit_handler(on_submit: &Callback<()>) -> Callback<SubmitEvent> {
    let cb = on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        cb.emit(());
    })
}
