use super::submit_handler;
use crate::components::{TextField, field_error};
use gamestore_core::{FormState, SignupForm};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SignupPageProps {
    pub form: FormState<SignupForm>,
    pub on_input: Callback<(String, String)>,
    pub on_submit: Callback<()>,
    pub on_login: Callback<()>,
}

#[function_component(SignupPage)]
pub fn signup_page(props: &SignupPageProps) -> Html {
    let state = &props.form;
    let to_login = {
        let cb = props.on_login.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(());
        })
    };
    let field = |name: &'static str, label: &'static str, kind: &'static str, value: &str| {
        html! {
            <TextField name={name} label={label} input_type={kind}
                value={value.to_string()}
                error={field_error(state.error(name))}
                disabled={state.submitting}
                on_input={props.on_input.clone()} />
        }
    };
    html! {
        <section class="card bg-base-100 shadow max-w-md mx-auto mt-10">
            <form class="card-body" onsubmit={submit_handler(&props.on_submit)} novalidate={true}>
                <h1 class="card-title text-2xl">{"Create an account"}</h1>
                { state.banner.as_ref().map(|msg| html! {
                    <div class="alert alert-error form-banner" role="alert">{ msg.clone() }</div>
                }).unwrap_or_default() }
                { field("username", "Username", "text", &state.form.username) }
                { field("email", "Email", "email", &state.form.email) }
                { field("password", "Password", "password", &state.form.password) }
                { field("confirm_password", "Confirm password", "password", &state.form.confirm_password) }
                <div class="card-actions justify-between items-center mt-4">
                    <a href="#" class="link" onclick={to_login}>{"Already have an account?"}</a>
                    <button type="submit" class="btn btn-primary" disabled={state.submitting}>
                        { if state.submitting { "Creating…" } else { "Sign up" } }
                    </button>
                </div>
            </form>
        </section>
    }
}
