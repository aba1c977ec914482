use super::submit_handler;
use crate::components::{TextField, field_error};
use gamestore_core::{FormState, LoginForm};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LoginPageProps {
    pub form: FormState<LoginForm>,
    /// Confirmation carried over from a successful signup.
    #[prop_or_default]
    pub flash: Option<AttrValue>,
    pub on_input: Callback<(String, String)>,
    pub on_submit: Callback<()>,
    pub on_signup: Callback<()>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let state = &props.form;
    let to_signup = {
        let cb = props.on_signup.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(());
        })
    };
    html! {
        <section class="card bg-base-100 shadow max-w-md mx-auto mt-10">
            <form class="card-body" onsubmit={submit_handler(&props.on_submit)} novalidate={true}>
                <h1 class="card-title text-2xl">{"Log in"}</h1>
                { props.flash.as_ref().map(|msg| html! {
                    <div class="alert alert-success" role="status">{ msg.clone() }</div>
                }).unwrap_or_default() }
                { state.banner.as_ref().map(|msg| html! {
                    <div class="alert alert-error form-banner" role="alert">{ msg.clone() }</div>
                }).unwrap_or_default() }
                <TextField name="email" label="Email" input_type="email"
                    value={state.form.email.clone()}
                    error={field_error(state.error("email"))}
                    disabled={state.submitting}
                    on_input={props.on_input.clone()} />
                <TextField name="password" label="Password" input_type="password"
                    value={state.form.password.clone()}
                    error={field_error(state.error("password"))}
                    disabled={state.submitting}
                    on_input={props.on_input.clone()} />
                <div class="card-actions justify-between items-center mt-4">
                    <a href="#" class="link" onclick={to_signup}>{"Create an account"}</a>
                    <button type="submit" class="btn btn-primary" disabled={state.submitting}>
                        { if state.submitting { "Logging in…" } else { "Log in" } }
                    </button>
                </div>
            </form>
        </section>
    }
}
