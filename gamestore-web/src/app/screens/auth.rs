use crate::app::context::ScreenProps;
use crate::pages::login::LoginPage;
use crate::pages::signup::SignupPage;
use crate::router::Route;
use gamestore_core::{FormState, LoginForm, SignupForm};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginScreen)]
pub fn login_screen(props: &ScreenProps) -> Html {
    let ctx = props.ctx.clone();
    let navigator = use_navigator();
    let form = use_state(|| FormState::new(LoginForm::default()));
    let flash = use_state(|| (*ctx.flash).clone());
    {
        let flash_slot = ctx.flash.clone();
        use_effect_with((), move |_| flash_slot.set(None));
    }

    let on_input = {
        let form = form.clone();
        Callback::from(move |(field, value): (String, String)| {
            let mut next = (*form).clone();
            next.edit(&field, value);
            form.set(next);
        })
    };
    let on_submit = {
        let form = form.clone();
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        Callback::from(move |()| {
            let mut next = (*form).clone();
            let Some(credentials) = next.begin_submit() else {
                form.set(next);
                return;
            };
            form.set(next.clone());
            let form = form.clone();
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match ctx.client.login(&credentials).await {
                    Ok(user) => {
                        log::info!("signed in as {}", user.username);
                        let home = Route::home_for(user.role);
                        ctx.session.set(user.clone());
                        ctx.user.set(Some(user));
                        next.finish();
                        form.set(next);
                        if let Some(nav) = navigator {
                            nav.push(&home);
                        }
                    }
                    Err(err) => {
                        next.fail(err.user_message("Login failed"));
                        form.set(next);
                    }
                }
            });
        })
    };
    let on_signup = Callback::from(move |()| {
        if let Some(nav) = &navigator {
            nav.push(&Route::Signup);
        }
    });

    html! {
        <LoginPage form={(*form).clone()} flash={(*flash).clone()}
            on_input={on_input} on_submit={on_submit} on_signup={on_signup} />
    }
}

#[function_component(SignupScreen)]
pub fn signup_screen(props: &ScreenProps) -> Html {
    let ctx = props.ctx.clone();
    let navigator = use_navigator();
    let form = use_state(|| FormState::new(SignupForm::default()));

    let on_input = {
        let form = form.clone();
        Callback::from(move |(field, value): (String, String)| {
            let mut next = (*form).clone();
            next.edit(&field, value);
            form.set(next);
        })
    };
    let on_submit = {
        let form = form.clone();
        let navigator = navigator.clone();
        Callback::from(move |()| {
            let mut next = (*form).clone();
            let Some(account) = next.begin_submit() else {
                form.set(next);
                return;
            };
            form.set(next.clone());
            let form = form.clone();
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match ctx.client.signup(&account).await {
                    Ok(_) => {
                        next.finish();
                        form.set(next);
                        ctx.flash.set(Some(AttrValue::from("Account created. Please log in.")));
                        if let Some(nav) = navigator {
                            nav.push(&Route::Login);
                        }
                    }
                    Err(err) => {
                        next.fail(err.user_message("Signup failed"));
                        form.set(next);
                    }
                }
            });
        })
    };
    let on_login = Callback::from(move |()| {
        if let Some(nav) = &navigator {
            nav.push(&Route::Login);
        }
    });

    html! {
        <SignupPage form={(*form).clone()} on_input={on_input} on_submit={on_submit} on_login={on_login} />
    }
}
