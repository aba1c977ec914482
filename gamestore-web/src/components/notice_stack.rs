use gamestore_core::Notices;
use yew::prelude::*;

/// Toast stack for transient notices; each one carries its own dismiss button.
#[derive(Properties, PartialEq, Clone)]
pub struct NoticeStackProps {
    pub notices: Notices,
    pub on_dismiss: Callback<u64>,
}

#[function_component(NoticeStack)]
pub fn notice_stack(props: &NoticeStackProps) -> Html {
    if props.notices.is_empty() {
        return Html::default();
    }
    html! {
        <div class="toast toast-end toast-top" role="status" aria-live="polite">
            { for props.notices.iter().map(|notice| {
                let id = notice.id;
                let cb = props.on_dismiss.clone();
                let on_click = Callback::from(move |_| cb.emit(id));
                html! {
                    <div class={classes!("alert", notice.kind.css_class(), "flex", "items-center", "gap-2")}>
                        <span>{ notice.text.clone() }</span>
                        <button type="button" class="btn btn-ghost btn-xs" aria-label="Dismiss" onclick={on_click}>{"✕"}</button>
                    </div>
                }
            }) }
        </div>
    }
}
