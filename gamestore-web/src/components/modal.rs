use super::class_list;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ModalProps {
    pub open: bool,
    pub title: AttrValue,
    #[prop_or_default]
    pub actions: Option<Html>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return Html::default();
    }
    let class = class_list(&["modal", "modal-open"], &props.class);
    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };
    html! {
        <div class={class} role="dialog" aria-modal="true" aria-label={props.title.clone()} onkeydown={on_keydown}>
            <div class="modal-box">
                <div class="flex justify-between items-start">
                    <h3 class="font-bold text-lg">{ props.title.clone() }</h3>
                    <button type="button" class="btn btn-ghost btn-sm" aria-label="Close" onclick={close.clone()}>{"✕"}</button>
                </div>
                <div class="py-2">
                    { for props.children.iter() }
                </div>
                { props.actions.clone().map(|actions| html!{
                    <div class="modal-action">{ actions }</div>
                }).unwrap_or_default() }
            </div>
            <div class="modal-backdrop" onclick={close}></div>
        </div>
    }
}
