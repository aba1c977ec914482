use super::Modal;
use yew::prelude::*;

/// Delete confirmation. Nothing is sent until `on_confirm` fires.
#[derive(Properties, PartialEq, Clone)]
pub struct ConfirmDialogProps {
    pub open: bool,
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::from("Delete"))]
    pub confirm_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let confirm = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let actions = html! {
        <>
            <button type="button" class="btn btn-ghost" onclick={cancel}>{"Cancel"}</button>
            <button type="button" class="btn btn-error" disabled={props.busy} onclick={confirm}>
                { props.confirm_label.clone() }
            </button>
        </>
    };
    html! {
        <Modal open={props.open} title={props.title.clone()} on_close={props.on_cancel.clone()} actions={actions}>
            <p>{ props.message.clone() }</p>
        </Modal>
    }
}
