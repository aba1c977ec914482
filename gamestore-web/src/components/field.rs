use yew::html::TargetCast;
use yew::prelude::*;

/// Labelled input with its validation message underneath.
#[derive(Properties, PartialEq, Clone)]
pub struct TextFieldProps {
    pub name: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or(AttrValue::from("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub multiline: bool,
    /// Emits `(field name, new value)`.
    pub on_input: Callback<(String, String)>,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let id = format!("field-{}", props.name);
    let name = props.name.to_string();
    let cb = props.on_input.clone();
    let input_class = classes!(
        if props.multiline { "textarea textarea-bordered" } else { "input input-bordered" },
        "w-full",
        props.error.as_ref().map(|_| "input-error")
    );
    let control = if props.multiline {
        let oninput = Callback::from(move |e: InputEvent| {
            if let Some(el) = e.target_dyn_into::<web_sys::HtmlTextAreaElement>() {
                cb.emit((name.clone(), el.value()));
            }
        });
        html! {
            <textarea id={id.clone()} name={props.name.clone()} class={input_class}
                value={props.value.clone()} disabled={props.disabled} oninput={oninput} />
        }
    } else {
        let oninput = Callback::from(move |e: InputEvent| {
            if let Some(el) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit((name.clone(), el.value()));
            }
        });
        html! {
            <input id={id.clone()} name={props.name.clone()} class={input_class}
                type={props.input_type.clone()} value={props.value.clone()}
                disabled={props.disabled} oninput={oninput} />
        }
    };
    html! {
        <div class="form-control w-full">
            <label class="label" for={id}>
                <span class="label-text">{ props.label.clone() }</span>
            </label>
            { control }
            { props.error.as_ref().map(|msg| html! {
                <p class="text-error text-sm field-error">{ msg.clone() }</p>
            }).unwrap_or_default() }
        </div>
    }
}

/// Labelled select; the empty option is offered when `placeholder` is set.
#[derive(Properties, PartialEq, Clone)]
pub struct SelectFieldProps {
    pub name: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub options: Vec<(AttrValue, AttrValue)>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<(String, String)>,
}

#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let id = format!("field-{}", props.name);
    let onchange = {
        let name = props.name.to_string();
        let cb = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(el) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                cb.emit((name.clone(), el.value()));
            }
        })
    };
    html! {
        <div class="form-control w-full">
            <label class="label" for={id.clone()}>
                <span class="label-text">{ props.label.clone() }</span>
            </label>
            <select id={id} name={props.name.clone()} class="select select-bordered w-full"
                disabled={props.disabled} onchange={onchange}>
                { props.placeholder.as_ref().map(|p| html! {
                    <option value="" selected={props.value.is_empty()}>{ p.clone() }</option>
                }).unwrap_or_default() }
                { for props.options.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={*value == props.value}>{ label.clone() }</option>
                }) }
            </select>
            { props.error.as_ref().map(|msg| html! {
                <p class="text-error text-sm field-error">{ msg.clone() }</p>
            }).unwrap_or_default() }
        </div>
    }
}

/// Owned copy of a validation message for a field's `error` prop.
#[must_use]
pub fn field_error(message: Option<&str>) -> Option<AttrValue> {
    message.map(|m| AttrValue::from(m.to_string()))
}
