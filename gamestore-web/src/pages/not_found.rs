use yew::prelude::*;

/// Shown for unknown routes and for game pages whose id does not exist.
#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or(AttrValue::from("Page not found"))]
    pub title: AttrValue,
    #[prop_or(AttrValue::from("The page you are looking for does not exist."))]
    pub message: AttrValue,
    pub on_go_home: Callback<()>,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    let go_home = {
        let cb = props.on_go_home.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="hero min-h-[50vh] not-found" aria-live="assertive">
            <div class="hero-content text-center flex-col">
                <h1 class="text-3xl font-bold">{ props.title.clone() }</h1>
                <p>{ props.message.clone() }</p>
                <button type="button" class="btn btn-primary" onclick={go_home}>
                    {"Back to the store"}
                </button>
            </div>
        </section>
    }
}
