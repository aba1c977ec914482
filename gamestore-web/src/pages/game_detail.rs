use super::{error_panel, loading_spinner};
use super::not_found::NotFound;
use crate::paths::game_image;
use gamestore_core::GameLookup;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameDetailPageProps {
    /// `None` while the lookup is in flight.
    pub lookup: Option<GameLookup>,
    #[prop_or_default]
    pub adding: bool,
    pub on_add: Callback<i64>,
    pub on_back: Callback<()>,
    pub on_retry: Callback<()>,
}

#[function_component(GameDetailPage)]
pub fn game_detail_page(props: &GameDetailPageProps) -> Html {
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let game = match &props.lookup {
        None => return loading_spinner("Loading game"),
        Some(GameLookup::NotFound) => {
            return html! {
                <NotFound title="Game not found"
                    message="This game is no longer in the catalog."
                    on_go_home={props.on_back.clone()} />
            };
        }
        Some(GameLookup::Failed(message)) => return error_panel(message, &props.on_retry),
        Some(GameLookup::Found(game)) => game,
    };
    let id = game.game_id;
    let add = {
        let cb = props.on_add.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let stock_line = match game.stock_quantity {
        0 => String::from("Out of stock"),
        n => format!("{n} in stock"),
    };
    html! {
        <section class="game-detail p-4">
            <button type="button" class="btn btn-ghost btn-sm mb-4" onclick={back}>{"← Back to store"}</button>
            <div class="flex flex-col md:flex-row gap-6">
                <img class="rounded-box max-w-sm" src={game_image(game.gameicon.as_deref())} alt={game.title.clone()} />
                <div class="space-y-3">
                    <h1 class="text-3xl font-bold">{ game.title.clone() }</h1>
                    <div class="flex gap-2">
                        <span class="badge">{ game.genre.clone() }</span>
                        <span class="badge badge-outline">{ game.platform.clone() }</span>
                    </div>
                    <p class="text-2xl price">{ game.price.display_price() }</p>
                    <p>{ game.description.clone() }</p>
                    <p class="text-sm opacity-70 stock">{ stock_line }</p>
                    <button type="button" class="btn btn-primary"
                        disabled={props.adding || !game.in_stock()} onclick={add}>
                        { if props.adding { "Adding…" } else { "Add to cart" } }
                    </button>
                </div>
            </div>
        </section>
    }
}
