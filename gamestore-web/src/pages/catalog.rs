use super::{error_panel, loading_spinner};
use crate::paths::game_image;
use gamestore_core::{CatalogState, Game, SortKey};
use yew::html::TargetCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CatalogPageProps {
    pub state: CatalogState,
    /// Raw search box contents; the container debounces before searching.
    #[prop_or_default]
    pub search_term: AttrValue,
    pub on_search: Callback<String>,
    pub on_genre: Callback<Option<String>>,
    pub on_sort: Callback<SortKey>,
    pub on_add: Callback<i64>,
    pub on_open: Callback<i64>,
    pub on_retry: Callback<()>,
}

fn game_card(game: &Game, adding: bool, on_add: &Callback<i64>, on_open: &Callback<i64>) -> Html {
    let id = game.game_id;
    let add = {
        let cb = on_add.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let open = {
        let cb = on_open.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let price_class = classes!("font-semibold", game.is_free().then_some("text-success"));
    html! {
        <article class="card bg-base-100 shadow game-card" key={id.to_string()}>
            <figure class="cursor-pointer" onclick={open.clone()}>
                <img src={game_image(game.gameicon.as_deref())} alt={game.title.clone()} loading="lazy" />
            </figure>
            <div class="card-body">
                <h2 class="card-title cursor-pointer" onclick={open}>{ game.title.clone() }</h2>
                <p class="text-sm opacity-70">{ format!("{} · {}", game.genre, game.platform) }</p>
                <div class="card-actions justify-between items-center">
                    <span class={price_class}>{ game.price.display_price() }</span>
                    if game.in_stock() {
                        <button type="button" class="btn btn-primary btn-sm" disabled={adding} onclick={add}>
                            { if adding { "Adding…" } else { "Add to cart" } }
                        </button>
                    } else {
                        <span class="badge badge-ghost">{"Out of stock"}</span>
                    }
                </div>
            </div>
        </article>
    }
}

#[function_component(CatalogPage)]
pub fn catalog_page(props: &CatalogPageProps) -> Html {
    let state = &props.state;
    let on_search = {
        let cb = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let on_sort = {
        let cb = props.on_sort.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                cb.emit(SortKey::from_key(&select.value()));
            }
        })
    };
    let selected = state.selected_genre();
    let genre_chip = |genre: Option<&str>| {
        let active = genre == selected;
        let label = genre.unwrap_or("All").to_string();
        let value = genre.map(str::to_string);
        let cb = props.on_genre.clone();
        let onclick = Callback::from(move |_| cb.emit(value.clone()));
        html! {
            <button type="button" class={classes!("btn", "btn-sm", if active { "btn-primary" } else { "btn-ghost" })}
                aria-pressed={active.to_string()} onclick={onclick}>
                { label }
            </button>
        }
    };

    let body = if let Some(error) = &state.error {
        error_panel(error, &props.on_retry)
    } else if state.loading && state.games.is_empty() {
        loading_spinner("Loading games")
    } else if state.games.is_empty() {
        html! { <p class="text-center py-8 empty-state">{"No games match your search."}</p> }
    } else {
        html! {
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
                { for state.games.iter().map(|game| {
                    game_card(game, state.adding.contains(&game.game_id), &props.on_add, &props.on_open)
                }) }
            </div>
        }
    };

    html! {
        <section class="catalog p-4 space-y-4">
            <div class="flex flex-wrap gap-2 items-center">
                <input type="search" class="input input-bordered w-full max-w-xs" placeholder="Search games"
                    aria-label="Search games" value={props.search_term.clone()} oninput={on_search} />
                <select class="select select-bordered" aria-label="Sort games" onchange={on_sort}>
                    { for SortKey::ALL.iter().map(|key| html! {
                        <option value={key.key()} selected={*key == state.sort}>{ key.label() }</option>
                    }) }
                </select>
            </div>
            <div class="flex flex-wrap gap-1 genre-chips" role="group" aria-label="Genres">
                { genre_chip(None) }
                { for state.genres.iter().map(|g| genre_chip(Some(g.as_str()))) }
            </div>
            { body }
        </section>
    }
}
