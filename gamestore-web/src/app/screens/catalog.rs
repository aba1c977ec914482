use crate::app::context::{AppContext, ScreenProps};
use crate::app::hooks::{settle, use_debounce, use_notice_timer, use_view_epoch};
use crate::components::NoticeStack;
use crate::pages::catalog::CatalogPage;
use crate::pages::game_detail::GameDetailPage;
use crate::router::Route;
use crate::state::{CatalogAction, CatalogModel, NoticeAction, NoticeModel};
use gamestore_core::cart::add_to_cart;
use gamestore_core::catalog::{fetch_game, fetch_games, fetch_genres};
use gamestore_core::constants::SEARCH_DEBOUNCE_MS;
use gamestore_core::{AddOutcome, CatalogQuery, GameLookup, NoticeKind, ViewEpoch, stock_notice};
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

/// Add one copy and report the outcome as a toast; refreshes the header badge.
async fn add_one(ctx: &AppContext, game_id: i64, notices: &UseReducerDispatcher<NoticeModel>) {
    match add_to_cart(&ctx.client, game_id, 1).await {
        AddOutcome::Added(count) => {
            if let Some(count) = count {
                ctx.cart_count.set(count);
            }
            notices.dispatch(NoticeAction::Push(NoticeKind::Success, String::from("Added to cart")));
        }
        AddOutcome::StockLimited(available) => {
            notices.dispatch(NoticeAction::Push(NoticeKind::Error, stock_notice(available)));
        }
        AddOutcome::Failed(message) => {
            notices.dispatch(NoticeAction::Push(NoticeKind::Error, message));
        }
    }
}

fn run_query(
    ctx: &AppContext,
    epoch: &Rc<ViewEpoch>,
    model: UseReducerDispatcher<CatalogModel>,
    query: CatalogQuery,
) {
    let ticket = epoch.advance();
    let client = Rc::clone(&ctx.client);
    let epoch = Rc::clone(epoch);
    model.dispatch(CatalogAction::LoadStarted(query.clone()));
    spawn_local(async move {
        let result = fetch_games(&client, &query).await;
        if let Some(result) = epoch.accept(ticket, result) {
            model.dispatch(CatalogAction::Loaded(result));
        }
    });
}

#[function_component(CatalogScreen)]
pub fn catalog_screen(props: &ScreenProps) -> Html {
    let ctx = props.ctx.clone();
    let navigator = use_navigator();
    let model = use_reducer(CatalogModel::default);
    let notices = use_reducer(NoticeModel::default);
    let mounted = use_view_epoch();
    let epoch = use_view_epoch();
    let debounce = use_debounce();
    let term = use_state(String::new);

    {
        let ctx = ctx.clone();
        let epoch = Rc::clone(&epoch);
        let dispatcher = model.dispatcher();
        use_effect_with((), move |_| {
            let client = Rc::clone(&ctx.client);
            let genres = dispatcher.clone();
            let ticket = mounted.ticket();
            spawn_local(async move {
                let list = fetch_genres(&client).await;
                if let Some(list) = mounted.accept(ticket, list) {
                    genres.dispatch(CatalogAction::Genres(list));
                }
            });
            run_query(&ctx, &epoch, dispatcher, CatalogQuery::All);
        });
    }
    use_notice_timer(notices.0.ids(), {
        let dispatcher = notices.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(NoticeAction::Dismiss(id)))
    });

    let on_search = {
        let ctx = ctx.clone();
        let epoch = Rc::clone(&epoch);
        let debounce = Rc::clone(&debounce);
        let dispatcher = model.dispatcher();
        let term = term.clone();
        Callback::from(move |raw: String| {
            term.set(raw.clone());
            let ticket = debounce.touch();
            let ctx = ctx.clone();
            let epoch = Rc::clone(&epoch);
            let debounce = Rc::clone(&debounce);
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                if settle(&debounce, ticket, SEARCH_DEBOUNCE_MS).await {
                    let query = if raw.trim().is_empty() {
                        CatalogQuery::All
                    } else {
                        CatalogQuery::Search(raw.trim().to_string())
                    };
                    run_query(&ctx, &epoch, dispatcher, query);
                }
            });
        })
    };
    let on_genre = {
        let ctx = ctx.clone();
        let epoch = Rc::clone(&epoch);
        let dispatcher = model.dispatcher();
        let debounce = Rc::clone(&debounce);
        let term = term.clone();
        Callback::from(move |genre: Option<String>| {
            debounce.cancel();
            term.set(String::new());
            let query = genre.map_or(CatalogQuery::All, CatalogQuery::Genre);
            run_query(&ctx, &epoch, dispatcher.clone(), query);
        })
    };
    let on_sort = {
        let dispatcher = model.dispatcher();
        Callback::from(move |key| dispatcher.dispatch(CatalogAction::Sort(key)))
    };
    let on_add = {
        let ctx = ctx.clone();
        let model = model.clone();
        let notices = notices.dispatcher();
        Callback::from(move |game_id: i64| {
            if model.0.adding.contains(&game_id) {
                return;
            }
            let dispatcher = model.dispatcher();
            dispatcher.dispatch(CatalogAction::AddStarted(game_id));
            let ctx = ctx.clone();
            let notices = notices.clone();
            spawn_local(async move {
                add_one(&ctx, game_id, &notices).await;
                dispatcher.dispatch(CatalogAction::AddFinished(game_id));
            });
        })
    };
    let on_open = Callback::from(move |id: i64| {
        if let Some(nav) = &navigator {
            nav.push(&Route::GameDetail { id });
        }
    });
    let on_retry = {
        let dispatcher = model.dispatcher();
        let query = model.0.query.clone();
        Callback::from(move |()| run_query(&ctx, &epoch, dispatcher.clone(), query.clone()))
    };
    let on_dismiss = {
        let dispatcher = notices.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(NoticeAction::Dismiss(id)))
    };

    html! {
        <>
            <CatalogPage state={model.0.clone()} search_term={(*term).clone()}
                on_search={on_search} on_genre={on_genre} on_sort={on_sort}
                on_add={on_add} on_open={on_open} on_retry={on_retry} />
            <NoticeStack notices={notices.0.clone()} on_dismiss={on_dismiss} />
        </>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct GameScreenProps {
    pub ctx: AppContext,
    pub id: i64,
}

#[function_component(GameScreen)]
pub fn game_screen(props: &GameScreenProps) -> Html {
    let ctx = props.ctx.clone();
    let navigator = use_navigator();
    let lookup = use_state(|| None::<GameLookup>);
    let adding = use_state(|| false);
    let notices = use_reducer(NoticeModel::default);
    let epoch = use_view_epoch();
    let attempt = use_state(|| 0_u32);

    {
        let client = Rc::clone(&ctx.client);
        let lookup = lookup.clone();
        let epoch = Rc::clone(&epoch);
        use_effect_with((props.id, *attempt), move |(id, _)| {
            let id = *id;
            let ticket = epoch.advance();
            lookup.set(None);
            spawn_local(async move {
                let found = fetch_game(&client, id).await;
                if let Some(found) = epoch.accept(ticket, found) {
                    lookup.set(Some(found));
                }
            });
        });
    }
    use_notice_timer(notices.0.ids(), {
        let dispatcher = notices.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(NoticeAction::Dismiss(id)))
    });

    let on_add = {
        let adding = adding.clone();
        let notices = notices.dispatcher();
        Callback::from(move |game_id: i64| {
            if *adding {
                return;
            }
            adding.set(true);
            let ctx = ctx.clone();
            let adding = adding.clone();
            let notices = notices.clone();
            spawn_local(async move {
                add_one(&ctx, game_id, &notices).await;
                adding.set(false);
            });
        })
    };
    let on_back = Callback::from(move |()| {
        if let Some(nav) = &navigator {
            nav.push(&Route::Catalog);
        }
    });
    let on_retry = {
        let attempt = attempt.clone();
        Callback::from(move |()| attempt.set(*attempt + 1))
    };
    let on_dismiss = {
        let dispatcher = notices.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(NoticeAction::Dismiss(id)))
    };

    html! {
        <>
            <GameDetailPage lookup={(*lookup).clone()} adding={*adding}
                on_add={on_add} on_back={on_back} on_retry={on_retry} />
            <NoticeStack notices={notices.0.clone()} on_dismiss={on_dismiss} />
        </>
    }
}
