use futures::executor::block_on;
use gamestore_core::catalog::fetch_game;
use gamestore_core::mock::FakeBackend;
use gamestore_core::{
    AddOutcome, CatalogController, CatalogQuery, GameLookup, Method, SortKey, StoreClient,
};
use serde_json::json;

#[test]
fn load_fetches_games_and_genres() {
    let backend = FakeBackend::seeded();
    let mut catalog = CatalogController::new(StoreClient::new(backend.clone()));
    block_on(catalog.load());
    let state = catalog.state();
    assert_eq!(state.games.len(), 4);
    assert_eq!(state.genres, vec!["Platformer", "RPG", "Roguelike", "Simulation"]);
    assert_eq!(state.games[0].title, "Celeste");
    assert_eq!(backend.calls(Method::Get, "/games/genres"), 1);
}

#[test]
fn search_genre_and_sort() {
    let backend = FakeBackend::seeded();
    let mut catalog = CatalogController::new(StoreClient::new(backend.clone()));
    block_on(catalog.load());

    block_on(catalog.search("star"));
    assert_eq!(catalog.state().games.len(), 1);
    assert!(catalog.state().games[0].is_free());
    let sent = backend.requests().pop().unwrap();
    assert_eq!(sent.path, "/games/search");
    assert_eq!(sent.query_value("title"), Some("star"));

    block_on(catalog.search("  "));
    assert_eq!(catalog.state().query, CatalogQuery::All);
    assert_eq!(catalog.state().games.len(), 4);

    block_on(catalog.filter_genre(Some("RPG")));
    assert_eq!(catalog.state().selected_genre(), Some("RPG"));
    assert_eq!(catalog.state().games.len(), 1);
    block_on(catalog.filter_genre(None));

    catalog.sort(SortKey::PriceDesc);
    assert_eq!(catalog.state().games[0].title, "Disco Elysium");
    catalog.sort(SortKey::Newest);
    assert_eq!(catalog.state().games[0].title, "Stardew Valley");
}

#[test]
fn game_page_distinguishes_not_found() {
    let backend = FakeBackend::seeded();
    let client = StoreClient::new(backend.clone());
    let id = backend.game_id("Hades").unwrap();
    assert!(matches!(block_on(fetch_game(&client, id)), GameLookup::Found(g) if g.title == "Hades"));
    assert_eq!(block_on(fetch_game(&client, 9_999)), GameLookup::NotFound);

    backend.respond_once(Method::Get, &format!("/games/{id}"), 500, json!({}));
    assert!(matches!(block_on(fetch_game(&client, id)), GameLookup::Failed(_)));
}

#[test]
fn add_to_cart_requires_a_session() {
    let backend = FakeBackend::seeded();
    let mut catalog = CatalogController::new(StoreClient::new(backend.clone()));
    let id = backend.game_id("Hades").unwrap();
    assert!(matches!(block_on(catalog.add_to_cart(id)), AddOutcome::Failed(_)));

    backend.sign_in_as("shopper@example.com");
    assert_eq!(block_on(catalog.add_to_cart(id)), AddOutcome::Added(Some(1)));
    assert!(catalog.state().adding.is_empty());

    let sold_out = backend.game_id("Disco Elysium").unwrap();
    assert_eq!(block_on(catalog.add_to_cart(sold_out)), AddOutcome::StockLimited(0));
}
