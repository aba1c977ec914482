//! Game catalog records and the browse view state.
use crate::api::{StoreClient, Transport};
use crate::cart::{AddOutcome, add_to_cart};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(alias = "id")]
    pub game_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub gameicon: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Game {
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.genre.to_lowercase().contains(&needle)
            || self.platform.to_lowercase().contains(&needle)
    }
}

/// `/games/genres` answers either `["RPG", …]` or `[{"genre": "RPG"}, …]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum GenreEntry {
    Name(String),
    Row { genre: String },
}

impl GenreEntry {
    pub(crate) fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Row { genre: name } => name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    TitleAsc,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::TitleAsc, Self::PriceAsc, Self::PriceDesc, Self::Newest];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TitleAsc => "Title (A-Z)",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::Newest => "Newest",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TitleAsc => "title",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "newest",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.key() == key)
            .unwrap_or_default()
    }

    pub fn apply(self, games: &mut [Game]) {
        match self {
            Self::TitleAsc => games.sort_by_key(|g| g.title.to_lowercase()),
            Self::PriceAsc => games.sort_by_key(|g| g.price),
            Self::PriceDesc => games.sort_by_key(|g| Reverse(g.price)),
            // ISO timestamps order lexically; missing dates sink to the end.
            Self::Newest => games.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
    }
}

/// Which backend listing the grid currently reflects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogQuery {
    #[default]
    All,
    Search(String),
    Genre(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub games: Vec<Game>,
    pub genres: Vec<String>,
    pub query: CatalogQuery,
    pub sort: SortKey,
    pub loading: bool,
    pub error: Option<String>,
    /// Game ids with an add-to-cart request outstanding.
    pub adding: std::collections::BTreeSet<i64>,
}

impl CatalogState {
    pub fn begin_load(&mut self, query: CatalogQuery) {
        self.query = query;
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Game>, String>) {
        self.loading = false;
        match result {
            Ok(mut games) => {
                self.sort.apply(&mut games);
                self.games = games;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }

    pub fn set_genres(&mut self, genres: Vec<String>) {
        let mut genres: Vec<String> = genres
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
        genres.sort();
        genres.dedup();
        self.genres = genres;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        sort.apply(&mut self.games);
    }

    /// Selected genre chip, if the grid is genre-filtered.
    #[must_use]
    pub fn selected_genre(&self) -> Option<&str> {
        match &self.query {
            CatalogQuery::Genre(genre) => Some(genre.as_str()),
            _ => None,
        }
    }
}

/// Outcome of opening a single game page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameLookup {
    Found(Game),
    NotFound,
    Failed(String),
}

/// Fetch the listing behind `query`. A blank search or genre means the full list.
pub async fn fetch_games<T: Transport>(
    client: &StoreClient<T>,
    query: &CatalogQuery,
) -> Result<Vec<Game>, String> {
    let result = match query {
        CatalogQuery::Search(term) if !term.trim().is_empty() => {
            client.search_games(term.trim()).await
        }
        CatalogQuery::Genre(genre) if !genre.trim().is_empty() => {
            client.games_by_genre(genre.trim()).await
        }
        _ => client.games().await,
    };
    result.map_err(|err| {
        log::error!("failed to load games: {err}");
        err.user_message("Failed to load games")
    })
}

/// Genre chips are optional; a failed fetch leaves them empty.
pub async fn fetch_genres<T: Transport>(client: &StoreClient<T>) -> Vec<String> {
    client.genres().await.unwrap_or_else(|err| {
        log::warn!("genre list unavailable: {err}");
        Vec::new()
    })
}

pub async fn fetch_game<T: Transport>(client: &StoreClient<T>, game_id: i64) -> GameLookup {
    match client.game(game_id).await {
        Ok(game) => GameLookup::Found(game),
        Err(err) if err.is_not_found() => GameLookup::NotFound,
        Err(err) => {
            log::error!("failed to load game {game_id}: {err}");
            GameLookup::Failed(err.user_message("Failed to load game details"))
        }
    }
}

/// Catalog grid bound to a client.
pub struct CatalogController<T> {
    client: StoreClient<T>,
    state: CatalogState,
}

impl<T: Transport> CatalogController<T> {
    #[must_use]
    pub fn new(client: StoreClient<T>) -> Self {
        Self {
            client,
            state: CatalogState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Initial load: full list plus genre chips.
    pub async fn load(&mut self) {
        let genres = fetch_genres(&self.client).await;
        self.state.set_genres(genres);
        self.run(CatalogQuery::All).await;
    }

    /// Settled (post-debounce) search term; blank restores the full list.
    pub async fn search(&mut self, term: &str) {
        let query = if term.trim().is_empty() {
            CatalogQuery::All
        } else {
            CatalogQuery::Search(term.trim().to_string())
        };
        self.run(query).await;
    }

    pub async fn filter_genre(&mut self, genre: Option<&str>) {
        let query = genre
            .filter(|g| !g.trim().is_empty())
            .map_or(CatalogQuery::All, |g| CatalogQuery::Genre(g.trim().to_string()));
        self.run(query).await;
    }

    pub fn sort(&mut self, key: SortKey) {
        self.state.set_sort(key);
    }

    pub async fn add_to_cart(&mut self, game_id: i64) -> AddOutcome {
        if !self.state.adding.insert(game_id) {
            return AddOutcome::Failed(String::from("Already adding this game"));
        }
        let outcome = add_to_cart(&self.client, game_id, 1).await;
        self.state.adding.remove(&game_id);
        outcome
    }

    async fn run(&mut self, query: CatalogQuery) {
        self.state.begin_load(query.clone());
        let result = fetch_games(&self.client, &query).await;
        self.state.finish_load(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: i64, title: &str, price: &str, created: &str) -> Game {
        Game {
            game_id: id,
            title: title.to_string(),
            description: String::new(),
            price: Money::parse(price).unwrap(),
            genre: String::from("RPG"),
            platform: String::from("PC"),
            stock_quantity: 5,
            gameicon: None,
            created_at: Some(created.to_string()),
        }
    }

    #[test]
    fn decodes_backend_game_row() {
        let json = r#"{"game_id": 3, "title": "Stardew Valley", "price": "0.00",
            "genre": "Simulation", "platform": "PC", "stock_quantity": 12,
            "gameicon": "https://cdn.example.com/sv.png", "created_at": "2024-03-01T10:00:00Z"}"#;
        let game: Game = serde_json::from_str(json).unwrap();
        assert!(game.is_free());
        assert!(game.in_stock());
        assert_eq!(game.price.display_price(), "Free");
    }

    #[test]
    fn sorts_by_each_key() {
        let mut games = vec![
            game(1, "b-side", "10.00", "2024-01-01"),
            game(2, "Alpha", "5.00", "2024-06-01"),
            game(3, "Charlie", "20.00", "2023-01-01"),
        ];
        SortKey::TitleAsc.apply(&mut games);
        assert_eq!(games[0].game_id, 2);
        SortKey::PriceDesc.apply(&mut games);
        assert_eq!(games[0].game_id, 3);
        SortKey::PriceAsc.apply(&mut games);
        assert_eq!(games[0].game_id, 2);
        SortKey::Newest.apply(&mut games);
        assert_eq!(games[0].game_id, 2);
        assert_eq!(games[2].game_id, 3);
    }

    #[test]
    fn genres_are_trimmed_sorted_and_unique() {
        let mut state = CatalogState::default();
        state.set_genres(vec![
            String::from("RPG"),
            String::from(" Action "),
            String::from("RPG"),
            String::new(),
        ]);
        assert_eq!(state.genres, vec!["Action", "RPG"]);
        let entries: Vec<GenreEntry> =
            serde_json::from_str(r#"["Puzzle", {"genre": "Racing"}]"#).unwrap();
        let names: Vec<String> = entries.into_iter().map(GenreEntry::into_name).collect();
        assert_eq!(names, vec!["Puzzle", "Racing"]);
    }

    #[test]
    fn failed_load_keeps_previous_games() {
        let mut state = CatalogState::default();
        state.begin_load(CatalogQuery::All);
        state.finish_load(Ok(vec![game(1, "Alpha", "1.00", "2024-01-01")]));
        state.begin_load(CatalogQuery::Genre(String::from("RPG")));
        assert_eq!(state.selected_genre(), Some("RPG"));
        state.finish_load(Err(String::from("offline")));
        assert_eq!(state.games.len(), 1);
        assert_eq!(state.error.as_deref(), Some("offline"));
        assert!(!state.loading);
    }

    #[test]
    fn sort_key_round_trips_through_select_values() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_key(key.key()), key);
        }
        assert_eq!(SortKey::from_key("bogus"), SortKey::TitleAsc);
    }
}
