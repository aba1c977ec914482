use super::{AdminEntity, Mutation};
use crate::api::{StoreClient, Transport};
use crate::catalog::Game;
use crate::error::ApiError;
use crate::forms::{FieldErrors, FormModel, parse_count, parse_price, require};
use crate::money::Money;
use serde::Serialize;

impl AdminEntity for Game {
    const NOUN: &'static str = "game";

    fn id(&self) -> i64 {
        self.game_id
    }

    fn matches_term(&self, term: &str) -> bool {
        Game::matches_term(self, term)
    }

    fn category(&self) -> String {
        self.genre.clone()
    }
}

/// Body of `POST /admin/games` and `PUT /admin/games/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GamePayload {
    pub title: String,
    pub description: String,
    pub price: Money,
    pub genre: String,
    pub platform: String,
    pub stock_quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gameicon: Option<String>,
}

/// Add/Edit game modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub genre: String,
    pub platform: String,
    pub stock_quantity: String,
    pub gameicon: String,
}

impl GameForm {
    /// Prefill for editing an existing game.
    #[must_use]
    pub fn from_game(game: &Game) -> Self {
        Self {
            title: game.title.clone(),
            description: game.description.clone(),
            price: game.price.to_decimal_string(),
            genre: game.genre.clone(),
            platform: game.platform.clone(),
            stock_quantity: game.stock_quantity.to_string(),
            gameicon: game.gameicon.clone().unwrap_or_default(),
        }
    }
}

impl FormModel for GameForm {
    type Payload = GamePayload;

    fn set_field(&mut self, field: &str, value: String) {
        match field {
            "title" => self.title = value,
            "description" => self.description = value,
            "price" => self.price = value,
            "genre" => self.genre = value,
            "platform" => self.platform = value,
            "stock_quantity" => self.stock_quantity = value,
            "gameicon" => self.gameicon = value,
            _ => log::warn!("game form has no field `{field}`"),
        }
    }

    fn validate(&self) -> Result<GamePayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "title", &self.title, "Title is required");
        require(&mut errors, "genre", &self.genre, "Genre is required");
        require(&mut errors, "platform", &self.platform, "Platform is required");
        let price = parse_price(&mut errors, "price", &self.price);
        let stock = parse_count(&mut errors, "stock_quantity", &self.stock_quantity);
        let icon = self.gameicon.trim();
        errors.into_result(|| GamePayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: price.unwrap_or_default(),
            genre: self.genre.trim().to_string(),
            platform: self.platform.trim().to_string(),
            stock_quantity: stock.unwrap_or_default(),
            gameicon: (!icon.is_empty()).then(|| icon.to_string()),
        })
    }
}

/// Create (`editing == None`) or update a game.
///
/// # Errors
/// Returns the backend rejection or a transport failure.
pub async fn save_game<T: Transport>(
    client: &StoreClient<T>,
    editing: Option<i64>,
    payload: &GamePayload,
) -> Result<Mutation<Game>, ApiError> {
    match editing {
        Some(id) => client
            .update_game(id, payload)
            .await
            .map(|row| Mutation::Updated(id, row)),
        None => client.create_game(payload).await.map(Mutation::Created),
    }
}
