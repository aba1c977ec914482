use super::{AdminEntity, Mutation};
use crate::api::{StoreClient, Transport};
use crate::constants::LOW_STOCK_THRESHOLD;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(alias = "id")]
    pub game_id: i64,
    pub title: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub stock_quantity: u32,
}

impl InventoryRow {
    #[must_use]
    pub const fn stock_level(&self) -> &'static str {
        match self.stock_quantity {
            0 => "Out of stock",
            n if n <= LOW_STOCK_THRESHOLD => "Low stock",
            _ => "In stock",
        }
    }
}

impl AdminEntity for InventoryRow {
    const NOUN: &'static str = "stock level";

    fn id(&self) -> i64 {
        self.game_id
    }

    fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.platform.to_lowercase().contains(&needle)
    }

    fn category(&self) -> String {
        self.stock_level().to_string()
    }
}

/// Uncommitted stock edits, one per row. Nothing is sent until save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockDrafts {
    drafts: BTreeMap<i64, u32>,
}

impl StockDrafts {
    /// Value shown in the row's input: the draft, else the saved stock.
    #[must_use]
    pub fn value(&self, row: &InventoryRow) -> u32 {
        self.drafts
            .get(&row.game_id)
            .copied()
            .unwrap_or(row.stock_quantity)
    }

    #[must_use]
    pub fn is_dirty(&self, row: &InventoryRow) -> bool {
        self.drafts
            .get(&row.game_id)
            .is_some_and(|draft| *draft != row.stock_quantity)
    }

    pub fn increment(&mut self, row: &InventoryRow) {
        let next = self.value(row).saturating_add(1);
        self.drafts.insert(row.game_id, next);
    }

    /// Decrement, never below zero.
    pub fn decrement(&mut self, row: &InventoryRow) {
        let next = self.value(row).saturating_sub(1);
        self.drafts.insert(row.game_id, next);
    }

    /// Direct typing. Negative numbers clamp to zero; non-numbers are ignored.
    pub fn set_input(&mut self, row: &InventoryRow, text: &str) {
        let Ok(typed) = text.trim().parse::<i64>() else {
            return;
        };
        let clamped = u32::try_from(typed.max(0)).unwrap_or(u32::MAX);
        self.drafts.insert(row.game_id, clamped);
    }

    pub fn discard(&mut self, game_id: i64) {
        self.drafts.remove(&game_id);
    }

    #[must_use]
    pub fn draft(&self, game_id: i64) -> Option<u32> {
        self.drafts.get(&game_id).copied()
    }
}

/// Save one row's stock. Without an echoed row the known row is patched.
///
/// # Errors
/// Returns the backend rejection or a transport failure.
pub async fn save_stock<T: Transport>(
    client: &StoreClient<T>,
    row: &InventoryRow,
    stock_quantity: u32,
) -> Result<Mutation<InventoryRow>, ApiError> {
    let echoed = client.update_stock(row.game_id, stock_quantity).await?;
    let saved = echoed.unwrap_or_else(|| InventoryRow {
        stock_quantity,
        ..row.clone()
    });
    Ok(Mutation::Updated(row.game_id, Some(saved)))
}
