//! Admin management screens (games, users, orders, inventory).
//!
//! All four screens share one list model: load on mount, filter by free
//! text and one category, mutate one row at a time, confirm before delete.
//! Each mutation goes through [`AdminList::commit`], which applies the
//! request's outcome according to the list's [`Reconcile`] strategy.
pub mod games;
pub mod inventory;
pub mod orders;
pub mod users;

pub use games::{GameForm, GamePayload};
pub use inventory::{InventoryRow, StockDrafts};
pub use orders::OrderStatusForm;
pub use users::{AdminUser, UserForm, UserPayload};

use crate::error::ApiError;
use crate::notice::Notices;
use std::collections::BTreeSet;
use std::future::Future;

/// A row of an admin table.
pub trait AdminEntity: Clone + PartialEq {
    /// Singular noun used in notifications ("game", "user", …).
    const NOUN: &'static str;

    fn id(&self) -> i64;

    fn matches_term(&self, term: &str) -> bool;

    /// Value of the screen's categorical filter (genre, role, status, …).
    fn category(&self) -> String;
}

/// How a successful mutation is folded back into the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reconcile {
    /// Trust the response: prepend created rows, replace updated rows by id,
    /// drop deleted ids.
    #[default]
    Patch,
    /// Fetch the whole list again.
    Reload,
}

/// What a successful admin request did. `None` rows mean the backend did not
/// echo the affected row, which forces a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<E> {
    Created(Option<E>),
    Updated(i64, Option<E>),
    Deleted(i64),
}

impl<E> Mutation<E> {
    const fn verb(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(..) => "updated",
            Self::Deleted(_) => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Patched,
    Reloaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminList<E> {
    pub items: Vec<E>,
    pub term: String,
    pub category: Option<String>,
    /// Row ids with a request outstanding.
    pub in_flight: BTreeSet<i64>,
    /// Row awaiting delete confirmation.
    pub pending_delete: Option<i64>,
    pub loading: bool,
    pub error: Option<String>,
    pub notices: Notices,
    pub reconcile: Reconcile,
}

impl<E> Default for AdminList<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            term: String::new(),
            category: None,
            in_flight: BTreeSet::new(),
            pending_delete: None,
            loading: false,
            error: None,
            notices: Notices::default(),
            reconcile: Reconcile::default(),
        }
    }
}

impl<E: AdminEntity> AdminList<E> {
    #[must_use]
    pub fn with_reconcile(reconcile: Reconcile) -> Self {
        Self {
            reconcile,
            ..Self::default()
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Vec<E>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                log::error!("failed to load {}s: {err}", E::NOUN);
                self.error = Some(err.user_message(&format!("Failed to load {}s", E::NOUN)));
            }
        }
    }

    pub async fn load_with<F>(&mut self, fetch: F)
    where
        F: Future<Output = Result<Vec<E>, ApiError>>,
    {
        self.begin_load();
        self.finish_load(fetch.await);
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// `None` (or an empty string) shows every category.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.trim().is_empty());
    }

    /// Rows passing both filters, in list order.
    #[must_use]
    pub fn visible(&self) -> Vec<&E> {
        self.items
            .iter()
            .filter(|row| row.matches_term(&self.term))
            .filter(|row| {
                self.category
                    .as_deref()
                    .is_none_or(|c| row.category().eq_ignore_ascii_case(c))
            })
            .collect()
    }

    /// Distinct category values for the filter dropdown.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<String> = self.items.iter().map(AdminEntity::category).collect();
        set.into_iter().filter(|c| !c.is_empty()).collect()
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&E> {
        self.items.iter().find(|row| row.id() == id)
    }

    #[must_use]
    pub fn is_busy(&self, id: i64) -> bool {
        self.in_flight.contains(&id)
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Mark a row busy before its request starts.
    pub fn begin(&mut self, key: Option<i64>) {
        if let Some(id) = key {
            self.in_flight.insert(id);
        }
    }

    /// Fold a finished request into the list.
    ///
    /// `Settled::Reloaded` asks the caller to fetch the list again; the
    /// items are left untouched in that case.
    pub fn settle(&mut self, key: Option<i64>, result: Result<Mutation<E>, ApiError>) -> Settled {
        if let Some(id) = key {
            self.in_flight.remove(&id);
        }
        let mutation = match result {
            Ok(mutation) => mutation,
            Err(err) => {
                let message = err.user_message(&format!("Failed to save {}", E::NOUN));
                log::error!("{} mutation failed: {err}", E::NOUN);
                self.notices.error(message.clone());
                return Settled::Failed(message);
            }
        };
        let noun = E::NOUN;
        let verb = mutation.verb();
        let mut text = format!("{noun} {verb} successfully");
        text[..1].make_ascii_uppercase();
        self.notices.success(text);
        if self.reconcile == Reconcile::Reload {
            return Settled::Reloaded;
        }
        match mutation {
            Mutation::Created(Some(row)) => {
                self.items.insert(0, row);
                Settled::Patched
            }
            Mutation::Updated(id, Some(row)) => {
                match self.items.iter_mut().find(|r| r.id() == id) {
                    Some(slot) => *slot = row,
                    None => self.items.insert(0, row),
                }
                Settled::Patched
            }
            Mutation::Deleted(id) => {
                self.items.retain(|r| r.id() != id);
                Settled::Patched
            }
            Mutation::Created(None) | Mutation::Updated(_, None) => Settled::Reloaded,
        }
    }

    /// Run one mutation and reconcile: patch in place, or refetch with `reload`.
    pub async fn commit<F, R, RF>(&mut self, key: Option<i64>, request: F, reload: R) -> Settled
    where
        F: Future<Output = Result<Mutation<E>, ApiError>>,
        R: FnOnce() -> RF,
        RF: Future<Output = Result<Vec<E>, ApiError>>,
    {
        self.begin(key);
        let settled = self.settle(key, request.await);
        if settled == Settled::Reloaded {
            self.load_with(reload()).await;
        }
        settled
    }

    /// Send the confirmed delete. Without a pending target nothing is sent.
    pub async fn confirm_delete<S, SF, R, RF>(&mut self, send: S, reload: R) -> Option<Settled>
    where
        S: FnOnce(i64) -> SF,
        SF: Future<Output = Result<(), ApiError>>,
        R: FnOnce() -> RF,
        RF: Future<Output = Result<Vec<E>, ApiError>>,
    {
        let id = self.pending_delete.take()?;
        let request = async move { send(id).await.map(|()| Mutation::Deleted(id)) };
        Some(self.commit(Some(id), request, reload).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
        kind: &'static str,
    }

    impl AdminEntity for Row {
        const NOUN: &'static str = "row";

        fn id(&self) -> i64 {
            self.id
        }

        fn matches_term(&self, term: &str) -> bool {
            self.name.contains(term)
        }

        fn category(&self) -> String {
            self.kind.to_string()
        }
    }

    fn list() -> AdminList<Row> {
        let mut list = AdminList::default();
        list.finish_load(Ok(vec![
            Row { id: 1, name: "alpha", kind: "a" },
            Row { id: 2, name: "beta", kind: "b" },
        ]));
        list
    }

    #[test]
    fn patch_strategy_edits_in_place() {
        let mut list = list();
        let created = Row { id: 3, name: "gamma", kind: "a" };
        assert_eq!(list.settle(None, Ok(Mutation::Created(Some(created)))), Settled::Patched);
        assert_eq!(list.items[0].id, 3);

        let renamed = Row { id: 1, name: "alpha2", kind: "a" };
        list.begin(Some(1));
        assert_eq!(list.settle(Some(1), Ok(Mutation::Updated(1, Some(renamed)))), Settled::Patched);
        assert_eq!(list.get(1).map(|r| r.name), Some("alpha2"));
        assert!(list.in_flight.is_empty());

        assert_eq!(list.settle(Some(2), Ok(Mutation::Deleted(2))), Settled::Patched);
        assert!(list.get(2).is_none());
        assert_eq!(list.notices.latest().map(|n| n.text.as_str()), Some("Row deleted successfully"));
    }

    #[test]
    fn missing_echo_or_reload_strategy_requests_reload() {
        let mut list = list();
        assert_eq!(list.settle(None, Ok(Mutation::Created(None))), Settled::Reloaded);
        let mut reload = AdminList::<Row>::with_reconcile(Reconcile::Reload);
        assert_eq!(reload.settle(Some(1), Ok(Mutation::Deleted(1))), Settled::Reloaded);
    }

    #[test]
    fn failures_keep_rows_and_surface_the_message() {
        let mut list = list();
        list.begin(Some(2));
        let err = ApiError::from_status(400, &serde_json::json!({"message": "Title taken"}));
        let settled = list.settle(Some(2), Err(err));
        assert_eq!(settled, Settled::Failed(String::from("Title taken")));
        assert_eq!(list.items.len(), 2);
        assert!(!list.is_busy(2));
    }

    #[test]
    fn filters_combine_term_and_category() {
        let mut list = list();
        list.set_category(Some(String::from("B")));
        assert_eq!(list.visible().len(), 1);
        list.set_term("alp");
        assert!(list.visible().is_empty());
        list.set_category(Some(String::new()));
        assert_eq!(list.visible().len(), 1);
        assert_eq!(list.categories(), vec!["a", "b"]);
    }

    #[test]
    fn cancel_discards_pending_target() {
        let mut list = list();
        list.request_delete(1);
        list.cancel_delete();
        assert_eq!(list.pending_delete, None);
    }
}
