//! Reducer wrappers binding the core screen state to Yew's `use_reducer`.
use gamestore_core::{
    AdminEntity, AdminList, ApiError, CartEvent, CartState, CatalogQuery, CatalogState, Game,
    Mutation, NoticeKind, Notices, OrdersEvent, OrdersState, Reconcile, Settled, SortKey,
};
use std::rc::Rc;
use yew::Reducible;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartModel(pub CartState);

impl Reducible for CartModel {
    type Action = CartEvent;

    fn reduce(self: Rc<Self>, action: CartEvent) -> Rc<Self> {
        let mut next = (*self).clone();
        next.0.apply(action);
        Rc::new(next)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrdersModel(pub OrdersState);

impl Reducible for OrdersModel {
    type Action = OrdersEvent;

    fn reduce(self: Rc<Self>, action: OrdersEvent) -> Rc<Self> {
        let mut next = (*self).clone();
        next.0.apply(action);
        Rc::new(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogAction {
    LoadStarted(CatalogQuery),
    Loaded(Result<Vec<Game>, String>),
    Genres(Vec<String>),
    Sort(SortKey),
    AddStarted(i64),
    AddFinished(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogModel(pub CatalogState);

impl Reducible for CatalogModel {
    type Action = CatalogAction;

    fn reduce(self: Rc<Self>, action: CatalogAction) -> Rc<Self> {
        let mut next = (*self).clone();
        let state = &mut next.0;
        match action {
            CatalogAction::LoadStarted(query) => state.begin_load(query),
            CatalogAction::Loaded(result) => state.finish_load(result),
            CatalogAction::Genres(genres) => state.set_genres(genres),
            CatalogAction::Sort(key) => state.set_sort(key),
            CatalogAction::AddStarted(id) => {
                state.adding.insert(id);
            }
            CatalogAction::AddFinished(id) => {
                state.adding.remove(&id);
            }
        }
        Rc::new(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeAction {
    Push(NoticeKind, String),
    Dismiss(u64),
}

/// Toasts for screens whose core state carries no notices of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeModel(pub Notices);

impl Reducible for NoticeModel {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: NoticeAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NoticeAction::Push(kind, text) => {
                next.0.push(kind, text);
            }
            NoticeAction::Dismiss(id) => next.0.dismiss(id),
        }
        Rc::new(next)
    }
}

pub enum AdminAction<E> {
    /// Fetch the list again (retry button or explicit refresh).
    Refresh,
    LoadStarted,
    Loaded(Result<Vec<E>, ApiError>),
    Term(String),
    Category(Option<String>),
    RequestDelete(i64),
    CancelDelete,
    Begin(Option<i64>),
    Settle(Option<i64>, Result<Mutation<E>, ApiError>),
    /// Clear a row's busy mark when the failure is reported elsewhere (form banner).
    Release(Option<i64>),
    Dismiss(u64),
}

/// Admin table state plus a counter the screen watches to refetch the list.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminModel<E> {
    pub list: AdminList<E>,
    /// Bumped whenever a mutation settles as `Settled::Reloaded`.
    pub reloads: u32,
    pub last: Option<Settled>,
}

impl<E> Default for AdminModel<E> {
    fn default() -> Self {
        Self {
            list: AdminList::default(),
            reloads: 0,
            last: None,
        }
    }
}

impl<E: AdminEntity> AdminModel<E> {
    #[must_use]
    pub fn with_reconcile(reconcile: Reconcile) -> Self {
        Self {
            list: AdminList::with_reconcile(reconcile),
            ..Self::default()
        }
    }
}

impl<E: AdminEntity> Reducible for AdminModel<E> {
    type Action = AdminAction<E>;

    fn reduce(self: Rc<Self>, action: AdminAction<E>) -> Rc<Self> {
        let mut next = (*self).clone();
        let list = &mut next.list;
        match action {
            AdminAction::Refresh => next.reloads += 1,
            AdminAction::LoadStarted => list.begin_load(),
            AdminAction::Loaded(result) => list.finish_load(result),
            AdminAction::Term(term) => list.set_term(term),
            AdminAction::Category(category) => list.set_category(category),
            AdminAction::RequestDelete(id) => list.request_delete(id),
            AdminAction::CancelDelete => list.cancel_delete(),
            AdminAction::Begin(key) => list.begin(key),
            AdminAction::Settle(key, result) => {
                let settled = list.settle(key, result);
                if settled == Settled::Reloaded {
                    next.reloads += 1;
                }
                next.last = Some(settled);
            }
            AdminAction::Release(key) => {
                if let Some(id) = key {
                    list.in_flight.remove(&id);
                }
            }
            AdminAction::Dismiss(id) => list.notices.dismiss(id),
        }
        Rc::new(next)
    }
}
