//! Game Store core
//!
//! Platform-agnostic storefront client: the backend's HTTP contract, the
//! data model, and the state behind every screen (catalog, cart and
//! checkout, order history, admin tables, session guard). No browser or UI
//! dependencies; hosts supply a [`Transport`] and a [`SessionStorage`].

pub mod admin;
pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod constants;
pub mod epoch;
pub mod error;
pub mod forms;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod money;
pub mod notice;
pub mod orders;
pub mod session;

// Re-export commonly used types
pub use admin::{
    AdminEntity, AdminList, AdminUser, GameForm, GamePayload, InventoryRow, Mutation,
    OrderStatusForm, Reconcile, Settled, StockDrafts, UserForm, UserPayload,
};
pub use api::{ApiRequest, ApiResponse, Method, StoreClient, Transport};
pub use auth::{AuthStatus, Credentials, LoginForm, NewAccount, Role, SessionUser, SignupForm};
pub use cart::{
    AddOutcome, CartController, CartEvent, CartLine, CartSnapshot, CartState, LineOutcome,
    cart_total, stock_notice,
};
pub use catalog::{CatalogController, CatalogQuery, CatalogState, Game, GameLookup, SortKey};
pub use checkout::{CheckoutPhase, PaymentMethod};
pub use epoch::{Debounce, Ticket, ViewEpoch};
pub use error::ApiError;
pub use forms::{FieldErrors, FormModel, FormState};
pub use money::{Money, MoneyError};
pub use notice::{Notice, NoticeKind, NoticeTimers, Notices};
pub use orders::{
    Order, OrderItem, OrderListing, OrderStatus, OrdersController, OrdersEvent, OrdersState,
    SearchPlan, StatusChip, plan_search,
};
pub use session::{
    GuardDecision, GuardOutcome, MemorySessionStorage, RouteAccess, SessionCache,
    SessionStorage, SnapshotAction, check_access, decide_access, sign_out,
};
