//! Services and cross-screen state shared by every screen.
use crate::storage::LocalSessionStorage;
use crate::transport::FetchTransport;
use gamestore_core::{SessionCache, SessionUser, StoreClient};
use std::rc::Rc;
use yew::prelude::*;

pub type Client = StoreClient<FetchTransport>;
pub type Session = SessionCache<LocalSessionStorage>;

#[derive(Clone)]
pub struct AppContext {
    pub client: Rc<Client>,
    pub session: Rc<Session>,
    /// Mirrors the session snapshot for rendering.
    pub user: UseStateHandle<Option<SessionUser>>,
    /// Header cart badge.
    pub cart_count: UseStateHandle<u32>,
    /// One-shot message for the login page (e.g. after signup).
    pub flash: UseStateHandle<Option<AttrValue>>,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
            && Rc::ptr_eq(&self.session, &other.session)
            && *self.user == *other.user
            && *self.cart_count == *other.cart_count
            && *self.flash == *other.flash
    }
}

impl AppContext {
    /// Re-read the header badge; shoppers only.
    pub fn refresh_cart_count(&self) {
        if (*self.user).as_ref().is_none_or(SessionUser::is_admin) {
            self.cart_count.set(0);
            return;
        }
        let client = Rc::clone(&self.client);
        let count = self.cart_count.clone();
        yew::platform::spawn_local(async move {
            match client.cart_count().await {
                Ok(n) => count.set(n),
                Err(err) => log::warn!("cart count unavailable: {err}"),
            }
        });
    }
}

#[hook]
pub fn use_app_context() -> AppContext {
    let client = use_memo((), |_| StoreClient::new(FetchTransport::from_env()));
    let session = use_memo((), |_| SessionCache::load(LocalSessionStorage));
    let initial = session.read();
    AppContext {
        client,
        session,
        user: use_state(move || initial),
        cart_count: use_state(|| 0_u32),
        flash: use_state(|| None::<AttrValue>),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ScreenProps {
    pub ctx: AppContext,
}
