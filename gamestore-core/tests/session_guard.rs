use futures::executor::block_on;
use gamestore_core::constants::SESSION_STORAGE_KEY;
use gamestore_core::mock::FakeBackend;
use gamestore_core::{
    Credentials, GuardOutcome, MemorySessionStorage, Method, Role, RouteAccess, SessionCache,
    SessionStorage, SessionUser, StoreClient, check_access, sign_out,
};
use serde_json::json;

fn cached_shopper(storage: &MemorySessionStorage) {
    let user = SessionUser {
        id: 1,
        username: String::from("shopper"),
        email: String::from("shopper@example.com"),
        role: Role::User,
    };
    storage.write(SESSION_STORAGE_KEY, &serde_json::to_string(&user).unwrap());
}

#[test]
fn offline_with_snapshot_stays_put() {
    let backend = FakeBackend::seeded();
    backend.set_offline(true);
    let storage = MemorySessionStorage::default();
    cached_shopper(&storage);
    let cache = SessionCache::load(storage.clone());
    let client = StoreClient::new(backend);

    let outcome = block_on(check_access(&client, &cache, RouteAccess::UserOnly));
    assert_eq!(outcome, GuardOutcome::Allow);
    assert!(cache.read().is_some());
    assert!(storage.read(SESSION_STORAGE_KEY).is_some());
}

#[test]
fn offline_without_snapshot_redirects_to_entry() {
    let backend = FakeBackend::seeded();
    backend.set_offline(true);
    let cache = SessionCache::load(MemorySessionStorage::default());
    let client = StoreClient::new(backend);
    let outcome = block_on(check_access(&client, &cache, RouteAccess::UserOnly));
    assert_eq!(outcome, GuardOutcome::RedirectToEntry);
}

#[test]
fn server_error_signs_out_even_with_snapshot() {
    let backend = FakeBackend::seeded();
    backend.respond_once(Method::Get, "/auth/status", 500, json!({"message": "db down"}));
    let storage = MemorySessionStorage::default();
    cached_shopper(&storage);
    let cache = SessionCache::load(storage.clone());
    let client = StoreClient::new(backend);
    let outcome = block_on(check_access(&client, &cache, RouteAccess::UserOnly));
    assert_eq!(outcome, GuardOutcome::RedirectToEntry);
    assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
}

#[test]
fn login_then_role_gating() {
    let backend = FakeBackend::seeded();
    let client = StoreClient::new(backend.clone());
    let cache = SessionCache::load(MemorySessionStorage::default());

    let wrong = block_on(client.login(&Credentials {
        email: String::from("admin@example.com"),
        password: String::from("nope"),
    }))
    .unwrap_err();
    assert_eq!(wrong.server_message(), Some("Invalid email or password"));

    let admin = block_on(client.login(&Credentials {
        email: String::from("admin@example.com"),
        password: String::from("admin"),
    }))
    .unwrap();
    assert!(admin.is_admin());

    let on_shop = block_on(check_access(&client, &cache, RouteAccess::UserOnly));
    assert_eq!(on_shop, GuardOutcome::RedirectToHome(Role::Admin));
    assert_eq!(cache.read().map(|u| u.role), Some(Role::Admin));
    let on_admin = block_on(check_access(&client, &cache, RouteAccess::AdminOnly));
    assert_eq!(on_admin, GuardOutcome::Allow);
    assert_eq!(backend.calls(Method::Get, "/auth/status"), 2);
}

#[test]
fn logout_clears_session_even_when_offline() {
    let backend = FakeBackend::seeded();
    backend.sign_in_as("shopper@example.com");
    let storage = MemorySessionStorage::default();
    cached_shopper(&storage);
    let cache = SessionCache::load(storage.clone());
    let client = StoreClient::new(backend.clone());

    backend.set_offline(true);
    block_on(sign_out(&client, &cache));
    assert_eq!(cache.read(), None);
    assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
    assert_eq!(backend.calls(Method::Get, "/auth/logout"), 1);
}

#[test]
fn public_routes_skip_the_status_check() {
    let backend = FakeBackend::seeded();
    let cache = SessionCache::load(MemorySessionStorage::default());
    let client = StoreClient::new(backend.clone());
    let outcome = block_on(check_access(&client, &cache, RouteAccess::Public));
    assert_eq!(outcome, GuardOutcome::Allow);
    assert!(backend.requests().is_empty());
}
