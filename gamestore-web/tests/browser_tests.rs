#![cfg(target_arch = "wasm32")]

use gamestore_core::constants::SESSION_STORAGE_KEY;
use gamestore_core::{Role, SessionCache, SessionStorage, SessionUser};
use gamestore_web::storage::LocalSessionStorage;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn shopper() -> SessionUser {
    SessionUser {
        id: 7,
        username: String::from("pat"),
        email: String::from("pat@example.com"),
        role: Role::User,
    }
}

#[wasm_bindgen_test]
fn session_snapshot_survives_a_reload() {
    LocalSessionStorage.remove(SESSION_STORAGE_KEY);
    let cache = SessionCache::load(LocalSessionStorage);
    assert_eq!(cache.read(), None);
    cache.set(shopper());

    let reloaded = SessionCache::load(LocalSessionStorage);
    assert_eq!(reloaded.read(), Some(shopper()));
    reloaded.clear();
    assert_eq!(LocalSessionStorage.read(SESSION_STORAGE_KEY), None);
}

#[wasm_bindgen_test]
fn corrupt_snapshot_reads_as_signed_out() {
    LocalSessionStorage.write(SESSION_STORAGE_KEY, "{not json");
    let cache = SessionCache::load(LocalSessionStorage);
    assert_eq!(cache.read(), None);
    LocalSessionStorage.remove(SESSION_STORAGE_KEY);
}
