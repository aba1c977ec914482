//! `localStorage` backing for the session snapshot.
use crate::dom::{js_error_message, local_storage};
use gamestore_core::SessionStorage;

/// Session storage over `window.localStorage`. Storage failures (private
/// mode, quota) are logged and treated as an absent value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSessionStorage;

impl SessionStorage for LocalSessionStorage {
    fn read(&self, key: &str) -> Option<String> {
        match local_storage() {
            Ok(storage) => storage.get_item(key).ok().flatten(),
            Err(err) => {
                log::warn!("localStorage unavailable: {}", js_error_message(&err));
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        let result = local_storage().and_then(|storage| storage.set_item(key, value));
        if let Err(err) = result {
            log::warn!("could not persist `{key}`: {}", js_error_message(&err));
        }
    }

    fn remove(&self, key: &str) {
        let result = local_storage().and_then(|storage| storage.remove_item(key));
        if let Err(err) = result {
            log::warn!("could not remove `{key}`: {}", js_error_message(&err));
        }
    }
}
