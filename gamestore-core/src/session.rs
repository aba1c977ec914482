//! Route gating and the persisted session snapshot.
//!
//! The guard runs once per protected navigation: one `/auth/status` call,
//! one decision, no retries. The snapshot is a cache of the last known user
//! so a flaky network does not bounce a signed-in user to the login page.
use crate::api::{StoreClient, Transport};
use crate::auth::{AuthStatus, Role, SessionUser};
use crate::constants::SESSION_STORAGE_KEY;
use crate::error::ApiError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Any signed-in account.
    Authenticated,
    /// Signed-in shoppers; admins are sent to their dashboard.
    UserOnly,
    AdminOnly,
}

impl RouteAccess {
    #[must_use]
    pub const fn admits(self, role: Role) -> bool {
        match self {
            Self::Public | Self::Authenticated => true,
            Self::UserOnly => !role.is_admin(),
            Self::AdminOnly => role.is_admin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    RedirectToEntry,
    /// Signed in, wrong route family: go to the home of this role.
    RedirectToHome(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotAction {
    Overwrite(SessionUser),
    Clear,
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub outcome: GuardOutcome,
    pub snapshot: SnapshotAction,
}

fn role_outcome(access: RouteAccess, role: Role) -> GuardOutcome {
    if access.admits(role) {
        GuardOutcome::Allow
    } else {
        GuardOutcome::RedirectToHome(role)
    }
}

/// Decide a navigation from the status check and the persisted snapshot.
///
/// Any response that does not confirm a session (including non-2xx) means
/// signed out. Only a transport failure falls back to the snapshot.
#[must_use]
pub fn decide_access(
    access: RouteAccess,
    status: &Result<AuthStatus, ApiError>,
    snapshot: Option<&SessionUser>,
) -> GuardDecision {
    if access == RouteAccess::Public {
        return GuardDecision {
            outcome: GuardOutcome::Allow,
            snapshot: SnapshotAction::Keep,
        };
    }
    match status {
        Ok(status) => match status.authenticated_user() {
            Some(user) => GuardDecision {
                outcome: role_outcome(access, user.role),
                snapshot: SnapshotAction::Overwrite(user.clone()),
            },
            None => GuardDecision {
                outcome: GuardOutcome::RedirectToEntry,
                snapshot: SnapshotAction::Clear,
            },
        },
        Err(err) if err.is_transport() => match snapshot {
            Some(user) => {
                log::warn!("session check unreachable, using cached session: {err}");
                GuardDecision {
                    outcome: role_outcome(access, user.role),
                    snapshot: SnapshotAction::Keep,
                }
            }
            None => GuardDecision {
                outcome: GuardOutcome::RedirectToEntry,
                snapshot: SnapshotAction::Keep,
            },
        },
        Err(_) => GuardDecision {
            outcome: GuardOutcome::RedirectToEntry,
            snapshot: SnapshotAction::Clear,
        },
    }
}

/// Key-value persistence for the session snapshot.
/// Platform-specific implementations should provide this.
pub trait SessionStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: SessionStorage + ?Sized> SessionStorage for Rc<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) {
        (**self).write(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// In-process storage for tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl SessionStorage for MemorySessionStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// The single session snapshot: read once at startup, overwritten whole,
/// cleared on logout.
#[derive(Debug)]
pub struct SessionCache<S> {
    storage: S,
    current: RefCell<Option<SessionUser>>,
}

impl<S: SessionStorage> SessionCache<S> {
    /// Load the persisted snapshot. Absent or corrupt values mean no session.
    pub fn load(storage: S) -> Self {
        let current = storage
            .read(SESSION_STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    log::warn!("discarding unreadable session snapshot: {err}");
                    None
                }
            });
        Self {
            storage,
            current: RefCell::new(current),
        }
    }

    #[must_use]
    pub fn read(&self) -> Option<SessionUser> {
        self.current.borrow().clone()
    }

    pub fn set(&self, user: SessionUser) {
        match serde_json::to_string(&user) {
            Ok(raw) => self.storage.write(SESSION_STORAGE_KEY, &raw),
            Err(err) => log::warn!("session snapshot not persisted: {err}"),
        }
        self.current.replace(Some(user));
    }

    pub fn clear(&self) {
        self.storage.remove(SESSION_STORAGE_KEY);
        self.current.replace(None);
    }

    pub fn apply(&self, action: SnapshotAction) {
        match action {
            SnapshotAction::Overwrite(user) => self.set(user),
            SnapshotAction::Clear => self.clear(),
            SnapshotAction::Keep => {}
        }
    }
}

/// Run the guard for one navigation and update the snapshot.
pub async fn check_access<T: Transport, S: SessionStorage>(
    client: &StoreClient<T>,
    cache: &SessionCache<S>,
    access: RouteAccess,
) -> GuardOutcome {
    if access == RouteAccess::Public {
        return GuardOutcome::Allow;
    }
    let status = client.auth_status().await;
    let snapshot = cache.read();
    let decision = decide_access(access, &status, snapshot.as_ref());
    cache.apply(decision.snapshot);
    decision.outcome
}

/// Sign out. The local session is cleared whatever the backend answers.
pub async fn sign_out<T: Transport, S: SessionStorage>(
    client: &StoreClient<T>,
    cache: &SessionCache<S>,
) {
    if let Err(err) = client.logout().await {
        log::warn!("logout request failed, clearing session anyway: {err}");
    }
    cache.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: 7,
            username: String::from("rin"),
            email: String::from("rin@example.com"),
            role,
        }
    }

    fn signed_in(role: Role) -> Result<AuthStatus, ApiError> {
        Ok(AuthStatus {
            is_authenticated: true,
            user: Some(user(role)),
        })
    }

    #[test]
    fn authenticated_status_overwrites_snapshot() {
        let decision = decide_access(RouteAccess::UserOnly, &signed_in(Role::User), None);
        assert_eq!(decision.outcome, GuardOutcome::Allow);
        assert_eq!(decision.snapshot, SnapshotAction::Overwrite(user(Role::User)));
    }

    #[test]
    fn wrong_role_goes_home() {
        let admin_on_shop = decide_access(RouteAccess::UserOnly, &signed_in(Role::Admin), None);
        assert_eq!(admin_on_shop.outcome, GuardOutcome::RedirectToHome(Role::Admin));
        let user_on_admin = decide_access(RouteAccess::AdminOnly, &signed_in(Role::User), None);
        assert_eq!(user_on_admin.outcome, GuardOutcome::RedirectToHome(Role::User));
    }

    #[test]
    fn non_success_status_signs_out() {
        let status = Err(ApiError::from_status(401, &serde_json::Value::Null));
        let cached = user(Role::User);
        let decision = decide_access(RouteAccess::UserOnly, &status, Some(&cached));
        assert_eq!(decision.outcome, GuardOutcome::RedirectToEntry);
        assert_eq!(decision.snapshot, SnapshotAction::Clear);
    }

    #[test]
    fn transport_failure_falls_back_to_snapshot() {
        let status = Err(ApiError::Transport(String::from("offline")));
        let cached = user(Role::User);
        let with = decide_access(RouteAccess::UserOnly, &status, Some(&cached));
        assert_eq!(with.outcome, GuardOutcome::Allow);
        assert_eq!(with.snapshot, SnapshotAction::Keep);
        let without = decide_access(RouteAccess::UserOnly, &status, None);
        assert_eq!(without.outcome, GuardOutcome::RedirectToEntry);
    }

    #[test]
    fn cache_treats_corrupt_values_as_signed_out() {
        let storage = MemorySessionStorage::default();
        storage.write(SESSION_STORAGE_KEY, "{not json");
        let cache = SessionCache::load(storage.clone());
        assert_eq!(cache.read(), None);

        cache.set(user(Role::Admin));
        let reloaded = SessionCache::load(storage.clone());
        assert_eq!(reloaded.read().map(|u| u.role), Some(Role::Admin));
        reloaded.clear();
        assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
    }
}
