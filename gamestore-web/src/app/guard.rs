//! Mapping guard outcomes onto routes.
use crate::router::Route;
use gamestore_core::{GuardOutcome, SessionUser};

/// Where a guarded navigation should end up instead, if anywhere.
///
/// The bare root is only a waypoint: once the guard admits it, the visitor
/// goes to their role's landing page.
#[must_use]
pub fn redirect_for(route: &Route, outcome: &GuardOutcome, user: Option<&SessionUser>) -> Option<Route> {
    match outcome {
        GuardOutcome::RedirectToEntry => Some(Route::entry()),
        GuardOutcome::RedirectToHome(role) => Some(Route::home_for(*role)),
        GuardOutcome::Allow if *route == Route::Home => Some(
            user.map_or_else(Route::entry, |u| Route::home_for(u.role)),
        ),
        GuardOutcome::Allow => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamestore_core::Role;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: 1,
            username: String::from("pat"),
            email: String::from("pat@example.com"),
            role,
        }
    }

    #[test]
    fn redirects_follow_the_outcome() {
        assert_eq!(redirect_for(&Route::Cart, &GuardOutcome::Allow, None), None);
        assert_eq!(
            redirect_for(&Route::Cart, &GuardOutcome::RedirectToEntry, None),
            Some(Route::Login)
        );
        assert_eq!(
            redirect_for(&Route::Cart, &GuardOutcome::RedirectToHome(Role::Admin), None),
            Some(Route::AdminGames)
        );
    }

    #[test]
    fn root_sends_each_role_home() {
        let shopper = user(Role::User);
        assert_eq!(
            redirect_for(&Route::Home, &GuardOutcome::Allow, Some(&shopper)),
            Some(Route::Catalog)
        );
        let admin = user(Role::Admin);
        assert_eq!(
            redirect_for(&Route::Home, &GuardOutcome::Allow, Some(&admin)),
            Some(Route::AdminGames)
        );
        assert_eq!(redirect_for(&Route::Home, &GuardOutcome::Allow, None), Some(Route::Login));
    }
}
