use gamestore_core::{Role, RouteAccess};
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/games")]
    Catalog,
    #[at("/games/:id")]
    GameDetail { id: i64 },
    #[at("/cart")]
    Cart,
    #[at("/orders")]
    Orders,
    #[at("/admin/games")]
    AdminGames,
    #[at("/admin/users")]
    AdminUsers,
    #[at("/admin/orders")]
    AdminOrders,
    #[at("/admin/inventory")]
    AdminInventory,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// Who may open this route.
    #[must_use]
    pub const fn access(&self) -> RouteAccess {
        match self {
            Self::Login | Self::Signup | Self::NotFound => RouteAccess::Public,
            Self::Home => RouteAccess::Authenticated,
            Self::Catalog | Self::GameDetail { .. } | Self::Cart | Self::Orders => {
                RouteAccess::UserOnly
            }
            Self::AdminGames | Self::AdminUsers | Self::AdminOrders | Self::AdminInventory => {
                RouteAccess::AdminOnly
            }
        }
    }

    /// Landing page for a signed-in role.
    #[must_use]
    pub const fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminGames,
            Role::User => Self::Catalog,
        }
    }

    /// Where signed-out visitors are sent.
    #[must_use]
    pub const fn entry() -> Self {
        Self::Login
    }

    #[must_use]
    pub const fn is_admin_area(&self) -> bool {
        matches!(self.access(), RouteAccess::AdminOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_has_the_expected_gate() {
        assert_eq!(Route::Login.access(), RouteAccess::Public);
        assert_eq!(Route::NotFound.access(), RouteAccess::Public);
        assert_eq!(Route::GameDetail { id: 3 }.access(), RouteAccess::UserOnly);
        assert_eq!(Route::Orders.access(), RouteAccess::UserOnly);
        assert_eq!(Route::AdminInventory.access(), RouteAccess::AdminOnly);
        assert!(Route::AdminUsers.is_admin_area());
        assert!(!Route::Cart.is_admin_area());
    }

    #[test]
    fn roles_land_on_their_home() {
        assert_eq!(Route::home_for(Role::Admin), Route::AdminGames);
        assert_eq!(Route::home_for(Role::User), Route::Catalog);
        assert!(Route::home_for(Role::User).access().admits(Role::User));
        assert!(Route::home_for(Role::Admin).access().admits(Role::Admin));
    }

    #[test]
    fn paths_round_trip_through_the_recognizer() {
        assert_eq!(Route::recognize("/games/12"), Some(Route::GameDetail { id: 12 }));
        assert_eq!(Route::GameDetail { id: 12 }.to_path(), "/games/12");
        assert_eq!(Route::recognize("/nowhere"), Some(Route::NotFound));
    }
}
