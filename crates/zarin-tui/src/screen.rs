//! Tab bar entries and their number keys.

use zarin_core::Route;

use crate::action::Action;

/// The five tab-bar destinations, reachable with keys `1`–`5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,     // 1
    Cart,     // 2
    Account,  // 3 (login, or logout when signed in)
    Register, // 4
    Admin,    // 5
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Self::Home,
        Self::Cart,
        Self::Account,
        Self::Register,
        Self::Admin,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::Home => 1,
            Self::Cart => 2,
            Self::Account => 3,
            Self::Register => 4,
            Self::Admin => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.number() == n)
    }

    /// The tab highlighted while `route` is showing, if any.
    pub fn of(route: &Route) -> Option<Self> {
        match route {
            Route::Home => Some(Self::Home),
            Route::Cart => Some(Self::Cart),
            Route::Login => Some(Self::Account),
            Route::Register => Some(Self::Register),
            Route::Admin { .. } => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn label(self, logged_in: bool) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Cart => "Cart",
            Self::Account if logged_in => "Logout",
            Self::Account => "Login",
            Self::Register => "Register",
            Self::Admin => "Admin",
        }
    }

    /// What pressing this tab's number does.
    pub fn action(self, logged_in: bool) -> Action {
        match self {
            Self::Home => Action::Navigate(Route::Home),
            Self::Cart => Action::Navigate(Route::Cart),
            Self::Account if logged_in => Action::Logout,
            Self::Account => Action::Navigate(Route::Login),
            Self::Register => Action::Navigate(Route::Register),
            Self::Admin => Action::Navigate(Route::Admin { section: None }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for tab in Tab::ALL {
            assert_eq!(Tab::from_number(tab.number()), Some(tab));
        }
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(6), None);
    }

    #[test]
    fn account_tab_logs_out_when_signed_in() {
        assert!(matches!(
            Tab::Account.action(false),
            Action::Navigate(Route::Login)
        ));
        assert!(matches!(Tab::Account.action(true), Action::Logout));
        assert_eq!(Tab::Account.label(true), "Logout");
    }

    #[test]
    fn admin_subpaths_highlight_admin() {
        assert_eq!(Tab::of(&Route::parse("/admin/products")), Some(Tab::Admin));
        assert_eq!(Tab::of(&Route::parse("/product/3")), None);
    }
}
