//! Routes, the authentication gate and the page view-models.
//!
//! Each page owns its transient form state and status line. Pages talk to
//! the backend only through [`ApiClient`](crate::ApiClient) and render
//! failures with [`Error::user_message`](crate::Error::user_message).

mod dashboard;
mod login;
mod register;
mod sequence;

pub use dashboard::{format_usd, DashboardPage, DASHBOARD_USERS_PAGE, LOADING_USERS, PREDICTING};
pub use login::{LoginPage, LOGGING_IN, LOGIN_SUCCESS};
pub use register::{RegisterPage, CREATING_ACCOUNT, REGISTERED};
pub use sequence::{RequestSequence, Ticket};

use crate::session::Session;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/" | "" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/dashboard" => Some(Route::Dashboard),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where a navigation to `route` actually lands.
///
/// The dashboard needs a token; the login and register pages bounce a
/// signed-in user to the dashboard. Only token presence is checked.
pub fn gate(route: Route, session: &Session) -> Route {
    let authenticated = session.is_authenticated();
    match route {
        Route::Dashboard if !authenticated => Route::Login,
        Route::Login | Route::Register if authenticated => Route::Dashboard,
        other => other,
    }
}

/// Prefix applied to every failed action's status line.
pub(crate) fn error_status(e: &crate::Error) -> String {
    format!("Error: {}", e.user_message())
}
