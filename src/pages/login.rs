use super::{error_status, Route};
use crate::ApiClient;
use tracing::info;

pub const LOGGING_IN: &str = "Logging in...";
pub const LOGIN_SUCCESS: &str = "Success. Redirecting...";

/// Sign-in form.
#[derive(Default)]
pub struct LoginPage {
    pub email: String,
    pub password: String,
    status: String,
}

impl LoginPage {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            status: String::new(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Log in and store the returned token.
    ///
    /// Returns the route to navigate to on success; on failure the status
    /// line carries the formatted error and the page stays put.
    pub async fn submit(&mut self, client: &ApiClient) -> Option<Route> {
        self.status = LOGGING_IN.to_string();
        match client.login(&self.email, &self.password).await {
            Ok(token) => {
                client.session().set_token(&token.access_token);
                info!(email = %self.email, "signed in");
                self.status = LOGIN_SUCCESS.to_string();
                Some(Route::Dashboard)
            }
            Err(e) => {
                self.status = error_status(&e);
                None
            }
        }
    }
}
