use super::{error_status, Route};
use crate::ApiClient;
use tracing::info;

pub const CREATING_ACCOUNT: &str = "Creating account...";
pub const REGISTERED: &str = "Registered. Redirecting to login...";

/// Account creation form. Registering does not sign the user in.
#[derive(Default)]
pub struct RegisterPage {
    pub email: String,
    pub password: String,
    status: String,
}

impl RegisterPage {
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

    pub async fn submit(&mut self, client: &ApiClient) -> Option<Route> {
        self.status = CREATING_ACCOUNT.to_string();
        match client.register(&self.email, &self.password).await {
            Ok(user) => {
                info!(user_id = user.id, "account created");
                self.status = REGISTERED.to_string();
                Some(Route::Login)
            }
            Err(e) => {
                self.status = error_status(&e);
                None
            }
        }
    }
}
