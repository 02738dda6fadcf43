use super::sequence::{RequestSequence, Ticket};
use super::{error_status, gate, Route};
use crate::client::Page;
use crate::form_cache::FormCache;
use crate::types::{PredictionRequest, PredictionResult, User};
use crate::{ApiClient, Result};
use tracing::debug;

pub const LOADING_USERS: &str = "Loading users...";
pub const PREDICTING: &str = "Predicting...";

/// Page of users shown on the dashboard.
pub const DASHBOARD_USERS_PAGE: Page = Page {
    offset: 0,
    limit: 20,
};

/// Prediction form plus the registered-user table.
///
/// Each panel stamps its requests; a response that arrives after a newer
/// request on the same panel was issued is dropped instead of overwriting
/// the fresher state.
pub struct DashboardPage {
    form: PredictionRequest,
    cache: FormCache,
    users: Vec<User>,
    users_status: String,
    users_seq: RequestSequence,
    prediction: Option<f64>,
    predict_status: String,
    predict_seq: RequestSequence,
}

impl DashboardPage {
    /// Open the page without any network call; the form comes from the cache.
    pub fn open(client: &ApiClient) -> Self {
        let cache = client.form_cache().clone();
        Self {
            form: cache.load(),
            cache,
            users: Vec::new(),
            users_status: String::new(),
            users_seq: RequestSequence::new(),
            prediction: None,
            predict_status: String::new(),
            predict_seq: RequestSequence::new(),
        }
    }

    /// Gate, open, and load the user table.
    ///
    /// Returns the redirect target instead of a page when no token is held.
    pub async fn mount(client: &ApiClient) -> std::result::Result<Self, Route> {
        match gate(Route::Dashboard, client.session()) {
            Route::Dashboard => {
                let mut page = Self::open(client);
                page.load_users(client).await;
                Ok(page)
            }
            redirect => Err(redirect),
        }
    }

    pub fn form(&self) -> &PredictionRequest {
        &self.form
    }

    /// Apply a field change and write the whole form to the cache.
    pub fn update_form(&mut self, change: impl FnOnce(&mut PredictionRequest)) {
        change(&mut self.form);
        self.cache.save(&self.form);
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn users_status(&self) -> &str {
        &self.users_status
    }

    pub fn prediction(&self) -> Option<f64> {
        self.prediction
    }

    pub fn predict_status(&self) -> &str {
        &self.predict_status
    }

    /// The result panel text: a dollar amount, or an em dash before the
    /// first prediction.
    pub fn prediction_display(&self) -> String {
        self.prediction
            .map(format_usd)
            .unwrap_or_else(|| "\u{2014}".to_string())
    }

    pub fn begin_load_users(&mut self) -> Ticket {
        self.users_status = LOADING_USERS.to_string();
        self.users_seq.issue()
    }

    /// Apply a user-list response. Returns `false` if it was stale.
    pub fn finish_load_users(&mut self, ticket: Ticket, result: Result<Vec<User>>) -> bool {
        if !self.users_seq.is_current(ticket) {
            debug!(?ticket, "dropping stale user list response");
            return false;
        }
        match result {
            Ok(users) => {
                self.users = users;
                self.users_status.clear();
            }
            Err(e) => self.users_status = error_status(&e),
        }
        true
    }

    pub async fn load_users(&mut self, client: &ApiClient) {
        let ticket = self.begin_load_users();
        let result = client.list_users_page(DASHBOARD_USERS_PAGE).await;
        self.finish_load_users(ticket, result);
    }

    pub fn begin_predict(&mut self) -> Ticket {
        self.predict_status = PREDICTING.to_string();
        self.predict_seq.issue()
    }

    /// Apply a prediction response. Returns `false` if it was stale.
    pub fn finish_predict(&mut self, ticket: Ticket, result: Result<PredictionResult>) -> bool {
        if !self.predict_seq.is_current(ticket) {
            debug!(?ticket, "dropping stale prediction response");
            return false;
        }
        match result {
            Ok(res) => {
                self.prediction = Some(res.prediction);
                self.predict_status.clear();
            }
            Err(e) => self.predict_status = error_status(&e),
        }
        true
    }

    pub async fn predict(&mut self, client: &ApiClient) {
        let ticket = self.begin_predict();
        let result = client.predict(&self.form).await;
        self.finish_predict(ticket, result);
    }

    /// Drop the token and head back to the login page.
    pub fn logout(&mut self, client: &ApiClient) -> Route {
        client.session().clear_token();
        Route::Login
    }
}

/// US-dollar currency text, e.g. `$452,600.00` or `-$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(5.5), "$5.50");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(452600.0), "$452,600.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-1234.5), "-$1,234.50");
        assert_eq!(format_usd(-0.001), "$0.00");
    }
}
