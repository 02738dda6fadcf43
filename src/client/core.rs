use crate::client::endpoint::{
    paged_path, Page, HEALTH_PATH, LOGIN_PATH, PREDICTIONS_PATH, PREDICT_PATH, USERS_PATH,
};
use crate::form_cache::FormCache;
use crate::session::Session;
use crate::transport::{HttpTransport, RequestOptions};
use crate::types::{
    Credentials, HealthStatus, PredictionRecord, PredictionRequest, PredictionResult,
    TokenResponse, User,
};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Client for the prediction/auth backend.
///
/// Every operation makes exactly one request. Errors are returned to the
/// caller untouched; nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) session: Session,
    pub(crate) form_cache: FormCache,
}

impl ApiClient {
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn form_cache(&self) -> &FormCache {
        &self.form_cache
    }

    /// `POST /users` with `{email, password}`. No auth header.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        let body = credentials_body(email, password)?;
        let data = self
            .transport
            .request(USERS_PATH, RequestOptions::post(body))
            .await?;
        decode("register", data)
    }

    /// `POST /login` with `{email, password}`. No auth header.
    ///
    /// The returned token is not stored; the caller decides when to call
    /// [`Session::set_token`].
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let body = credentials_body(email, password)?;
        let data = self
            .transport
            .request(LOGIN_PATH, RequestOptions::post(body))
            .await?;
        decode("login", data)
    }

    /// `POST /predict` with the form verbatim. Authenticated.
    pub async fn predict(&self, form: &PredictionRequest) -> Result<PredictionResult> {
        let body = serde_json::to_value(form)?;
        let data = self
            .transport
            .request(PREDICT_PATH, self.authorized(RequestOptions::post(body)))
            .await?;
        decode("predict", data)
    }

    /// `GET /users?offset=0&limit=100`. Authenticated.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_page(Page::USERS).await
    }

    pub async fn list_users_page(&self, page: Page) -> Result<Vec<User>> {
        let data = self
            .transport
            .request(
                &paged_path(USERS_PATH, page),
                self.authorized(RequestOptions::get()),
            )
            .await?;
        decode("list users", data)
    }

    /// `GET /predictions?offset=0&limit=20`. Authenticated.
    pub async fn list_predictions(&self) -> Result<Vec<PredictionRecord>> {
        self.list_predictions_page(Page::PREDICTIONS).await
    }

    pub async fn list_predictions_page(&self, page: Page) -> Result<Vec<PredictionRecord>> {
        let data = self
            .transport
            .request(
                &paged_path(PREDICTIONS_PATH, page),
                self.authorized(RequestOptions::get()),
            )
            .await?;
        decode("list predictions", data)
    }

    /// `GET /health`. No auth header.
    pub async fn health(&self) -> Result<HealthStatus> {
        let data = self
            .transport
            .request(HEALTH_PATH, RequestOptions::get())
            .await?;
        decode("health", data)
    }

    /// Attach `Authorization: Bearer <token>` when a token is held. Without
    /// one the request goes out bare and the backend decides.
    fn authorized(&self, options: RequestOptions) -> RequestOptions {
        match self.session.auth_header() {
            Some((name, value)) => options.with_header(name, value),
            None => {
                debug!("no access token; sending request without Authorization");
                options
            }
        }
    }
}

fn credentials_body(email: &str, password: &str) -> Result<Value> {
    Ok(serde_json::to_value(Credentials::new(email, password))?)
}

/// Decode a 2xx body into the operation's response type.
fn decode<T: DeserializeOwned>(operation: &str, data: Option<Value>) -> Result<T> {
    let value =
        data.ok_or_else(|| Error::malformed(format!("{}: empty or non-JSON response", operation)))?;
    serde_json::from_value(value).map_err(|e| Error::malformed(format!("{}: {}", operation, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_missing_body_is_malformed() {
        let err = decode::<HealthStatus>("health", None).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Malformed);
        assert_eq!(err.user_message(), "health: empty or non-JSON response");
    }

    #[test]
    fn decode_wrong_shape_is_malformed() {
        let err = decode::<TokenResponse>("login", Some(json!({"token": "x"}))).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Malformed);
        assert!(err.user_message().starts_with("login: missing field `access_token`"));
    }

    #[test]
    fn decode_users() {
        let users: Vec<User> =
            decode("list users", Some(json!([{"id": 1, "email": "a@b.c"}]))).unwrap();
        assert_eq!(
            users,
            vec![User {
                id: 1,
                email: "a@b.c".into()
            }]
        );
    }
}
