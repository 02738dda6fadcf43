use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Proxy};
use serde_json::Value;
use tracing::debug;
use url::Url;
use uuid::Uuid;

/// Correlation header echoed by the backend in its request log.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Method, extra headers and JSON body of a single call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    origin: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let origin = Url::parse(&config.origin).map_err(|e| {
            Error::configuration(format!("invalid origin {:?}: {}", config.origin, e))
        })?;

        // No timeout: a hung backend call stays pending until the caller drops it.
        let mut builder = reqwest::Client::builder();

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration(format!("invalid proxy {:?}: {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Network(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            origin,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`, resolving same-origin paths against the origin.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let target = resolve_url(&self.base_url, path);
        match Url::parse(&target) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .origin
                .join(&target)
                .map_err(|e| Error::configuration(format!("invalid path {:?}: {}", target, e))),
            Err(e) => Err(Error::configuration(format!(
                "invalid url {:?}: {}",
                target, e
            ))),
        }
    }

    /// Send one JSON request.
    ///
    /// Returns the parsed body on 2xx (`None` when the body is empty or not
    /// JSON). Any other status becomes [`Error::Http`] carrying the status
    /// and the parsed body fields. Transport failures surface as
    /// [`Error::Network`]. Nothing is retried.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Option<Value>> {
        let url = self.url_for(path)?;
        let headers = merge_headers(&options.headers)?;
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        debug!(method = %options.method, %url, request_id = %request_id, "sending request");

        let mut req = self.client.request(options.method, url).headers(headers);
        if let Some(body) = &options.body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::Network(TransportError::Http(e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(TransportError::Http(e)))?;
        let data = parse_body(&bytes);

        debug!(status = status.as_u16(), request_id = %request_id, "received response");

        if !status.is_success() {
            return Err(Error::Http(HttpError::from_body(status.as_u16(), data)));
        }

        Ok(data)
    }
}

/// `base + path`, or `path` unchanged when the base is empty (same-origin).
pub(crate) fn resolve_url(base_url: &str, path: &str) -> String {
    if base_url.is_empty() {
        path.to_string()
    } else {
        format!("{}{}", base_url, path)
    }
}

/// Default `Content-Type: application/json`, then caller headers on top.
///
/// Header names compare case-insensitively, so a caller's `content-type`
/// replaces the default. A request id is generated if the caller gave none.
pub(crate) fn merge_headers(caller: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in caller {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::configuration(format!("invalid header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::configuration(format!("invalid value for {}: {}", name, e)))?;
        headers.insert(name, value);
    }

    if !headers.contains_key(REQUEST_ID_HEADER) {
        let id = Uuid::new_v4().simple().to_string();
        if let Ok(value) = HeaderValue::from_str(&id[..12]) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
    }

    Ok(headers)
}

/// Parse a body as JSON; empty, `null` or unparsable bodies are absent.
pub(crate) fn parse_body(bytes: &[u8]) -> Option<Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) | Err(_) => None,
        Ok(v) => Some(v),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_url_prefixes_base() {
        assert_eq!(resolve_url("", "/users"), "/users");
        assert_eq!(
            resolve_url("http://api:8000", "/users?offset=0&limit=100"),
            "http://api:8000/users?offset=0&limit=100"
        );
    }

    #[test]
    fn same_origin_paths_join_the_origin() {
        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let url = transport.url_for("/predict").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/predict");
    }

    #[test]
    fn base_url_takes_precedence_over_origin() {
        let cfg = ClientConfig {
            base_url: "https://api.example.com/v1".into(),
            ..ClientConfig::default()
        };
        let transport = HttpTransport::new(&cfg).unwrap();
        let url = transport.url_for("/users?offset=0&limit=100").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/users?offset=0&limit=100");
    }

    #[test]
    fn invalid_origin_is_a_configuration_error() {
        let cfg = ClientConfig {
            origin: "not a url".into(),
            ..ClientConfig::default()
        };
        let err = HttpTransport::new(&cfg).err().unwrap();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
    }

    #[test]
    fn merge_headers_defaults_to_json() {
        let headers = merge_headers(&[]).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(REQUEST_ID_HEADER).unwrap().len(), 12);
    }

    #[test]
    fn caller_headers_win_on_conflict() {
        let headers = merge_headers(&[
            ("content-type".to_string(), "text/plain".to_string()),
            ("Authorization".to_string(), "Bearer t".to_string()),
            ("X-Request-ID".to_string(), "abc".to_string()),
        ])
        .unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(headers.get("authorization").unwrap(), "Bearer t");
        assert_eq!(headers.get(REQUEST_ID_HEADER).unwrap(), "abc");
        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let err = merge_headers(&[("bad header".to_string(), "v".to_string())]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
    }

    #[test]
    fn parse_body_treats_garbage_as_absent() {
        assert_eq!(parse_body(br#"{"a":1}"#), Some(json!({"a": 1})));
        assert_eq!(parse_body(b""), None);
        assert_eq!(parse_body(b"null"), None);
        assert_eq!(parse_body(b"<html>502</html>"), None);
    }
}
