//! Shared HTTP plumbing for every resource client.
//!
//! One fetch per call, no retries. The bearer token is re-read from storage on
//! every request so a login/logout takes effect on the next call. A 401 from
//! any endpoint clears the stored token and forces navigation to the login
//! route; every other failure is normalized into [`ApiError`] and handed back
//! to the caller.

use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, RequestMode, Response};

use super::config::ApiConfig;
use crate::storage::TokenStore;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, CORS rejection and friends.
    #[error("could not reach the API: {0}")]
    Network(String),

    /// The request hit the fixed deadline and was aborted.
    #[error("request timed out")]
    Timeout,

    /// 401 — the session has already been cleared by the time this surfaces.
    #[error("session expired")]
    Unauthorized,

    /// Any other non-2xx response, with the server's message when it sent one.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 2xx response whose body did not match the expected schema.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message to show the user. Server-provided text wins; transport
    /// problems collapse into one wording; everything else uses the
    /// operation's fixed fallback ("Failed to fetch agents", ...).
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Network(_) | ApiError::Timeout => {
                "Could not reach the API".to_string()
            }
            ApiError::Unauthorized => "Your session has expired".to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Pull a human message out of a JSON error body. DRF-style backends use
/// `detail`; ours also emits `message`; a bare string body is used as-is.
pub fn extract_server_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(value) => ["message", "detail", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(String::from))
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Decode a response body at the edge so malformed payloads fail fast as a
/// typed error instead of leaking missing fields into the UI.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// The one client instance every resource wrapper shares. Constructed at
/// startup from [`ApiConfig`] and injected; holds no mutable state.
#[derive(Clone, Debug)]
pub struct HttpClient {
    config: ApiConfig,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub async fn get(&self, path: &str) -> Result<String, ApiError> {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<String>) -> Result<String, ApiError> {
        self.request("POST", path, body).await
    }

    pub async fn put(&self, path: &str, body: String) -> Result<String, ApiError> {
        self.request("PUT", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<String, ApiError> {
        self.request("DELETE", path, None).await
    }

    /// Issue exactly one request and normalize the outcome.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
    ) -> Result<String, ApiError> {
        let (status, text) = self.send(method, path, body).await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Server {
                status,
                message: extract_server_message(&text),
            });
        }
        Ok(text)
    }

    /// Like [`request`](Self::request) but hands back status + raw body so
    /// callers needing the error payload (login/register field errors) can
    /// parse it themselves. Transport normalization and the 401 interception
    /// behave identically.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
    ) -> Result<(u16, String), ApiError> {
        let bearer = TokenStore::get();
        self.send_with_bearer(method, path, body, bearer.as_deref())
            .await
    }

    /// [`send`](Self::send) with an explicit bearer instead of the stored
    /// one. Logout uses this: the reducer clears storage immediately, so the
    /// request has to carry a snapshot of the token taken before the clear.
    pub async fn send_with_bearer(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
        bearer: Option<&str>,
    ) -> Result<(u16, String), ApiError> {
        let url = self.config.url(path);

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(as_network_error)?;
        if let Some(token) = bearer {
            headers
                .append("Authorization", &format!("Bearer {}", token))
                .map_err(as_network_error)?;
        }
        if let Some(data) = &body {
            headers
                .append("Content-Type", "application/json")
                .map_err(as_network_error)?;
            opts.set_body(&JsValue::from_str(data));
        }
        opts.set_headers(&headers);

        // Abort-signal deadline; dropping the Timeout cancels the timer once
        // the fetch settles in time.
        let controller = AbortController::new().map_err(as_network_error)?;
        opts.set_signal(Some(&controller.signal()));
        let abort_handle = controller.clone();
        let deadline = Timeout::new(self.config.timeout_ms(), move || abort_handle.abort());

        let request = Request::new_with_str_and_init(&url, &opts).map_err(as_network_error)?;
        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;

        let fetched = JsFuture::from(window.fetch_with_request(&request)).await;
        drop(deadline);

        let resp_value = match fetched {
            Ok(value) => value,
            Err(err) => {
                return Err(if controller.signal().aborted() {
                    ApiError::Timeout
                } else {
                    as_network_error(err)
                });
            }
        };
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ApiError::Network("unexpected fetch result".into()))?;

        let status = resp.status();
        let text = match resp.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .map(|v| v.as_string().unwrap_or_default())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };

        if status == 401 {
            // Global interceptor behavior: drop the session and send the
            // user back to the login page.
            TokenStore::clear();
            crate::state::dispatch_global_message(crate::messages::Message::SessionExpired);
            return Err(ApiError::Unauthorized);
        }

        Ok((status, text))
    }
}

fn as_network_error(err: JsValue) -> ApiError {
    let detail = err
        .as_string()
        .or_else(|| js_sys::Reflect::get(&err, &JsValue::from_str("message")).ok().and_then(|m| m.as_string()))
        .unwrap_or_else(|| "request failed".to_string());
    ApiError::Network(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_known_keys() {
        assert_eq!(extract_server_message(r#"{"message":"nope"}"#), "nope");
        assert_eq!(extract_server_message(r#"{"detail":"missing"}"#), "missing");
        assert_eq!(extract_server_message(r#"{"error":"bad"}"#), "bad");
        assert_eq!(extract_server_message(r#""plain string""#), "plain string");
        assert_eq!(extract_server_message(r#"{"other":1}"#), "");
        assert_eq!(extract_server_message("<html>oops</html>"), "");
    }

    #[test]
    fn user_message_precedence() {
        let server = ApiError::Server {
            status: 422,
            message: "Name already taken".into(),
        };
        assert_eq!(server.user_message("Failed to create agent"), "Name already taken");

        let anonymous = ApiError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(anonymous.user_message("Failed to create agent"), "Failed to create agent");

        assert_eq!(
            ApiError::Timeout.user_message("Failed to fetch agents"),
            "Could not reach the API"
        );
        assert_eq!(
            ApiError::Network("refused".into()).user_message("Failed to fetch agents"),
            "Could not reach the API"
        );
    }

    #[test]
    fn decode_surfaces_typed_error() {
        let err = decode::<crate::models::Agent>("{}").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
