//! REST client for `/auth/*`.
//!
//! Login and register never surface raw transport errors to the forms:
//! every failure is converted into an [`AuthError`] with a banner message and
//! per-field errors so call sites can render inline messages.

use std::collections::HashMap;
use std::rc::Rc;

use super::http::{decode, ApiError, HttpClient};
use crate::models::{AuthError, AuthResponse, CurrentUser, LoginRequest, RegisterRequest};

#[derive(Clone)]
pub struct AuthClient {
    http: Rc<HttpClient>,
}

impl AuthClient {
    pub fn new(http: Rc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<AuthResponse, AuthError> {
        self.submit("/auth/login/", serde_json::to_string(payload)).await
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        self.submit("/auth/register/", serde_json::to_string(payload)).await
    }

    /// Fetch the authenticated user's profile (`/auth/me/`). Requires a valid
    /// token in storage; a 401 is handled by the shared interceptor.
    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        let body = self.http.get("/auth/me/").await?;
        decode(&body)
    }

    /// Server-side logout, invalidating the given token. The caller has
    /// already cleared local storage, so the token travels explicitly here
    /// instead of being re-read per request. Best-effort: the caller's local
    /// state is gone no matter what this returns.
    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let (status, body) = self
            .http
            .send_with_bearer("POST", "/auth/logout/", None, Some(token))
            .await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Server {
                status,
                message: super::http::extract_server_message(&body),
            });
        }
        Ok(())
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "old_password": old_password,
            "new_password": new_password,
        });
        self.http
            .post("/auth/change-password/", Some(body.to_string()))
            .await?;
        Ok(())
    }

    async fn submit(
        &self,
        path: &str,
        payload: serde_json::Result<String>,
    ) -> Result<AuthResponse, AuthError> {
        let json = payload.map_err(|e| AuthError {
            message: format!("Could not encode request: {}", e),
            field_errors: HashMap::new(),
        })?;

        match self.http.send("POST", path, Some(json)).await {
            Ok((status, body)) if (200..300).contains(&status) => {
                decode::<AuthResponse>(&body).map_err(|e| AuthError {
                    message: e.user_message("Unexpected response from the server"),
                    field_errors: HashMap::new(),
                })
            }
            Ok((_, body)) => Err(parse_auth_failure(&body)),
            Err(err) => Err(AuthError {
                message: err.user_message("Authentication failed"),
                field_errors: HashMap::new(),
            }),
        }
    }
}

/// Parse a DRF-style validation body (`{"email": ["taken"], "non_field_errors":
/// ["Invalid credentials"]}`) into a banner message plus per-field errors.
pub fn parse_auth_failure(body: &str) -> AuthError {
    let mut error = AuthError {
        message: String::new(),
        field_errors: HashMap::new(),
    };

    let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) else {
        error.message = "Authentication failed".to_string();
        return error;
    };

    for (key, value) in map {
        let first = match &value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                items.first().and_then(|v| v.as_str()).map(String::from)
            }
            _ => None,
        };
        let Some(message) = first else { continue };

        match key.as_str() {
            "non_field_errors" | "detail" | "message" | "error" => {
                error.message = message;
            }
            field => {
                error.field_errors.insert(field.to_string(), message);
            }
        }
    }

    if error.message.is_empty() && error.field_errors.is_empty() {
        error.message = "Authentication failed".to_string();
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_are_extracted_per_field() {
        let err = parse_auth_failure(
            r#"{"email":["User with this email already exists"],"password":["Too short"]}"#,
        );
        assert_eq!(
            err.field_errors.get("email").map(String::as_str),
            Some("User with this email already exists")
        );
        assert_eq!(err.field_errors.get("password").map(String::as_str), Some("Too short"));
        assert!(err.message.is_empty());
    }

    #[test]
    fn non_field_errors_become_the_banner() {
        let err = parse_auth_failure(r#"{"non_field_errors":["Invalid credentials"]}"#);
        assert_eq!(err.message, "Invalid credentials");
        assert!(err.field_errors.is_empty());

        let err = parse_auth_failure(r#"{"detail":"Account disabled"}"#);
        assert_eq!(err.message, "Account disabled");
    }

    #[test]
    fn garbage_bodies_get_a_generic_message() {
        let err = parse_auth_failure("<html>502</html>");
        assert_eq!(err.message, "Authentication failed");
        assert!(err.field_errors.is_empty());

        let err = parse_auth_failure("{}");
        assert_eq!(err.message, "Authentication failed");
    }
}
