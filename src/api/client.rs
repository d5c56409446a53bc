//! HTTP client for the chat backend.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use super::{
    error::{ApiError, Result},
    types::{
        Chat, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageBody, NewChat,
        RegisterRequest,
    },
};

/// HTTP client for the backend API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend API root (e.g. `https://host/api`). Endpoint
    ///   paths are appended to it, so a path component is kept.
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the unauthenticated auth endpoints.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    /// Access the chat endpoints on behalf of `token`.
    pub fn chats<'a>(&'a self, token: &'a str) -> ChatsApi<'a> {
        ChatsApi {
            client: self,
            token,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request / response pipeline
    // ─────────────────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Build a request, attaching the bearer token when one is present.
    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<RequestBuilder> {
        let builder = self.http.request(method, self.url(path)?);
        Ok(match token {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        })
    }

    /// Send a request and map non-success statuses into [`ApiError`].
    async fn send(request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let message = Self::error_message(response).await;
        warn!(
            name: "api.request.failed",
            status = status.as_u16(),
            path = %url,
            message = message.as_deref().unwrap_or(""),
            "Backend returned an error"
        );

        if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized { message })
        } else {
            Err(ApiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn error_message(response: reqwest::Response) -> Option<String> {
        let body = response.text().await.ok()?;
        match serde_json::from_str::<MessageBody>(&body) {
            Ok(parsed) => parsed.text(),
            Err(_) => {
                let body = body.trim();
                // HTML error pages are not worth showing to anyone.
                (!body.is_empty() && !body.starts_with('<')).then(|| body.to_string())
            }
        }
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        Ok(Self::send(request).await?.json().await?)
    }

    /// Drain a response whose body is optional (`{msg}` or empty).
    async fn message(request: RequestBuilder) -> Result<Option<String>> {
        let body = Self::send(request).await?.bytes().await?;
        Ok(serde_json::from_slice::<MessageBody>(&body)
            .ok()
            .and_then(MessageBody::text))
    }
}

// =============================================================================
// Auth API
// =============================================================================

/// Auth endpoints.
#[derive(Debug)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl AuthApi<'_> {
    /// Exchange email and password for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = self
            .client
            .request(reqwest::Method::POST, "auth/login", None)?
            .json(&LoginRequest { email, password });
        ApiClient::json(request).await
    }

    /// Create an account. Returns the backend's notice, if any.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Option<String>> {
        let request = self
            .client
            .request(reqwest::Method::POST, "auth/register", None)?
            .json(&RegisterRequest {
                name,
                email,
                password,
            });
        ApiClient::message(request).await
    }

    /// Ask the backend to email a password reset link.
    pub async fn forgot_password(&self, email: &str) -> Result<Option<String>> {
        let request = self
            .client
            .request(reqwest::Method::POST, "auth/forgot-password", None)?
            .json(&ForgotPasswordRequest { email });
        ApiClient::message(request).await
    }
}

// =============================================================================
// Chats API
// =============================================================================

/// Chat endpoints, authenticated with a bearer token.
#[derive(Debug)]
pub struct ChatsApi<'a> {
    client: &'a ApiClient,
    token: &'a str,
}

impl ChatsApi<'_> {
    /// Fetch the chat history.
    pub async fn list(&self) -> Result<Vec<Chat>> {
        let request = self
            .client
            .request(reqwest::Method::GET, "chats", Some(self.token))?;
        ApiClient::json(request).await
    }

    /// Check that the token is still accepted.
    ///
    /// Probes the protected history endpoint and hands the history back so
    /// callers don't have to fetch it twice.
    pub async fn probe(&self) -> Result<Vec<Chat>> {
        self.list().await
    }

    /// Send a prompt; the backend answers with the stored exchange.
    pub async fn create(&self, prompt: &str) -> Result<Chat> {
        let request = self
            .client
            .request(reqwest::Method::POST, "chats", Some(self.token))?
            .json(&NewChat { prompt });
        ApiClient::json(request).await
    }

    /// Delete one exchange.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("chats/{}", encode_path_segment(id));
        let request = self
            .client
            .request(reqwest::Method::DELETE, &path, Some(self.token))?;
        ApiClient::send(request).await?;
        Ok(())
    }
}

/// Percent-encode a single path segment.
pub(crate) fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_keeps_api_prefix() {
        let client = client("https://backend.example.com/api");
        assert_eq!(client.base_url().as_str(), "https://backend.example.com/api/");
        assert_eq!(
            client.url("/auth/login").unwrap().as_str(),
            "https://backend.example.com/api/auth/login"
        );
        assert_eq!(
            client.url("chats").unwrap().as_str(),
            "https://backend.example.com/api/chats"
        );
    }

    #[test]
    fn test_base_url_with_trailing_slash() {
        let client = client("http://localhost:5000/api/");
        assert_eq!(
            client.url("chats/42").unwrap().as_str(),
            "http://localhost:5000/api/chats/42"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ApiClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_bearer_header_only_with_token() {
        let client = client("http://localhost:5000/api");

        let with = client
            .request(reqwest::Method::GET, "chats", Some("abc"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            with.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer abc"
        );

        let without = client
            .request(reqwest::Method::POST, "auth/login", None)
            .unwrap()
            .build()
            .unwrap();
        assert!(without.headers().get(reqwest::header::AUTHORIZATION).is_none());

        let empty = client
            .request(reqwest::Method::GET, "chats", Some(""))
            .unwrap()
            .build()
            .unwrap();
        assert!(empty.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(encode_path_segment("65f0a1"), "65f0a1");
        assert_eq!(encode_path_segment("a/b c"), "a%2Fb%20c");
    }
}
