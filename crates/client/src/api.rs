//! HTTP client for the administration API.
//!
//! Wraps the JSON endpoints under `/api` plus `/login` and `/logout` using
//! [`reqwest`]. The session is the `name=value` cookie pair captured from the
//! login response and replayed on every request.

use async_trait::async_trait;
use campusdesk_core::types::DbId;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::redirect::Policy;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::panel::PanelResource;

/// Errors from the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `message` is the server's
    /// own `error` (or `message`) text when it sent one.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        message: String,
    },

    /// A 2xx body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Login succeeded but no session cookie came back.
    #[error("Login response carried no session cookie")]
    MissingSession,

    /// The panel was asked to do something its current state does not allow.
    #[error("{0}")]
    InvalidState(&'static str),
}

impl ClientError {
    /// HTTP status of an [`ClientError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct CreatedBody {
    id: DbId,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// Session-holding client for one server.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl ApiClient {
    /// Create a client for a server, e.g. `http://localhost:3000`.
    ///
    /// Redirects are not followed: `/logout` answers 303 and the caller
    /// only needs to know it succeeded.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            cookie: None,
        }
    }

    /// Whether a session cookie is currently held.
    pub fn is_signed_in(&self) -> bool {
        self.cookie.is_some()
    }

    /// Sign in and keep the session cookie for later requests.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let cookie = session_pair(response.headers()).ok_or(ClientError::MissingSession)?;
        self.cookie = Some(cookie);
        tracing::debug!(username, "Signed in");
        Ok(())
    }

    /// End the session on the server and forget the cookie.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let response = self
            .request(Method::GET, format!("{}/logout", self.base_url))
            .send()
            .await?;
        self.cookie = None;
        if response.status().is_redirection() {
            return Ok(());
        }
        ensure_success(response).await?;
        Ok(())
    }

    /// `GET /api/{path}`, optionally narrowed by `filter`.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        filter: Option<&str>,
    ) -> Result<Vec<T>, ClientError> {
        let mut request = self.request(Method::GET, self.api_url(path));
        if let Some(filter) = filter {
            request = request.query(&[("filter", filter)]);
        }
        parse_response(request.send().await?).await
    }

    /// `GET /api/{path}/{id}`
    pub async fn get<T: DeserializeOwned>(&self, path: &str, id: DbId) -> Result<T, ClientError> {
        let url = format!("{}/{id}", self.api_url(path));
        parse_response(self.request(Method::GET, url).send().await?).await
    }

    /// `POST /api/{path}`, returning the new id.
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<DbId, ClientError> {
        let response = self
            .request(Method::POST, self.api_url(path))
            .json(body)
            .send()
            .await?;
        let created: CreatedBody = parse_response(response).await?;
        Ok(created.id)
    }

    /// `PUT /api/{path}/{id}`, returning the server's message.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        path: &str,
        id: DbId,
        body: &B,
    ) -> Result<String, ClientError> {
        let url = format!("{}/{id}", self.api_url(path));
        let response = self.request(Method::PUT, url).json(body).send().await?;
        let message: MessageBody = parse_response(response).await?;
        Ok(message.message)
    }

    /// `DELETE /api/{path}/{id}`, returning the server's message.
    pub async fn delete(&self, path: &str, id: DbId) -> Result<String, ClientError> {
        let url = format!("{}/{id}", self.api_url(path));
        let response = self.request(Method::DELETE, url).send().await?;
        let message: MessageBody = parse_response(response).await?;
        Ok(message.message)
    }

    // ---- private helpers ----

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_matches('/'))
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let request = self.client.request(method, url);
        match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }
}

/// Transport used by [`crate::panel::ResourcePanel`]. Implemented by
/// [`ApiClient`]; tests substitute an in-memory store.
#[async_trait]
pub trait ResourceApi<R: PanelResource>: Send + Sync {
    async fn list(&self, filter: Option<&str>) -> Result<Vec<R>, ClientError>;
    async fn get(&self, id: DbId) -> Result<R, ClientError>;
    async fn create(&self, form: &R::Form) -> Result<DbId, ClientError>;
    async fn update(&self, id: DbId, form: &R::Form) -> Result<(), ClientError>;
    async fn delete(&self, id: DbId) -> Result<(), ClientError>;
}

#[async_trait]
impl<R: PanelResource> ResourceApi<R> for ApiClient {
    async fn list(&self, filter: Option<&str>) -> Result<Vec<R>, ClientError> {
        ApiClient::list(self, R::PATH, filter).await
    }

    async fn get(&self, id: DbId) -> Result<R, ClientError> {
        ApiClient::get(self, R::PATH, id).await
    }

    async fn create(&self, form: &R::Form) -> Result<DbId, ClientError> {
        ApiClient::create(self, R::PATH, form).await
    }

    async fn update(&self, id: DbId, form: &R::Form) -> Result<(), ClientError> {
        ApiClient::update(self, R::PATH, id, form).await?;
        Ok(())
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        ApiClient::delete(self, R::PATH, id).await?;
        Ok(())
    }
}

/// Return the response unchanged on 2xx, otherwise an [`ClientError::Api`]
/// carrying the server's message.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// The `error` or `message` field of a JSON error body, the raw text for
/// anything else, or the status reason for an empty body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        for key in ["error", "message"] {
            if let Some(serde_json::Value::String(text)) = map.get(key) {
                return text.clone();
            }
        }
    }
    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

/// `name=value` of the first cookie set by a response.
fn session_pair(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .find(|pair| pair.contains('=') && !pair.ends_with('='))
        .map(str::to_string)
}
