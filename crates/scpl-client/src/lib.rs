//! # scpl client
//!
//! Typed async client for the signage API.
//!
//! The client keeps the access token in memory and lets reqwest's cookie
//! store carry the `refreshToken` cookie, so [`ApiClient::refresh`] works
//! without the caller ever seeing the refresh token.
//!
//! # Example
//!
//! ```ignore
//! use scpl_client::ApiClient;
//! use scpl_core::pagination::ListQuery;
//!
//! let client = ApiClient::new("http://localhost:3000")?;
//! client.login("admin@example.com", "Admin@12345").await?;
//! let screens = client.screens(&ListQuery::default()).await?;
//! ```

pub mod error;

use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use scpl_core::pagination::{ListQuery, Page};
use scpl_models::{
    AccessTokenResponse, CreatePlaylistRequest, LoginRequest, MessageResponse, PlaylistDetail,
    PlaylistSummary, Screen, ScreenStatus,
};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

pub use error::ClientError;

#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Builds a client rooted at `base_url` with an in-memory cookie store.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Self::with_http_client(http, base_url)
    }

    /// Uses a preconfigured reqwest client. It needs a cookie store for
    /// [`ApiClient::refresh`] to work.
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            access_token: RwLock::new(None),
        })
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token.read().clone()
    }

    pub fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write() = token;
    }

    /// Logs in and stores the returned access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AccessTokenResponse = self
            .send(self.request(Method::POST, "/auth/login")?.json(&body))
            .await?;
        self.set_access_token(Some(response.access_token.clone()));
        Ok(response.access_token)
    }

    /// Exchanges the refresh cookie for a new access token.
    pub async fn refresh(&self) -> Result<String, ClientError> {
        let response: AccessTokenResponse = self
            .send(self.request(Method::POST, "/auth/refresh")?)
            .await?;
        self.set_access_token(Some(response.access_token.clone()));
        Ok(response.access_token)
    }

    /// Ends the server session. The local access token is dropped even when
    /// the server call fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self
            .execute(self.authorized(Method::POST, "/auth/logout")?)
            .await;
        self.set_access_token(None);
        result.map(|_| ())
    }

    pub async fn revoke_all(&self) -> Result<MessageResponse, ClientError> {
        let result = self
            .send(self.authorized(Method::POST, "/auth/revoke-all")?)
            .await;
        self.set_access_token(None);
        result
    }

    pub async fn screens(&self, query: &ListQuery) -> Result<Page<Screen>, ClientError> {
        self.send(self.request(Method::GET, "/screens")?.query(query))
            .await
    }

    pub async fn toggle_screen(&self, id: Uuid) -> Result<ScreenStatus, ClientError> {
        self.send(self.authorized(Method::PUT, &format!("/screens/{id}"))?)
            .await
    }

    pub async fn playlists(&self, query: &ListQuery) -> Result<Page<PlaylistSummary>, ClientError> {
        self.send(self.request(Method::GET, "/playlists")?.query(query))
            .await
    }

    pub async fn create_playlist(
        &self,
        request: &CreatePlaylistRequest,
    ) -> Result<PlaylistSummary, ClientError> {
        self.send(self.request(Method::POST, "/playlists")?.json(request))
            .await
    }

    pub async fn playlist(&self, id: Uuid) -> Result<PlaylistDetail, ClientError> {
        self.send(self.request(Method::GET, &format!("/playlists/{id}"))?)
            .await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.base_url.join(path)?;
        Ok(self.http.request(method, url))
    }

    /// Like [`Self::request`], with the bearer token attached when one is held.
    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let builder = self.request(method, path)?;
        Ok(match self.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        Ok(self.execute(builder).await?.json().await?)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!("Received 401, clearing access token");
            self.set_access_token(None);
            return Err(ClientError::Unauthorized);
        }

        let message = response
            .json::<MessageResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string());

        Err(ClientError::Api { status, message })
    }
}
