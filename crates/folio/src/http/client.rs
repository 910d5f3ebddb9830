//! API HTTP client implementation.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::auth::Token;
use crate::error::{ApiError, AuthError, Error, TransportError};
use crate::types::ApiUrl;

use super::endpoints::ApiErrorBody;

/// Per-request timeout applied unless the caller configures another.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one API base address.
///
/// Cloning is cheap and every clone shares the same authorization slot, so
/// a token configured through one handle applies to requests sent through
/// all of them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    base: ApiUrl,
    authorization: RwLock<Option<Token>>,
}

impl ApiClient {
    /// Create a new client for the given API.
    pub fn new(base: ApiUrl, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base,
                authorization: RwLock::new(None),
            }),
        })
    }

    /// Returns the API base address.
    pub fn base(&self) -> &ApiUrl {
        &self.inner.base
    }

    /// Configure the credential sent with every subsequent request.
    ///
    /// With `None` the `Authorization` header is omitted entirely.
    pub fn set_authorization(&self, token: Option<Token>) {
        debug!(authorized = token.is_some(), "updating client authorization");
        *self
            .inner
            .authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Returns the currently configured credential.
    pub fn authorization(&self) -> Option<Token> {
        self.inner
            .authorization
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if requests are currently sent with a credential.
    pub fn is_authorized(&self) -> bool {
        self.inner
            .authorization
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Make a GET request and decode the JSON response.
    #[instrument(skip(self), fields(api = %self.inner.base))]
    pub async fn get<R>(&self, path: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Ok(response.json::<R>().await?)
    }

    /// Make a POST request with a JSON body and decode the JSON response.
    #[instrument(skip(self, body), fields(api = %self.inner.base))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        Ok(response.json::<R>().await?)
    }

    /// Make a POST request whose response body is irrelevant.
    #[instrument(skip(self, body), fields(api = %self.inner.base))]
    pub async fn post_no_response<B>(&self, path: &str, body: &B) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::POST, path).json(body))
            .await?;
        Ok(())
    }

    /// Make a PUT request with a JSON body and decode the JSON response.
    #[instrument(skip(self, body), fields(api = %self.inner.base))]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::PUT, path).json(body))
            .await?;
        Ok(response.json::<R>().await?)
    }

    /// Make a DELETE request. Any response body is discarded.
    #[instrument(skip(self), fields(api = %self.inner.base))]
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.inner.base.endpoint(path);
        debug!(%method, %url, "API request");
        self.inner.http.request(method, url)
    }

    /// Stamp the credential, send, and turn error statuses into typed errors.
    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, Error> {
        let token = self.authorization();
        let request = match token {
            Some(ref token) => request.bearer_auth(token.as_str()),
            None => request,
        };

        // No response at all is always a transport failure, never a decode one.
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::from(e)))?;

        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            return Ok(response);
        }

        let body = Self::parse_error_body(response).await;

        // A 401 only condemns the token if one was actually sent.
        if status == StatusCode::UNAUTHORIZED {
            if let Some(token) = token {
                debug!(message = ?body.message, "token rejected by API");
                return Err(AuthError::Unauthorized {
                    message: body.message,
                    token,
                }
                .into());
            }
        }

        Err(ApiError::new(status.as_u16(), body.message).into())
    }

    /// Parse a `{ "message": ... }` error body, tolerating anything else.
    async fn parse_error_body(response: reqwest::Response) -> ApiErrorBody {
        match response.text().await {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => ApiErrorBody::default(),
        }
    }
}
