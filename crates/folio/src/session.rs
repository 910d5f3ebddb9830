//! Session management for the folio API.
//!
//! A [`SessionManager`] is constructed once at startup and shared by
//! reference with everything that needs to know who is signed in. All
//! mutation of the session goes through its operations:
//!
//! - [`initialize`](SessionManager::initialize) validates a stored token
//! - [`login`](SessionManager::login) and [`register`](SessionManager::register)
//!   establish a new session
//! - [`logout`](SessionManager::logout) and [`expire`](SessionManager::expire)
//!   end it
//!
//! Consumers observe changes through [`SessionManager::subscribe`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::auth::{Credentials, RegistrationForm, Token};
use crate::config::{Config, DEFAULT_VALIDATE_TIMEOUT};
use crate::error::{ApiError, AuthError, Error};
use crate::http::ApiClient;
use crate::http::endpoints::{AuthResponse, LOGIN, LoginRequest, ME, REGISTER, RegisterRequest};
use crate::store::{FileTokenStore, TokenStore};
use crate::types::User;

/// Where the session stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Startup validation has not resolved yet.
    Unknown,
    /// A validated user is signed in.
    Authenticated(User),
    /// Confirmed: nobody is signed in.
    Anonymous,
}

impl SessionState {
    /// True only while startup validation is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// A session state stamped with the number of transitions before it.
///
/// Watch receivers only see the latest value. Two snapshots with the same
/// state but different revisions mean the session left that state and came
/// back in between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub revision: u64,
}

/// Owner of the signed-in user and of the token lifecycle.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use folio::{ApiClient, ApiUrl, Credentials, MemoryTokenStore, SessionManager};
///
/// # async fn example() -> Result<(), folio::Error> {
/// let api = ApiUrl::new("https://api.example.com")?;
/// let client = ApiClient::new(api, folio::http::DEFAULT_REQUEST_TIMEOUT)?;
/// let session = SessionManager::new(client, Arc::new(MemoryTokenStore::new()));
///
/// session.initialize().await;
/// let user = session.login(Credentials::new("a@b.com", "secret1")).await?;
/// println!("signed in as {}", user.name);
/// # Ok(())
/// # }
/// ```
pub struct SessionManager {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<SessionSnapshot>,
    validate_timeout: Duration,
    // Held while a sign-in request is outstanding.
    submit: Mutex<()>,
    // Bumped whenever a session ends; a sign-in that started in an older
    // epoch must not establish itself.
    epoch: AtomicU64,
}

impl SessionManager {
    /// Create a session manager in the [`SessionState::Unknown`] state.
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot {
            state: SessionState::Unknown,
            revision: 0,
        });
        Self {
            client,
            store,
            state,
            validate_timeout: DEFAULT_VALIDATE_TIMEOUT,
            submit: Mutex::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Build the client and file-backed store described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let client = ApiClient::new(config.api_url.clone(), config.request_timeout)?;
        let store = match config.token_path {
            Some(ref path) => FileTokenStore::new(path),
            None => FileTokenStore::in_data_dir()?,
        };
        Ok(Self::new(client, Arc::new(store)).with_validate_timeout(config.validate_timeout))
    }

    /// Bound the startup who-am-i call.
    pub fn with_validate_timeout(mut self, timeout: Duration) -> Self {
        self.validate_timeout = timeout;
        self
    }

    /// The client shared with collaborators; it carries the session's token.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().state.clone()
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.state.borrow().state.user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().state.is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().state.is_authenticated()
    }

    /// Receive every future state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Resolve the startup state from the stored token.
    ///
    /// Without a stored token the session becomes anonymous and the API is
    /// not contacted. Otherwise the token is checked against the who-am-i
    /// endpoint; any failure, including a timeout, discards it. Calling this
    /// again once resolved returns the current state unchanged.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> SessionState {
        let _submit = self.submit.lock().await;

        if !self.is_loading() {
            debug!("session already initialized");
            return self.state();
        }

        let token = match self.store.load().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "failed to read stored token");
                None
            }
        };

        let Some(token) = token else {
            info!("no stored token");
            self.transition(SessionState::Anonymous);
            return self.state();
        };

        self.client.set_authorization(Some(token));

        match tokio::time::timeout(self.validate_timeout, self.client.get::<User>(ME)).await {
            Ok(Ok(user)) => {
                info!(user = %user.name, "stored token validated");
                self.transition(SessionState::Authenticated(user));
            }
            Ok(Err(e)) => {
                warn!(error = %e, "stored token failed validation");
                self.end_session().await;
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.validate_timeout.as_millis() as u64,
                    "token validation timed out"
                );
                self.end_session().await;
            }
        }

        self.state()
    }

    /// Sign in with email and password.
    ///
    /// On failure nothing changes: an existing session, the stored token and
    /// the client's authorization are all left as they were.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if a field is empty or the email is malformed
    /// - [`Error::Busy`] if another sign-in is outstanding
    /// - [`Error::Cancelled`] if [`logout`](Self::logout) ran while the
    ///   request was outstanding
    /// - [`AuthError::InvalidCredentials`] if the API rejects the credentials
    /// - [`Error::Transport`] if the API could not be reached
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: Credentials) -> Result<User, Error> {
        credentials.validate()?;
        let _submit = self.submit.try_lock().map_err(|_| Error::Busy)?;
        let epoch = self.epoch.load(Ordering::SeqCst);

        info!("logging in");

        let request = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        };

        let response: AuthResponse = self
            .client
            .post(LOGIN, &request)
            .await
            .map_err(rejected_credentials)?;

        self.establish(response, epoch).await
    }

    /// Create an account and sign in with it.
    ///
    /// The form is validated before any request is made. The registration
    /// endpoint answers with a token, so success leaves the session
    /// authenticated exactly as [`login`](Self::login) does.
    #[instrument(skip(self, form), fields(email = %form.email.trim()))]
    pub async fn register(&self, form: RegistrationForm) -> Result<User, Error> {
        form.validate()?;
        let _submit = self.submit.try_lock().map_err(|_| Error::Busy)?;
        let epoch = self.epoch.load(Ordering::SeqCst);

        info!("registering");

        let request = RegisterRequest {
            name: form.name.trim(),
            email: form.email.trim(),
            password: form.password.trim(),
        };

        let response: AuthResponse = self
            .client
            .post(REGISTER, &request)
            .await
            .map_err(rejected_credentials)?;

        self.establish(response, epoch).await
    }

    /// Sign out. Valid from any state; no request is made.
    ///
    /// A sign-in still in flight is cancelled: its response is discarded.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        info!("logging out");
        self.end_session().await;
    }

    /// Force a logout because the API rejected the current token.
    #[instrument(skip(self))]
    pub async fn expire(&self) {
        warn!("token rejected by API, ending session");
        self.end_session().await;
    }

    /// Pass an authenticated call's result through, ending the session if
    /// the API rejected the token that is still current.
    ///
    /// A rejection of a token that a newer sign-in has since replaced is
    /// returned as is and leaves the new session alone.
    pub async fn check<T>(&self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(ref e) = result {
            if let Some(sent) = e.rejected_token() {
                self.expire_if_current(sent).await;
            }
        }
        result
    }

    async fn expire_if_current(&self, sent: &Token) {
        // Let an outstanding sign-in settle before judging which token is current.
        let _submit = self.submit.lock().await;
        if self.client.authorization().as_ref() != Some(sent) {
            debug!("ignoring rejection of a superseded token");
            return;
        }
        self.expire().await;
    }

    /// The signed-in user, or [`AuthError::NotAuthenticated`].
    pub fn require_user(&self) -> Result<User, Error> {
        self.user().ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    async fn establish(&self, response: AuthResponse, epoch: u64) -> Result<User, Error> {
        let token = Token::new(response.token).ok_or_else(|| Error::Decode {
            message: "response carried an empty token".to_string(),
        })?;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            info!("logged out while signing in, discarding response");
            return Err(Error::Cancelled);
        }

        self.client.set_authorization(Some(token.clone()));
        let user = response.user;
        info!(user = %user.name, "session established");
        self.transition(SessionState::Authenticated(user.clone()));

        if let Err(e) = self.store.save(&token).await {
            warn!(error = %e, "failed to persist token; session will not survive a restart");
        }

        // A logout during the save may have cleared the slot before we wrote it.
        if self.epoch.load(Ordering::SeqCst) != epoch {
            info!("logged out while saving token, removing it again");
            if let Err(e) = self.store.clear().await {
                warn!(error = %e, "failed to remove stored token");
            }
            return Err(Error::Cancelled);
        }

        Ok(user)
    }

    async fn end_session(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.client.set_authorization(None);
        self.transition(SessionState::Anonymous);

        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to remove stored token");
        }
    }

    fn transition(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if current.state == next {
                return false;
            }
            debug!(
                from = state_name(&current.state),
                to = state_name(&next),
                revision = current.revision + 1,
                "session state changed"
            );
            current.state = next;
            current.revision += 1;
            true
        });
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("api", self.client.base())
            .field("state", &state_name(&self.state.borrow().state))
            .finish()
    }
}

fn state_name(state: &SessionState) -> &'static str {
    match state {
        SessionState::Unknown => "unknown",
        SessionState::Authenticated(_) => "authenticated",
        SessionState::Anonymous => "anonymous",
    }
}

/// Client-error answers from the sign-in endpoints judge the submitted
/// credentials, not the current token.
fn rejected_credentials(err: Error) -> Error {
    match err {
        Error::Auth(AuthError::Unauthorized { message, .. }) => {
            AuthError::InvalidCredentials { message }.into()
        }
        Error::Api(ApiError { status, message }) if (400..500).contains(&status) => {
            AuthError::InvalidCredentials { message }.into()
        }
        other => other,
    }
}
