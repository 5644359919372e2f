use std::fmt;
use std::sync::Arc;

use farmstall_model::{LoginRequest, Shop};
use log::{debug, info, warn};
use parking_lot::Mutex;
use tokio::sync::watch;

use super::state::{Session, SessionPhase, SessionStore};
use crate::backend::SessionBackend;
use crate::errors::{FailureKind, SessionError, SessionResult};
use crate::token::TokenCell;

const LOGIN_FALLBACK: &str = "Login failed. Please check your credentials.";
const PROFILE_FALLBACK: &str = "Failed to load shop profile";

/// Owns the shop session: restores it from the stored token, logs in and
/// out, and publishes every change through a watch channel.
///
/// Cloning is cheap; all clones drive the same session.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    backend: Arc<dyn SessionBackend>,
    tokens: TokenCell,
    store: SessionStore,
    // Held across every check-epoch-then-mutate step, never across an await.
    gate: Mutex<()>,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("tokens", &self.inner.tokens)
            .field("session", &self.inner.store.current())
            .finish()
    }
}

impl SessionController {
    pub fn new(backend: Arc<dyn SessionBackend>, tokens: TokenCell) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                backend,
                tokens,
                store: SessionStore::new(),
                gate: Mutex::new(()),
            }),
        }
    }

    pub fn tokens(&self) -> &TokenCell {
        &self.inner.tokens
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.inner.store.with_state(|s| s.epoch()) == epoch
    }

    /// Restore the session from a stored token, if any.
    ///
    /// Never fails. A 401 signs the session out and deletes the token; any
    /// other failure keeps the token and is only recorded in `last_error`.
    pub async fn bootstrap(&self) {
        let Some(token) = self.inner.tokens.get() else {
            let _gate = self.inner.gate.lock();
            self.inner.store.update(|s| {
                if s.loading || s.is_idle_logged_out() {
                    return false;
                }
                s.sign_out();
                true
            });
            debug!("[Session] No stored token, starting logged out");
            return;
        };

        let epoch = {
            let _gate = self.inner.gate.lock();
            self.inner.store.update(|s| {
                s.loading = true;
                s.phase = SessionPhase::Validating;
                true
            });
            self.inner.store.with_state(|s| s.epoch())
        };

        let result = self.inner.backend.fetch_profile(&token).await;

        let _gate = self.inner.gate.lock();
        if !self.is_current(epoch) {
            debug!("[Session] Discarding stale token validation result");
            return;
        }

        match result {
            Ok(shop) => {
                info!("[Session] Restored session for shop '{}'", shop.name);
                self.inner.store.update(|s| {
                    s.sign_in(shop);
                    true
                });
            }
            Err(err) if err.kind() == FailureKind::DefiniteAuth => {
                warn!("[Session] Stored token was rejected, signing out");
                if let Err(e) = self.inner.tokens.clear_if(&token) {
                    warn!("[Session] Failed to remove rejected token: {}", e);
                }
                self.inner.store.update(|s| {
                    s.sign_out();
                    true
                });
            }
            Err(err) => {
                warn!("[Session] Could not validate stored token: {}", err);
                let message = err.user_message(&err.to_string());
                self.inner.store.update(|s| {
                    s.loading = false;
                    s.last_error = Some(message);
                    if s.identity.is_some() {
                        s.authenticated = true;
                        s.phase = SessionPhase::LoggedIn;
                    } else {
                        s.authenticated = false;
                        s.phase = SessionPhase::Degraded;
                    }
                    true
                });
            }
        }
    }

    /// Exchange credentials for a token, persist it and load the profile.
    ///
    /// On failure the session is left logged out with no stored token and
    /// `last_error` holds the message the server gave.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<Shop> {
        let request = LoginRequest::new(email, password);

        let epoch = {
            let _gate = self.inner.gate.lock();
            let mut epoch = 0;
            self.inner.store.update(|s| {
                epoch = s.bump_epoch();
                s.loading = true;
                s.last_error = None;
                true
            });
            epoch
        };

        match self.authenticate(epoch, &request).await {
            Ok(shop) => {
                let _gate = self.inner.gate.lock();
                if !self.is_current(epoch) {
                    debug!("[Session] Login finished after being superseded");
                    return Err(SessionError::Superseded);
                }
                info!("[Session] Logged in as shop '{}'", shop.name);
                self.inner.store.update(|s| {
                    s.bump_epoch();
                    s.sign_in(shop.clone());
                    true
                });
                Ok(shop)
            }
            Err(err) => {
                self.fail_login(epoch, &err);
                Err(err)
            }
        }
    }

    async fn authenticate(
        &self,
        epoch: u64,
        request: &LoginRequest,
    ) -> SessionResult<Shop> {
        let token = self
            .inner
            .backend
            .login(request)
            .await
            .map_err(|e| SessionError::from_api(e, LOGIN_FALLBACK))?
            .ok_or(SessionError::NoTokenReceived)?;

        {
            let _gate = self.inner.gate.lock();
            if !self.is_current(epoch) {
                return Err(SessionError::Superseded);
            }
            self.inner.tokens.set(&token)?;
        }

        self.inner
            .backend
            .fetch_profile(&token)
            .await
            .map_err(|e| SessionError::from_api(e, PROFILE_FALLBACK))
    }

    fn fail_login(&self, epoch: u64, err: &SessionError) {
        let _gate = self.inner.gate.lock();
        if !self.is_current(epoch) {
            debug!("[Session] Ignoring failure of superseded login: {}", err);
            return;
        }
        warn!("[Session] Login failed: {}", err);
        if let Err(e) = self.inner.tokens.clear() {
            warn!("[Session] Failed to remove token after failed login: {}", e);
        }
        let message = err.to_string();
        self.inner.store.update(|s| {
            s.sign_out();
            s.last_error = Some(message);
            true
        });
    }

    /// Drop the session and the stored token. Safe to call at any time.
    pub fn logout(&self) {
        let _gate = self.inner.gate.lock();
        if let Err(e) = self.inner.tokens.clear() {
            warn!("[Session] Failed to remove stored token: {}", e);
        }
        let changed = self.inner.store.update(|s| {
            if s.is_idle_logged_out() {
                return false;
            }
            s.bump_epoch();
            s.sign_out();
            true
        });
        if changed {
            info!("[Session] Logged out");
        }
    }

    pub fn clear_error(&self) {
        self.inner.store.update(|s| s.last_error.take().is_some());
    }

    /// Current session, reconciled with the token cell.
    pub fn session(&self) -> Session {
        self.reconcile();
        self.inner.store.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.reconcile();
        self.inner.store.with_state(Session::is_authenticated)
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.store.subscribe()
    }

    /// The signed-in shop, or `NotAuthenticated`.
    pub fn require_identity(&self) -> SessionResult<Shop> {
        let session = self.session();
        match session.identity {
            Some(shop) if session.authenticated => Ok(shop),
            _ => Err(SessionError::NotAuthenticated),
        }
    }

    /// Sign out if the token disappeared behind our back, e.g. because the
    /// HTTP layer saw a 401 on some unrelated request.
    fn reconcile(&self) {
        let holds_token = |s: &Session| {
            s.authenticated || s.phase == SessionPhase::Degraded
        };
        if !self.inner.store.with_state(holds_token) || self.inner.tokens.is_present() {
            return;
        }

        let _gate = self.inner.gate.lock();
        if self.inner.tokens.is_present() {
            return;
        }
        let changed = self.inner.store.update(|s| {
            if !holds_token(s) {
                return false;
            }
            s.bump_epoch();
            s.sign_out();
            true
        });
        if changed {
            info!("[Session] Token was cleared, session signed out");
        }
    }
}
