use farmstall_model::Shop;
use tokio::sync::watch;

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    LoggedOut,
    /// A stored token is being checked against the backend.
    Validating,
    LoggedIn,
    /// A token is stored but could not be verified because the backend was
    /// unreachable, and no identity was known beforehand.
    Degraded,
}

/// Snapshot of the shop session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub identity: Option<Shop>,
    pub authenticated: bool,
    pub loading: bool,
    pub last_error: Option<String>,
    pub phase: SessionPhase,
    epoch: u64,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn identity(&self) -> Option<&Shop> {
        self.identity.as_ref()
    }

    /// Counter bumped by every login and logout transition.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn bump_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    pub(crate) fn sign_in(&mut self, shop: Shop) {
        self.identity = Some(shop);
        self.authenticated = true;
        self.phase = SessionPhase::LoggedIn;
        self.loading = false;
        self.last_error = None;
    }

    pub(crate) fn sign_out(&mut self) {
        self.identity = None;
        self.authenticated = false;
        self.phase = SessionPhase::LoggedOut;
        self.loading = false;
    }

    /// Logged out with nothing pending.
    pub(crate) fn is_idle_logged_out(&self) -> bool {
        self.phase == SessionPhase::LoggedOut
            && !self.loading
            && !self.authenticated
            && self.identity.is_none()
    }
}

/// Watch-backed holder of the current [`Session`].
#[derive(Debug)]
pub struct SessionStore {
    sender: watch::Sender<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Session::default());
        Self { sender }
    }

    pub fn current(&self) -> Session {
        self.sender.borrow().clone()
    }

    /// Access state without cloning
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        f(&self.sender.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }

    /// Apply `f`; subscribers are notified only if it returns `true`.
    pub(crate) fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Session) -> bool,
    {
        self.sender.send_if_modified(f)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_idle_logged_out() {
        let session = Session::default();
        assert!(session.is_idle_logged_out());
        assert_eq!(session.epoch(), 0);
    }

    #[tokio::test]
    async fn subscribers_only_see_real_changes() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        assert!(!store.update(|_| false));
        assert!(!rx.has_changed().unwrap());

        store.update(|s| {
            s.loading = true;
            true
        });
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().loading);
    }
}
