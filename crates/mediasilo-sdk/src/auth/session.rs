/*
[INPUT]:  Session tokens from the login exchange and 401 notifications
[OUTPUT]: Current session, or a single shared in-flight login
[POS]:    Auth layer - session lifecycle state machine
[UPDATE]: When changing session states or login sharing semantics
*/

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;

use crate::http::{ApiError, Result};
use crate::types::CurrentUser;

/// An established session: opaque token plus the user it belongs to
#[derive(Debug, Clone)]
pub struct Session {
    token: SecretString,
    user: Option<CurrentUser>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<CurrentUser>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            user,
        }
    }

    /// Raw token value, for the session header only
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// The current user record, if the login exchange returned one
    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub(crate) fn with_user(&self, user: CurrentUser) -> Self {
        Self {
            token: self.token.clone(),
            user: Some(user),
        }
    }

    fn same_token(&self, other: &Session) -> bool {
        self.token.expose_secret() == other.token.expose_secret()
    }
}

/// Observable auth state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

type LoginOutcome = Option<Result<Session>>;

enum AuthState {
    Unauthenticated,
    Authenticating(watch::Receiver<LoginOutcome>),
    Authenticated(Session),
}

enum Step {
    Wait(watch::Receiver<LoginOutcome>),
    Login(watch::Sender<LoginOutcome>, watch::Receiver<LoginOutcome>),
}

/// Thread-safe session holder that lets at most one login run at a time.
///
/// The lock is only held for state transitions, never across an await.
#[derive(Clone)]
pub struct SessionManager {
    state: Arc<Mutex<AuthState>>,
}

impl SessionManager {
    /// Create a manager with no session
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(AuthState::Unauthenticated)),
        }
    }

    /// Create a manager that starts out authenticated
    pub fn with_session(session: Session) -> Self {
        Self {
            state: Arc::new(Mutex::new(AuthState::Authenticated(session))),
        }
    }

    pub fn status(&self) -> AuthStatus {
        match &*self.state.lock() {
            AuthState::Unauthenticated => AuthStatus::Unauthenticated,
            AuthState::Authenticating(_) => AuthStatus::Authenticating,
            AuthState::Authenticated(_) => AuthStatus::Authenticated,
        }
    }

    /// The established session, without triggering a login
    pub fn current(&self) -> Option<Session> {
        match &*self.state.lock() {
            AuthState::Authenticated(session) => Some(session.clone()),
            _ => None,
        }
    }

    /// Install a session, replacing whatever state was there
    pub fn adopt(&self, session: Session) {
        *self.state.lock() = AuthState::Authenticated(session);
    }

    /// Update the user record of the current session, if the token still matches
    pub fn refresh_user(&self, token: &str, user: CurrentUser) {
        let mut state = self.state.lock();
        if let AuthState::Authenticated(session) = &*state {
            if session.token() == token {
                *state = AuthState::Authenticated(session.with_user(user));
            }
        }
    }

    /// Drop the session after a 401.
    ///
    /// Only clears the state if `used` is still the current session, so a
    /// stale 401 cannot discard a newer login.
    pub fn invalidate(&self, used: &Session) -> bool {
        let mut state = self.state.lock();
        match &*state {
            AuthState::Authenticated(current) if current.same_token(used) => {
                *state = AuthState::Unauthenticated;
                true
            }
            _ => false,
        }
    }

    /// Forget any session unconditionally
    pub fn clear(&self) {
        *self.state.lock() = AuthState::Unauthenticated;
    }

    /// Return the current session, or run `login` to establish one.
    ///
    /// Concurrent callers that find a login in flight wait for its outcome
    /// instead of starting their own; a failed login is handed to all of them.
    pub async fn get_or_login<F, Fut>(&self, login: F) -> Result<Session>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Session>>,
    {
        let mut login = Some(login);
        loop {
            let step = {
                let mut state = self.state.lock();
                match &*state {
                    AuthState::Authenticated(session) => return Ok(session.clone()),
                    AuthState::Authenticating(rx) => Step::Wait(rx.clone()),
                    AuthState::Unauthenticated => {
                        let (tx, rx) = watch::channel(None);
                        *state = AuthState::Authenticating(rx.clone());
                        Step::Login(tx, rx)
                    }
                }
            };

            match step {
                Step::Wait(mut rx) => {
                    let outcome = match rx.wait_for(Option::is_some).await {
                        Ok(outcome) => outcome.clone(),
                        Err(_) => None,
                    };
                    match outcome {
                        Some(result) => return result,
                        None => self.reset_abandoned(&rx),
                    }
                }
                Step::Login(tx, rx) => {
                    let Some(login) = login.take() else {
                        // Only reachable if a previous login of ours was abandoned.
                        self.clear();
                        return Err(ApiError::Unauthenticated);
                    };
                    let guard = AbandonGuard {
                        manager: self,
                        rx,
                        armed: true,
                    };
                    let result = login().await;
                    guard.disarm(&result);
                    tx.send_replace(Some(result.clone()));
                    return result;
                }
            }
        }
    }

    // The login future was dropped before publishing; let the next caller retry.
    fn reset_abandoned(&self, rx: &watch::Receiver<LoginOutcome>) {
        let mut state = self.state.lock();
        if let AuthState::Authenticating(current) = &*state {
            if current.same_channel(rx) {
                *state = AuthState::Unauthenticated;
            }
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("status", &self.status())
            .finish()
    }
}

// Settles the state of the login that owns `rx`. A state replaced while the
// login was in flight (adopt, clear) is left alone.
struct AbandonGuard<'a> {
    manager: &'a SessionManager,
    rx: watch::Receiver<LoginOutcome>,
    armed: bool,
}

impl AbandonGuard<'_> {
    fn disarm(mut self, result: &Result<Session>) {
        self.settle(match result {
            Ok(session) => AuthState::Authenticated(session.clone()),
            Err(_) => AuthState::Unauthenticated,
        });
        self.armed = false;
    }

    fn settle(&self, next: AuthState) {
        let mut state = self.manager.state.lock();
        if let AuthState::Authenticating(current) = &*state {
            if current.same_channel(&self.rx) {
                *state = next;
            }
        }
    }
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.settle(AuthState::Unauthenticated);
        }
    }
}
