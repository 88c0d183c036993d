/*
[INPUT]:  Validated credentials
[OUTPUT]: Read-only credential access plus the owned session state
[POS]:    Auth layer - credential store shared by signer and transport
[UPDATE]: When credential variants or session ownership change
*/

use secrecy::ExposeSecret;

use super::{AuthScheme, AuthStatus, Credentials, Session, SessionManager};

/// Holds the client's credentials and its session.
///
/// Credentials never change after construction; the session changes only
/// through [`CredentialStore::adopt_session`], a login, or a 401.
#[derive(Debug)]
pub struct CredentialStore {
    credentials: Credentials,
    sessions: SessionManager,
}

impl CredentialStore {
    pub fn new(credentials: Credentials) -> Self {
        let sessions = match &credentials {
            Credentials::Session { session_token, .. } => SessionManager::with_session(
                Session::new(session_token.expose_secret().to_string(), None),
            ),
            _ => SessionManager::new(),
        };
        Self {
            credentials,
            sessions,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn scheme(&self) -> AuthScheme {
        self.credentials.scheme()
    }

    pub fn hostname(&self) -> Option<&str> {
        self.credentials.hostname()
    }

    /// Current session, if one is established
    pub fn session(&self) -> Option<Session> {
        self.sessions.current()
    }

    pub fn auth_status(&self) -> AuthStatus {
        self.sessions.status()
    }

    /// Install a session obtained from a successful login exchange
    pub fn adopt_session(&self, session: Session) {
        self.sessions.adopt(session);
    }

    pub(crate) fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_store_starts_unauthenticated() {
        let store = CredentialStore::new(Credentials::password("u", "p", "h").unwrap());
        assert_eq!(store.auth_status(), AuthStatus::Unauthenticated);
        assert!(store.session().is_none());

        store.adopt_session(Session::new("token", None));
        assert_eq!(store.session().unwrap().token(), "token");
    }

    #[test]
    fn test_session_store_starts_authenticated() {
        let store = CredentialStore::new(Credentials::session("preset", "h").unwrap());
        assert_eq!(store.auth_status(), AuthStatus::Authenticated);
        assert_eq!(store.session().unwrap().token(), "preset");
        assert_eq!(store.hostname(), Some("h"));
    }

    #[test]
    fn test_signed_store_has_no_session() {
        let store = CredentialStore::new(Credentials::signed("K", "S").unwrap());
        assert_eq!(store.scheme(), AuthScheme::Signed);
        assert!(store.session().is_none());
        assert!(store.hostname().is_none());
    }
}
