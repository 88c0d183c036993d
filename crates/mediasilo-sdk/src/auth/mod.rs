/*
[INPUT]:  Credential configuration and login results
[OUTPUT]: Credentials, sessions, and HMAC signing primitives
[POS]:    Auth layer - handles MediaSilo API authentication state
[UPDATE]: When auth flow or signature methods change
*/

pub mod credentials;
pub mod session;
pub mod signer;
pub mod store;

pub use credentials::{AuthScheme, CredentialParts, Credentials, DEFAULT_BASE_URL};
pub use session::{AuthStatus, Session, SessionManager};
pub use signer::{HmacSigner, SIGNATURE_METHOD};
pub use store::CredentialStore;
