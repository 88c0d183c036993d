/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public MediaSilo SDK crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod config;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AuthScheme,
    AuthStatus,
    CredentialParts,
    CredentialStore,
    Credentials,
    HmacSigner,
    Session,
    DEFAULT_BASE_URL,
};

pub use config::SdkConfig;

// Re-export commonly used types from http
pub use http::{
    ApiError,
    ClientConfig,
    ErrorClass,
    MediaSiloClient,
    Request,
    RequestSigner,
    Response,
    Result,
};

// Re-export all types
pub use types::*;
