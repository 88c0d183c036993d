/*
[INPUT]:  HTTP client configuration, credentials and API endpoints
[OUTPUT]: Authenticated HTTP calls and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod paths;
pub mod request;
pub mod signature;
pub mod translate;

mod analytics;
mod assets;
mod channels;
mod folders;
mod password;
mod projects;
mod quicklinks;
mod session;
mod users;

pub use error::{ApiError, ErrorClass, FieldError, Result, ValidationDetails};
pub use request::{Request, Response, SignedRequest};
pub use signature::{RequestSigner, SignatureParams};

pub use client::{ClientConfig, MediaSiloClient};
