/*
[INPUT]:  Pending request, active credentials and current session
[OUTPUT]: Signed request headers (session header or OAuth HMAC header)
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::{Credentials, HmacSigner, SIGNATURE_METHOD, Session};
use crate::http::request::{Request, SignedRequest};
use crate::http::{ApiError, Result};

/// Header carrying the session token
pub const SESSION_HEADER: &str = "MediaSiloSessionKey";
/// Header naming the account host a session belongs to
pub const HOST_HEADER: &str = "MediaSiloHostContext";
/// Header carrying the signed-request parameters
pub const AUTHORIZATION_HEADER: &str = "Authorization";

const OAUTH_VERSION: &str = "1.0";

/// Nonce and timestamp a signature is computed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParams {
    pub nonce: String,
    pub timestamp: i64,
}

impl SignatureParams {
    /// Draw a fresh nonce at the current time
    pub fn fresh() -> Self {
        Self {
            nonce: Uuid::new_v4().simple().to_string(),
            timestamp: Utc::now().timestamp(),
        }
    }
}

#[derive(Debug, Clone)]
enum Scheme {
    Session { hostname: String },
    Signed(HmacSigner),
}

/// Produces authentication headers for requests, dispatched by credential variant.
///
/// Signing never mutates shared state; the session is passed in by the caller.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    scheme: Scheme,
}

impl RequestSigner {
    pub fn new(credentials: &Credentials) -> Self {
        let scheme = match credentials {
            Credentials::Password { hostname, .. } | Credentials::Session { hostname, .. } => {
                Scheme::Session {
                    hostname: hostname.clone(),
                }
            }
            Credentials::Signed {
                consumer_key,
                consumer_secret,
                ..
            } => Scheme::Signed(HmacSigner::new(consumer_key.clone(), consumer_secret.clone())),
        };
        Self { scheme }
    }

    /// Sign a request, drawing a fresh nonce for signed-request credentials
    pub fn sign(&self, request: Request, session: Option<&Session>) -> Result<SignedRequest> {
        match &self.scheme {
            Scheme::Session { hostname } => sign_with_session(request, hostname, session),
            Scheme::Signed(_) if !request.requires_auth => Ok(SignedRequest {
                request,
                auth_headers: BTreeMap::new(),
                session: None,
            }),
            Scheme::Signed(_) => self.sign_with(request, &SignatureParams::fresh()),
        }
    }

    /// Sign with an explicit nonce/timestamp. Same inputs give the same signature.
    pub fn sign_with(&self, request: Request, params: &SignatureParams) -> Result<SignedRequest> {
        let Scheme::Signed(signer) = &self.scheme else {
            return Err(ApiError::Configuration(
                "explicit signature parameters require signed-request credentials".to_string(),
            ));
        };

        let mut protocol = protocol_params(signer, params);
        let signature = signer.sign(canonical_string(&request, &protocol).as_bytes())?;
        protocol.push(("oauth_signature".to_string(), signature));

        let mut auth_headers = BTreeMap::new();
        auth_headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            authorization_header(&protocol),
        );

        Ok(SignedRequest {
            request,
            auth_headers,
            session: None,
        })
    }

    /// Recompute the signature for `request` and compare it with `signature`
    pub fn verify(&self, request: &Request, params: &SignatureParams, signature: &str) -> bool {
        let Scheme::Signed(signer) = &self.scheme else {
            return false;
        };
        let protocol = protocol_params(signer, params);
        signer.verify(canonical_string(request, &protocol).as_bytes(), signature)
    }
}

fn sign_with_session(
    request: Request,
    hostname: &str,
    session: Option<&Session>,
) -> Result<SignedRequest> {
    let mut auth_headers = BTreeMap::new();
    auth_headers.insert(HOST_HEADER.to_string(), hostname.to_string());

    if !request.requires_auth {
        return Ok(SignedRequest {
            request,
            auth_headers,
            session: None,
        });
    }

    let session = session.ok_or(ApiError::Unauthenticated)?;
    auth_headers.insert(SESSION_HEADER.to_string(), session.token().to_string());

    Ok(SignedRequest {
        request,
        auth_headers,
        session: Some(session.clone()),
    })
}

fn protocol_params(signer: &HmacSigner, params: &SignatureParams) -> Vec<(String, String)> {
    vec![
        ("oauth_consumer_key".to_string(), signer.consumer_key().to_string()),
        ("oauth_nonce".to_string(), params.nonce.clone()),
        ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
        ("oauth_timestamp".to_string(), params.timestamp.to_string()),
        ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
    ]
}

/// Canonical string a signature covers.
///
/// Format: "{METHOD}&{pct(path)}&{pct(sorted k=v pairs)}", where the pairs are
/// the query parameters plus the `oauth_*` protocol parameters.
pub fn canonical_string(request: &Request, protocol: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = request
        .query
        .iter()
        .chain(protocol.iter())
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    pairs.sort();

    let normalized = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        request.method.as_str().to_ascii_uppercase(),
        encode(&normalize_path(&request.path)),
        encode(&normalized)
    )
}

/// Parse an `Authorization: OAuth ...` header back into its parameters
pub fn parse_authorization(value: &str) -> Option<BTreeMap<String, String>> {
    let params = value.trim().strip_prefix("OAuth ")?;
    params
        .split(',')
        .map(|part| {
            let (key, quoted) = part.trim().split_once('=')?;
            let raw = quoted.strip_prefix('"')?.strip_suffix('"')?;
            let decoded = urlencoding::decode(raw).ok()?;
            Some((key.to_string(), decoded.into_owned()))
        })
        .collect()
}

fn authorization_header(protocol: &[(String, String)]) -> String {
    let params = protocol
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {params}")
}

fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_signer() -> RequestSigner {
        RequestSigner::new(&Credentials::signed("K", "S").unwrap())
    }

    fn params(nonce: &str) -> SignatureParams {
        SignatureParams {
            nonce: nonce.to_string(),
            timestamp: 1_700_000_000,
        }
    }

    fn signature_of(signed: &SignedRequest) -> String {
        let header = signed.header(AUTHORIZATION_HEADER).unwrap();
        parse_authorization(header).unwrap()["oauth_signature"].clone()
    }

    #[test]
    fn test_canonical_string_sorts_and_encodes() {
        let request = Request::get("/projects/123")
            .query("z", "last")
            .query("a", "b c");
        let protocol = vec![("oauth_nonce".to_string(), "n".to_string())];

        assert_eq!(
            canonical_string(&request, &protocol),
            "GET&%2Fprojects%2F123&a%3Db%2520c%26oauth_nonce%3Dn%26z%3Dlast"
        );
    }

    #[test]
    fn test_leading_slash_does_not_change_signature() {
        let signer = signed_signer();
        let a = signer.sign_with(Request::get("projects/123"), &params("n1")).unwrap();
        let b = signer.sign_with(Request::get("/projects/123"), &params("n1")).unwrap();
        assert_eq!(signature_of(&a), signature_of(&b));
    }

    #[test]
    fn test_same_params_same_signature() {
        let signer = signed_signer();
        let a = signer.sign_with(Request::get("projects/123"), &params("n1")).unwrap();
        let b = signer.sign_with(Request::get("projects/123"), &params("n1")).unwrap();
        assert_eq!(signature_of(&a), signature_of(&b));

        let c = signer.sign_with(Request::get("projects/123"), &params("n2")).unwrap();
        assert_ne!(signature_of(&a), signature_of(&c));
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let signer = signed_signer();
        let a = signer.sign(Request::get("projects/123"), None).unwrap();
        let b = signer.sign(Request::get("projects/123"), None).unwrap();
        let a_params = parse_authorization(a.header(AUTHORIZATION_HEADER).unwrap()).unwrap();
        let b_params = parse_authorization(b.header(AUTHORIZATION_HEADER).unwrap()).unwrap();

        assert_ne!(a_params["oauth_nonce"], b_params["oauth_nonce"]);
        assert_ne!(a_params["oauth_signature"], b_params["oauth_signature"]);
        assert_eq!(a_params["oauth_consumer_key"], "K");
        assert_eq!(a_params["oauth_signature_method"], SIGNATURE_METHOD);

        for p in [a_params, b_params] {
            let recomputed = SignatureParams {
                nonce: p["oauth_nonce"].clone(),
                timestamp: p["oauth_timestamp"].parse().unwrap(),
            };
            assert!(signer.verify(
                &Request::get("projects/123"),
                &recomputed,
                &p["oauth_signature"]
            ));
        }
    }

    #[test]
    fn test_query_is_covered_by_signature() {
        let signer = signed_signer();
        let signed = signer
            .sign_with(Request::get("assets").query("include", "acl"), &params("n"))
            .unwrap();
        let signature = signature_of(&signed);
        assert!(signer.verify(&Request::get("assets").query("include", "acl"), &params("n"), &signature));
        assert!(!signer.verify(&Request::get("assets"), &params("n"), &signature));
    }

    #[test]
    fn test_session_scheme_requires_session() {
        let signer = RequestSigner::new(&Credentials::password("u", "p", "h").unwrap());
        let err = signer.sign(Request::get("me"), None).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));

        let session = Session::new("tok", None);
        let signed = signer.sign(Request::get("me"), Some(&session)).unwrap();
        assert_eq!(signed.header(SESSION_HEADER), Some("tok"));
        assert_eq!(signed.header(HOST_HEADER), Some("h"));
    }

    #[test]
    fn test_public_request_carries_no_credentials() {
        let signer = RequestSigner::new(&Credentials::password("u", "p", "h").unwrap());
        let signed = signer.sign(Request::post("session").public(), None).unwrap();
        assert_eq!(signed.header(SESSION_HEADER), None);
        assert_eq!(signed.header(HOST_HEADER), Some("h"));

        let signed = signed_signer()
            .sign(Request::post("passwordreset").public(), None)
            .unwrap();
        assert!(signed.auth_headers.is_empty());
    }

    #[test]
    fn test_explicit_params_rejected_for_session_scheme() {
        let signer = RequestSigner::new(&Credentials::password("u", "p", "h").unwrap());
        let err = signer.sign_with(Request::get("me"), &params("n")).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }
}
