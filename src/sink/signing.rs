//! AWS Signature Version 4 for single-shot S3 `PUT`s.
//!
//! Only what an object upload needs is covered: no query string, and a signed
//! header set of `host`, `x-amz-content-sha256`, `x-amz-date` and, for
//! temporary credentials, `x-amz-security-token`. The payload hash is always
//! computed, never `UNSIGNED-PAYLOAD`.

use std::fmt;

use chrono::{DateTime, Utc};
use ring::{digest, hmac};

// ---

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";

/// Static or temporary AWS credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    // ---
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl AwsCredentials {
    // ---
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, session_token: Option<String>) -> Self {
        self.session_token = session_token;
        self
    }
}

// Keeps secrets out of `{:?}` output, including `log_config` and error chains.
impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The request being signed.
#[derive(Debug, Clone, Copy)]
pub struct PutRequest<'a> {
    /// `host[:port]` exactly as sent in the `Host` header.
    pub host: &'a str,
    /// Already URI-encoded absolute path, e.g. `/bucket/key.json`.
    pub path: &'a str,
    pub region: &'a str,
    pub body: &'a [u8],
}

/// Headers to attach to the outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    // ---
    pub authorization: String,
    pub amz_date: String,
    pub content_sha256: String,
    pub security_token: Option<String>,
}

/// Sign `request` as of `at`.
pub fn sign_put(
    request: &PutRequest<'_>,
    credentials: &AwsCredentials,
    at: DateTime<Utc>,
) -> SignedHeaders {
    // ---
    let amz_date = at.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = at.format("%Y%m%d").to_string();
    let content_sha256 = sha256_hex(request.body);

    // Lower-case names, sorted.
    let mut headers = vec![
        ("host", request.host.trim().to_string()),
        ("x-amz-content-sha256", content_sha256.clone()),
        ("x-amz-date", amz_date.clone()),
    ];
    if let Some(token) = &credentials.session_token {
        headers.push(("x-amz-security-token", token.trim().to_string()));
    }

    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "PUT\n{}\n\n{}\n{}\n{}",
        request.path, canonical_headers, signed_headers, content_sha256
    );

    let scope = format!("{date_stamp}/{}/{SERVICE}/aws4_request", request.region);
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let key = signing_key(
        &credentials.secret_access_key,
        &date_stamp,
        request.region,
        SERVICE,
    );
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes()));

    tracing::debug!("SigV4 canonical request:\n{}", canonical_request);

    SignedHeaders {
        authorization: format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            credentials.access_key_id
        ),
        amz_date,
        content_sha256,
        security_token: credentials.session_token.clone(),
    }
}

/// Derive the per-day, per-region, per-service signing key.
fn signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    // ---
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    hmac::sign(&key, data).as_ref().to_vec()
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(digest::digest(&digest::SHA256, data))
}
