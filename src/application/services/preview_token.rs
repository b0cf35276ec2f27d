//! Signed editor preview tokens.
//!
//! Tokens are compact HS256 JWTs: `header.claims.signature`, each part
//! base64url encoded without padding. The claims are the preview payload
//! plus an optional `exp` unix timestamp.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::{Value, json};
use sha2::Sha256;

use crate::domain::entities::PreviewPayload;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

/// Issues and verifies preview tokens with a shared secret.
#[derive(Clone)]
pub struct PreviewTokenService {
    secret: String,
}

impl PreviewTokenService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::internal("Invalid signing key", json!({ "reason": e.to_string() })))
    }

    /// Mints a token carrying `payload`, valid for `ttl` if given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the payload cannot be encoded.
    pub fn sign(&self, payload: &PreviewPayload, ttl: Option<Duration>) -> Result<String, AppError> {
        let mut claims = serde_json::to_value(payload)
            .map_err(|e| AppError::internal("Failed to encode claims", json!({ "reason": e.to_string() })))?;

        if let (Some(ttl), Some(map)) = (ttl, claims.as_object_mut()) {
            map.insert("exp".to_string(), json!((Utc::now() + ttl).timestamp()));
        }

        let header = URL_SAFE_NO_PAD.encode(json!({ "alg": ALGORITHM, "typ": "JWT" }).to_string());
        let body = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signing_input = format!("{header}.{body}");

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Verifies `token` and decodes its preview payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, signed
    /// with another key or algorithm, expired, or carries no valid payload.
    pub fn verify(&self, token: &str) -> Result<PreviewPayload, AppError> {
        let mut parts = token.trim().split('.');
        let (Some(raw_header), Some(body), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(rejected("Malformed token"));
        };

        let header: Value = decode_part(raw_header)?;
        if header.get("alg").and_then(Value::as_str) != Some(ALGORITHM) {
            return Err(rejected("Unsupported token algorithm"));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| rejected("Malformed token signature"))?;

        let mut mac = self.mac()?;
        mac.update(format!("{raw_header}.{body}").as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| rejected("Invalid token signature"))?;

        let claims: Value = decode_part(body)?;

        if let Some(exp) = claims.get("exp") {
            let exp = exp.as_i64().ok_or_else(|| rejected("Malformed exp claim"))?;
            if exp <= Utc::now().timestamp() {
                return Err(rejected("Token expired"));
            }
        }

        serde_json::from_value(claims).map_err(|e| {
            AppError::unauthorized(
                "Invalid preview payload",
                json!({ "reason": e.to_string() }),
            )
        })
    }
}

fn decode_part(part: &str) -> Result<Value, AppError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|_| rejected("Malformed token encoding"))?;
    serde_json::from_slice(&bytes).map_err(|_| rejected("Malformed token json"))
}

fn rejected(reason: &str) -> AppError {
    AppError::unauthorized("Unauthorized", json!({ "reason": reason }))
}
