use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::IdentityClaim;
use crate::utils::AppError;

/// Every token lives exactly this long.
pub const TOKEN_LIFETIME_HOURS: i64 = 2;

/// JWT payload: the identity claim plus registered claims. Verification reads
/// the claim as raw JSON first; a well-signed token whose identity doesn't
/// decode is a payload error, not an invalid token.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims<C> {
    #[serde(flatten)]
    claim: C,
    iat: i64,
    exp: i64,
    // Missing on tokens minted by the previous service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jti: Option<String>,
}

/// Signs and verifies identity tokens with one HS256 key.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        Self::with_lifetime(secret, Duration::hours(TOKEN_LIFETIME_HOURS))
    }

    fn with_lifetime(secret: &str, lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        }
    }

    pub fn issue(&self, claim: IdentityClaim) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = TokenClaims {
            claim,
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
            jti: Some(Uuid::new_v4().to_string()),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Checks signature and expiry, then hands back the claim as signed.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, AppError> {
        let data = decode::<TokenClaims<Value>>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => {
                    log::debug!("Token rejected: {}", e);
                    AppError::InvalidToken
                }
            })?;

        serde_json::from_value(data.claims.claim).map_err(|e| {
            log::debug!("Token payload rejected: {}", e);
            AppError::InvalidTokenPayload
        })
    }
}
