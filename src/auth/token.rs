use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("token subject is not a member id")]
    Subject,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Member id, as a string.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Mints and verifies HS256 bearer tokens for members.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issues a token for `member_id` that expires `ttl` from now.
    pub fn issue(&self, member_id: i32) -> Result<String, TokenError> {
        self.issue_at(member_id, Utc::now().timestamp())
    }

    /// Issues a token as if minted at `issued_at` (unix seconds).
    pub fn issue_at(&self, member_id: i32, issued_at: i64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: member_id.to_string(),
            iat: issued_at,
            exp: issued_at + self.ttl.num_seconds(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Returns the member id carried by a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<i32, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)?;
        data.claims.sub.parse().map_err(|_| TokenError::Subject)
    }
}
