//! Token issuing and password hashing
//!
//! Access tokens authorise API calls. Refresh tokens only mint new access
//! tokens, and are also tracked in storage so logout can revoke them. Each
//! token carries a random `jti`, so tokens minted for the same user within
//! one second are still distinct.
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use openmusic_core::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest bcrypt cost the hasher accepts; only worth using in tests
pub const MIN_PASSWORD_COST: u32 = 4;

#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    password_cost: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub jti: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Issued on login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64, refresh_expiration_days: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::hours(access_expiration_hours as i64),
            refresh_ttl: Duration::days(refresh_expiration_days as i64),
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    #[must_use]
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.password_cost).map_err(ServerError::from)
    }

    /// `Ok(false)` on mismatch; `Err` only if `hash` is not a bcrypt hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Mint an access token and a refresh token for a fresh login
    pub fn issue_pair(&self, user_id: &UserId) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(user_id)?,
            refresh_token: self.create_refresh_token(user_id)?,
        })
    }

    pub fn create_access_token(&self, user_id: &UserId) -> Result<String> {
        self.mint(user_id, TokenType::Access, self.access_ttl)
    }

    pub fn create_refresh_token(&self, user_id: &UserId) -> Result<String> {
        self.mint(user_id, TokenType::Refresh, self.refresh_ttl)
    }

    /// Signature and expiry check, any token type
    pub fn decode_claims(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        self.verify_typed(token, TokenType::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        self.verify_typed(token, TokenType::Refresh)
    }

    fn verify_typed(&self, token: &str, expected: TokenType) -> Result<UserId> {
        let claims = self.decode_claims(token)?;
        if claims.token_type != expected {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(UserId::new(claims.sub))
    }

    fn mint(&self, user_id: &UserId, token_type: TokenType, ttl: Duration) -> Result<String> {
        let issued_at = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            jti: Uuid::new_v4().simple().to_string(),
            token_type,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(ServerError::from)
    }
}
