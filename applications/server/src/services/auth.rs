/// Authentication service - JWT and password handling
use crate::config::AuthSettings;
use crate::error::{Result, ServerError};
use crate::middleware::AuthenticatedUser;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use notes_core::UserId;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    access_token_expiration: Duration,
    refresh_token_expiration: Duration,
    bcrypt_cost: u32,
    // Verified against when the email is unknown, so both login failures cost the same
    dummy_hash: OnceLock<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub email: String,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl AuthService {
    pub fn new(
        secret: String,
        access_expiration_hours: u64,
        refresh_expiration_days: u64,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            secret,
            access_token_expiration: Duration::hours(access_expiration_hours as i64),
            refresh_token_expiration: Duration::days(refresh_expiration_days as i64),
            bcrypt_cost,
            dummy_hash: OnceLock::new(),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.jwt_secret.clone(),
            settings.jwt_expiration_hours,
            settings.jwt_refresh_expiration_days,
            settings.bcrypt_cost,
        )
    }

    /// Hash a password using bcrypt with a random salt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash (constant-time comparison)
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Burn one verification's worth of work for an unknown account
    ///
    /// Fails if the dummy hash cannot be built, rather than verifying against
    /// nothing and answering early.
    pub fn verify_against_dummy(&self, password: &str) -> Result<()> {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash,
            None => {
                let hash = self.hash_password("placeholder-password").map_err(|e| {
                    tracing::error!("Failed to build dummy password hash: {}", e);
                    e
                })?;
                self.dummy_hash.get_or_init(|| hash)
            }
        };
        bcrypt::verify(password, hash)?;
        Ok(())
    }

    /// Create an access token
    pub fn create_access_token(&self, user_id: &UserId, email: &str) -> Result<String> {
        self.create_token(user_id, email, TokenType::Access, self.access_token_expiration)
    }

    /// Create a refresh token
    pub fn create_refresh_token(&self, user_id: &UserId, email: &str) -> Result<String> {
        self.create_token(user_id, email, TokenType::Refresh, self.refresh_token_expiration)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify an access token and produce the caller identity for protected procedures
    pub fn authenticate_access_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(ServerError::Unauthorized("Invalid token type".to_string()));
        }
        Ok(AuthenticatedUser::new(UserId::new(claims.sub), claims.email))
    }

    /// Verify that a token is a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(ServerError::Unauthorized("Invalid token type".to_string()));
        }
        Ok(claims)
    }

    fn create_token(
        &self,
        user_id: &UserId,
        email: &str,
        token_type: TokenType,
        expiration: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + expiration;

        let claims = Claims {
            sub: user_id.as_str().to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}
