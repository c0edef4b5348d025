//! Token signing keys
//!
//! A [`KeyManager`] is built once in `main`, before the router exists, and
//! reaches the auth middleware only through [`crate::state::AppState`].
//! Nothing in the crate keeps key material in a global.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    constants::GENERATED_KEY_LENGTH,
    error::{AppError, AppResult},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Editor id
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// HS256 key pair plus token lifetime
pub struct KeyManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl KeyManager {
    /// Keys derived from a shared secret
    pub fn from_secret(secret: &[u8], expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry_hours,
        }
    }

    /// Fresh random key; tokens do not survive a restart
    pub fn generate(expiry_hours: i64) -> Self {
        let mut secret = [0u8; GENERATED_KEY_LENGTH];
        rand::rng().fill(&mut secret[..]);
        Self::from_secret(&secret, expiry_hours)
    }

    /// Build from configuration, generating a key when no secret is set
    pub fn from_config(config: &AuthConfig) -> Self {
        match &config.jwt_secret {
            Some(secret) => Self::from_secret(secret.as_bytes(), config.token_expiry_hours),
            None => {
                tracing::warn!("JWT_SECRET not set, generated a process-local signing key");
                Self::generate(config.token_expiry_hours)
            }
        }
    }

    /// Issue a token for an editor
    pub fn issue(&self, editor_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: editor_id.to_string(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }

    /// Verify a token and extract its claims
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}
