//! JWT issuing and validation for the admin API.
//!
//! RS256 with a configured PEM keypair. Tokens carry the admin id, email
//! and a fixed "admin" role; anything else is rejected at validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::{PageSpyError, Result};
use crate::storage::AdminAccount;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin account id
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_days: u64,
}

impl JwtService {
    pub fn new(private_key_pem: &str, public_key_pem: &str, token_days: u64) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| PageSpyError::validation(format!("Invalid JWT private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| PageSpyError::validation(format!("Invalid JWT public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            token_days,
        })
    }

    /// Create JwtService from config. Both keys are required.
    pub fn from_config() -> Result<Self> {
        let config = crate::config::get_config();

        if config.auth.jwt_private_key.is_empty() || config.auth.jwt_public_key.is_empty() {
            return Err(PageSpyError::validation(
                "JWT keys are not configured (auth.jwt_private_key / auth.jwt_public_key)",
            ));
        }

        Self::new(
            &config.auth.jwt_private_key,
            &config.auth.jwt_public_key,
            config.auth.token_days,
        )
    }

    pub fn generate_token(&self, admin: &AdminAccount) -> Result<String> {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: admin.id.clone(),
            email: admin.email.clone(),
            role: "admin".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(self.token_days as i64)).timestamp(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| PageSpyError::serialization(format!("Token signing failed: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<AdminClaims> {
        let data = decode::<AdminClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::RS256),
        )
        .map_err(|e| PageSpyError::unauthenticated(format!("Invalid or expired token: {}", e)))?;

        if data.claims.role != "admin" {
            return Err(PageSpyError::unauthenticated("Token is not an admin token"));
        }

        Ok(data.claims)
    }
}

/// Extract a token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").filter(|t| !t.is_empty())
}
