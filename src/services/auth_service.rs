// src/services/auth_service.rs
// DOCUMENTATION: Password hashing and access tokens
// PURPOSE: argon2 password storage and HS256 bearer tokens carrying the user id

use crate::errors::WishlistError;
use crate::models::User;
use argon2::password_hash::{rand_core, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// argon2 hasher with default parameters
/// DOCUMENTATION: Hashing is CPU bound, so both operations run on the
/// blocking thread pool instead of an async worker
#[derive(Debug, Clone, Default)]
pub struct PasswordService {
    hasher: Argon2<'static>,
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn hash(&self, password: &str) -> Result<String, WishlistError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut rand_core::OsRng);
            hasher
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| {
            log::error!("Password hashing task failed: {}", e);
            WishlistError::InternalError
        })?
        .map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            WishlistError::InternalError
        })
    }

    /// True when `password` matches the stored PHC string
    pub async fn verify(&self, password_hash: &str, password: &str) -> Result<bool, WishlistError> {
        let hasher = self.hasher.clone();
        let password_hash = password_hash.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || match PasswordHash::new(&password_hash) {
            Ok(parsed) => hasher
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                log::error!("Stored password hash is malformed: {}", e);
                false
            }
        })
        .await
        .map_err(|e| {
            log::error!("Password verification task failed: {}", e);
            WishlistError::InternalError
        })
    }
}

/// JWT claims: subject is the user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

/// Token handed back to the client after register/login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiration: u64,
}

impl TokenService {
    pub fn new(secret: String, expiration: u64) -> Self {
        Self { secret, expiration }
    }

    pub fn issue(&self, user: &User) -> Result<IssuedToken, WishlistError> {
        let iat = Utc::now().timestamp().max(0) as u64;
        let exp = iat + self.expiration;

        let claims = TokenClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat,
            exp,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            log::error!("Failed to sign token for user {}: {}", user.id, e);
            WishlistError::InternalError
        })?;

        Ok(IssuedToken {
            token,
            expires_at: exp as i64,
        })
    }

    /// Validate signature and expiry, returning the claims
    pub fn claims(&self, token: &str) -> Result<TokenClaims, WishlistError> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            log::debug!("Rejected access token: {}", e);
            WishlistError::Unauthorized("Invalid or expired token".to_string())
        })
    }

    /// Validate a token and return the user id it was issued for
    pub fn authenticate(&self, token: &str) -> Result<Uuid, WishlistError> {
        let claims = self.claims(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|_| WishlistError::Unauthorized("Invalid token subject".to_string()))
    }
}
