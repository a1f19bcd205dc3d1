//! Signed download-link tokens
//!
//! A token is an HS256 JWT carrying the recipient address, issue time, expiry
//! and a random id. Nothing is stored server side: a token is valid when its
//! signature checks out under the process secret and the clock has not passed
//! its expiry.

use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use folio_shared::constants::LINK_TOKEN_TTL_HOURS;

use crate::clock::Clock;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing secret is empty")]
    MissingSecret,
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token is malformed")]
    Malformed,
    #[error("Token signature mismatch")]
    BadSignature,
    #[error("Token expired")]
    Expired,
    #[error("Token already redeemed")]
    Replayed,
}

impl TokenError {
    /// Whether the error describes a presented token rather than a service fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed | TokenError::BadSignature | TokenError::Expired | TokenError::Replayed
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

/// A freshly minted token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub value: String,
    pub id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Claims of a token that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedLink {
    pub subject: String,
    pub id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub struct LinkTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl LinkTokenService {
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        Self::with_ttl(secret, Duration::hours(LINK_TOKEN_TTL_HOURS), clock)
    }

    pub fn with_ttl(secret: &str, ttl: Duration, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        // Expiry is checked against our own clock after the signature passes.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            clock,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current time on the clock tokens are checked against.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn mint(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        let issued_at = self.clock.now().trunc_subsecs(0);
        let expires_at = issued_at + self.ttl;
        let claims = LinkClaims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::CreationError(e.to_string()))?;

        Ok(IssuedToken {
            value,
            id: claims.jti,
            expires_at,
        })
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedLink, TokenError> {
        let claims = decode::<LinkClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)?;

        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(TokenError::Malformed)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::Malformed)?;

        if self.clock.now() > expires_at {
            return Err(TokenError::Expired);
        }

        Ok(VerifiedLink {
            subject: claims.sub,
            id: claims.jti,
            issued_at,
            expires_at,
        })
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
