//! Issues and validates the signed session tokens handed out at log in.

use std::fmt::Debug;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, UserID};

/// How long a session token stays valid after it is issued.
pub const TOKEN_DURATION: Duration = Duration::hours(24);

/// The contents of a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The user the token was issued to.
    pub user_id: UserID,
    /// The expiry time of the token as a unix timestamp.
    pub exp: i64,
    /// The time the token was issued as a unix timestamp.
    #[serde(default)]
    pub iat: i64,
}

/// The keys for signing and verifying session tokens, derived from a shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

impl JwtKeys {
    /// Create signing and verification keys from `secret`.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Any HMAC algorithm is accepted. Asymmetric algorithms fail the key family check.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `user_id` that expires [TOKEN_DURATION] from now.
    ///
    /// # Errors
    ///
    /// Returns [Error::TokenCreation] if the token could not be signed.
    pub fn issue(&self, user_id: UserID) -> Result<String, Error> {
        self.issue_at(user_id, OffsetDateTime::now_utc())
    }

    /// Issue a token for `user_id` as if it were `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns [Error::TokenCreation] if the token could not be signed.
    pub fn issue_at(&self, user_id: UserID, issued_at: OffsetDateTime) -> Result<String, Error> {
        let claims = Claims {
            user_id,
            exp: (issued_at + TOKEN_DURATION).unix_timestamp(),
            iat: issued_at.unix_timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|error| Error::TokenCreation(error.to_string()))
    }

    /// Check `token` and return the user it was issued to.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidToken] if the signature does not verify, the
    /// token declares a non-HMAC algorithm, it has expired, or its `user_id`
    /// claim is missing or not an integer.
    pub fn validate(&self, token: &str) -> Result<UserID, Error> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|token_data| token_data.claims.user_id)
            .map_err(|error| {
                tracing::debug!("rejected session token: {error}");
                Error::InvalidToken
            })
    }
}
