//! JWT issuance, verification and bearer-token resolution.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. The subject is
//! the user's immutable `user_name`; resolution loads the user row for it, so
//! a token for a user that no longer matches any row is rejected.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use movingday_core::types::DbId;
use movingday_db::models::user::User;
use movingday_db::repositories::UserRepo;
use movingday_db::DbPool;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{parse_or, ConfigError};

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's `user_name`.
    pub sub: String,
    /// The user's internal database id.
    pub user_id: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for token signing and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes (default: 1440).
    pub expiry_mins: i64,
}

/// Default token lifetime in minutes (one day).
const DEFAULT_EXPIRY_MINS: i64 = 1440;

/// Longest accepted token lifetime in minutes (one year).
const MAX_EXPIRY_MINS: i64 = 525_600;

impl JwtConfig {
    /// Load JWT configuration through a variable lookup.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_MINS` | no       | `1440`  |
    ///
    /// `JWT_EXPIRY_MINS` must lie in `1..=525600`.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let expiry_mins = parse_or(lookup, "JWT_EXPIRY_MINS", DEFAULT_EXPIRY_MINS)?;
        if !(1..=MAX_EXPIRY_MINS).contains(&expiry_mins) {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_MINS",
                reason: format!("must be between 1 and {MAX_EXPIRY_MINS}"),
            });
        }

        Ok(Self {
            secret,
            expiry_mins,
        })
    }
}

/// Why a request could not be authenticated.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing or malformed bearer token")]
    MissingToken,

    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token subject matches no user")]
    UnknownSubject,

    #[error("user lookup failed: {0}")]
    Store(#[from] sqlx::Error),
}

/// Issues and verifies bearer tokens with an injected signing secret.
pub struct TokenService {
    expiry_mins: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            expiry_mins: config.expiry_mins,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: Validation::default(), // HS256, validates exp
        }
    }

    /// Token lifetime in seconds, as reported to clients at login.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_mins * 60
    }

    /// Sign a token for `user`.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.user_name.clone(),
            user_id: user.id,
            iat: now,
            exp: now + self.expires_in_secs(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Check signature and expiry, returning the embedded [`Claims`].
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidSignature,
            })
    }

    /// Resolve an `Authorization` header value to the user it names.
    pub async fn resolve(
        &self,
        pool: &DbPool,
        authorization: Option<&str>,
    ) -> Result<User, AuthError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        let claims = self.verify(token)?;

        UserRepo::find_by_user_name(pool, &claims.sub)
            .await?
            .ok_or(AuthError::UnknownSubject)
    }
}

/// Extract the token from `Bearer <token>`. The scheme is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
