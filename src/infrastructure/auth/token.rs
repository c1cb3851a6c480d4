//! Session token issuance and verification
//!
//! Tokens are stateless HMAC-signed JWTs bound to a user identifier and
//! valid for exactly one hour. Validity is determined purely by signature
//! and expiry; there is no server-side session state and no revocation list,
//! an accepted trade-off for the short lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Token lifetime: exactly one hour from issuance
pub const TOKEN_TTL_SECS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user primary key)
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
    /// Not-before timestamp, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
}

impl Claims {
    fn new(subject: &UserId) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
            nbf: None,
        }
    }

    /// Subject as a typed user identifier
    pub fn subject(&self) -> Result<UserId, DomainError> {
        UserId::new(&self.sub).map_err(|_| DomainError::InvalidToken)
    }
}

/// Stateless session token service (HS256)
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenService {
    /// Create a token service from the server-held signing secret
    pub fn new(secret: &str) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::configuration(
                "Token signing secret must not be empty",
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a signed token for the given subject
    pub fn issue(&self, subject: &UserId) -> Result<String, DomainError> {
        let claims = Claims::new(subject);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| DomainError::InvalidToken)
    }

    /// Verify a token, distinguishing malformed/forged tokens from expired
    /// and not-yet-active ones
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::ExpiredToken,
                ErrorKind::ImmatureSignature => DomainError::PrematureToken,
                _ => DomainError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-12345").unwrap()
    }

    fn encode_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = service();
        let subject = UserId::generate();

        let token = service.issue(&subject).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.subject().unwrap(), subject);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_malformed_token() {
        let result = service().verify("not-a-token");
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[test]
    fn test_foreign_secret() {
        let other = TokenService::new("a-different-secret").unwrap();
        let token = other.issue(&UserId::generate()).unwrap();

        let result = service().verify(&token);
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: UserId::generate().as_str().to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
            nbf: None,
        };

        let token = encode_raw(&claims, "test-secret-key-12345");

        let result = service().verify(&token);
        assert!(matches!(result, Err(DomainError::ExpiredToken)));
    }

    #[test]
    fn test_premature_token() {
        let now = Utc::now();
        let claims = Claims {
            sub: UserId::generate().as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(2)).timestamp(),
            nbf: Some((now + Duration::hours(1)).timestamp()),
        };

        let token = encode_raw(&claims, "test-secret-key-12345");

        let result = service().verify(&token);
        assert!(matches!(result, Err(DomainError::PrematureToken)));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            TokenService::new(""),
            Err(DomainError::Configuration { .. })
        ));
    }
}
