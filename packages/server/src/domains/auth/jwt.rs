use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::common::auth::{AuthError, Claims, PrincipalKind, TokenVerifier};
use crate::common::{AuthorId, UserId};

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub sub: String, // Subject (user or author id)
    #[serde(rename = "e")]
    pub email: String, // Looked up on every authenticated request
    #[serde(rename = "type")]
    pub principal_type: String, // "user" | "author"
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_none"
    )]
    pub role: Option<String>, // Users only
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

// A role claim that is not a string is treated as no role at all.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(role)) => Some(role),
        _ => None,
    })
}

/// JWT Service - creates and verifies HS256 tokens for users and authors
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: chrono::Duration,
}

impl JwtService {
    /// Create new JWT service with secret and issuer. Tokens live 24 hours.
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl: chrono::Duration::hours(24),
        }
    }

    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl = chrono::Duration::minutes(minutes);
        self
    }

    pub fn create_user_token(&self, user_id: UserId, email: &str, role: &str) -> Result<String> {
        self.create_token(
            user_id.to_string(),
            email,
            PrincipalKind::User,
            Some(role.to_string()),
        )
    }

    /// Author tokens never carry a role claim
    pub fn create_author_token(&self, author_id: AuthorId, email: &str) -> Result<String> {
        self.create_token(author_id.to_string(), email, PrincipalKind::Author, None)
    }

    fn create_token(
        &self,
        sub: String,
        email: &str,
        kind: PrincipalKind,
        role: Option<String>,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + self.ttl;

        let claims = TokenClaims {
            sub,
            email: email.to_string(),
            principal_type: kind.as_str().to_string(),
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if the signature, issuer and expiry all check out
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

impl TokenVerifier for JwtService {
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let claims = self
            .verify_token(token)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(Claims {
            subject_email: claims.email,
            principal_kind: claims.principal_type,
            role: claims.role,
        })
    }
}

/// Opaque refresh token handed out next to an access token
pub fn generate_refresh_token(access_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(access_token.as_bytes());
    hasher.update(Uuid::new_v4().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret_key", "test_issuer".to_string())
    }

    #[test]
    fn test_user_token_roundtrip() {
        let user_id = UserId::new();
        let token = service()
            .create_user_token(user_id, "ada@example.com", "SUPER_ADMIN")
            .unwrap();

        let claims = service().verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.principal_type, "user");
        assert_eq!(claims.role.as_deref(), Some("SUPER_ADMIN"));
        assert_eq!(claims.iss, "test_issuer");
    }

    #[test]
    fn test_author_token_has_no_role() {
        let token = service()
            .create_author_token(AuthorId::new(), "jane@example.com")
            .unwrap();

        let claims = service().verify(&token).unwrap();
        assert_eq!(claims.principal_kind, "author");
        assert_eq!(claims.role, None);
    }

    #[test]
    fn test_invalid_token() {
        assert_eq!(service().verify("invalid_token"), Err(AuthError::InvalidToken));
        assert_eq!(service().verify(""), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_secret() {
        let other = JwtService::new("secret2", "test_issuer".to_string());
        let token = other
            .create_user_token(UserId::new(), "ada@example.com", "USER")
            .unwrap();

        assert_eq!(service().verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_issuer() {
        let other = JwtService::new("test_secret_key", "someone_else".to_string());
        let token = other
            .create_user_token(UserId::new(), "ada@example.com", "USER")
            .unwrap();

        assert_eq!(service().verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_token_reads_like_any_invalid_token() {
        let expired = service().with_ttl_minutes(-120);
        let token = expired
            .create_user_token(UserId::new(), "ada@example.com", "USER")
            .unwrap();

        assert_eq!(service().verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_ttl_is_applied() {
        let token = service()
            .with_ttl_minutes(30)
            .create_author_token(AuthorId::new(), "jane@example.com")
            .unwrap();

        let claims = service().verify_token(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_non_string_role_is_dropped() {
        let now = chrono::Utc::now().timestamp();
        let payload = serde_json::json!({
            "sub": "1",
            "e": "ada@example.com",
            "type": "user",
            "role": 42,
            "exp": now + 600,
            "iat": now,
            "iss": "test_issuer",
        });
        let token = encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"test_secret_key"),
        )
        .unwrap();

        let claims = service().verify(&token).unwrap();
        assert_eq!(claims.role, None);
        assert_eq!(claims.subject_email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_issued_user_token_resolves_to_stored_user() {
        use crate::common::auth::{Principal, PrincipalResolver};
        use crate::kernel::test_dependencies::{MockAuthorLookup, MockUserLookup};
        use std::sync::Arc;

        let user_id = UserId::new();
        let resolver = PrincipalResolver::new(
            Arc::new(MockUserLookup::new().with_user("ada@example.com", user_id, "USER")),
            Arc::new(MockAuthorLookup::new()),
        );

        let token = service()
            .create_user_token(user_id, "ada@example.com", "USER")
            .unwrap();
        let claims = service().verify(&token).unwrap();
        let principal = resolver.resolve(&claims).await.unwrap();

        assert!(matches!(principal, Principal::User(ref u) if u.id == user_id));
    }

    #[test]
    fn test_refresh_tokens_are_unique_hex() {
        let a = generate_refresh_token("access");
        let b = generate_refresh_token("access");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
