//! HS256 admin capability tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{AdminAuthError, AdminClaims, AdminTokens, IssuedToken, ADMIN_SCOPE};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    scope: String,
    iat: i64,
    exp: i64,
}

/// Signs and checks admin tokens with a shared HMAC key.
pub struct JwtAdminTokens {
    secret: SecretString,
    ttl: Duration,
}

impl JwtAdminTokens {
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }
}

impl std::fmt::Debug for JwtAdminTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAdminTokens")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl AdminTokens for JwtAdminTokens {
    fn issue(&self, subject: &str) -> Result<IssuedToken, AdminAuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            scope: ADMIN_SCOPE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AdminAuthError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    fn verify(&self, token: &str) -> Result<AdminClaims, AdminAuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Admin token expired");
                    AdminAuthError::Expired
                }
                _ => {
                    tracing::warn!("Admin token validation failed: {}", e);
                    AdminAuthError::InvalidToken
                }
            }
        })?;

        if data.claims.scope != ADMIN_SCOPE {
            tracing::warn!(scope = %data.claims.scope, "Admin token has wrong scope");
            return Err(AdminAuthError::InvalidToken);
        }

        Ok(AdminClaims {
            subject: data.claims.sub,
            expires_at: data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_token_verifies() {
        let tokens = JwtAdminTokens::new(SECRET, 60);
        let issued = tokens.issue("admin").unwrap();

        let claims = tokens.verify(&issued.token).unwrap();
        assert_eq!(claims.subject, "admin");
        assert_eq!(claims.expires_at, issued.expires_at);
    }

    #[test]
    fn token_from_other_key_is_rejected() {
        let issued = JwtAdminTokens::new(SECRET, 60).issue("admin").unwrap();
        let other = JwtAdminTokens::new("fedcba9876543210fedcba9876543210", 60);

        assert_eq!(other.verify(&issued.token), Err(AdminAuthError::InvalidToken));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = JwtAdminTokens::new(SECRET, -5);
        let issued = tokens.issue("admin").unwrap();

        assert_eq!(tokens.verify(&issued.token), Err(AdminAuthError::Expired));
    }

    #[test]
    fn token_without_admin_scope_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            scope: "viewer".to_string(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let tokens = JwtAdminTokens::new(SECRET, 60);
        assert_eq!(tokens.verify(&token), Err(AdminAuthError::InvalidToken));
    }

    #[test]
    fn garbage_is_rejected() {
        let tokens = JwtAdminTokens::new(SECRET, 60);
        assert_eq!(tokens.verify("not.a.jwt"), Err(AdminAuthError::InvalidToken));
    }
}
