//! JWT token verification
//!
//! Tokens are minted by the external identity provider with a shared
//! secret; this service only verifies them and reads the tenant claims.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared secret the identity provider signs with
    pub secret: String,
    /// Expected issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            issuer: "fleetline-idp".to_string(),
        }
    }
}

impl JwtConfig {
    /// Create JwtConfig from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Verified token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Company (tenant) ID
    pub company: String,
    /// User role
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "fleetline-idp".to_string(),
        }
    }

    fn sign(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn sample_claims() -> TokenClaims {
        let now = chrono::Utc::now().timestamp();
        TokenClaims {
            sub: "4a3b7f68-1111-2222-3333-444455556666".to_string(),
            company: "0c9d8e7f-aaaa-bbbb-cccc-ddddeeeeffff".to_string(),
            role: "Staff".to_string(),
            exp: now + 3600,
            iat: now,
            iss: "fleetline-idp".to_string(),
        }
    }

    #[test]
    fn valid_token_verifies() {
        let config = test_config();
        let claims = sample_claims();
        let token = sign(&claims, &config.secret);
        let decoded = verify_token(&token, &config).unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.company, claims.company);
        assert_eq!(decoded.role, "Staff");
        assert!(!decoded.is_expired());
    }

    #[test]
    fn wrong_secret_rejected() {
        let config = test_config();
        let token = sign(&sample_claims(), "another-secret");
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn wrong_issuer_rejected() {
        let config = test_config();
        let mut claims = sample_claims();
        claims.iss = "someone-else".to_string();
        let token = sign(&claims, &config.secret);
        assert!(verify_token(&token, &config).is_err());
    }
}
