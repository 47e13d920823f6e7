//! Authentication middleware
//!
//! Verifies the bearer JWT minted by the external identity provider and
//! installs a [`TenantContext`] into request extensions. Every guarded
//! route reads the tenant scope from there; no handler ever sees an
//! unauthenticated request.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::domain::user::UserRole;
use crate::domain::TenantContext;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

use super::common::ApiResponse;

/// Authentication state shared by all guarded routes.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authentication error types
#[derive(Debug)]
enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    MalformedClaims,
}

impl AuthError {
    fn message(&self) -> &'static str {
        match self {
            Self::MissingToken => "Missing authorization token",
            Self::InvalidToken => "Invalid authorization token",
            Self::ExpiredToken => "Token has expired",
            Self::MalformedClaims => "Token claims are malformed",
        }
    }
}

fn auth_error_response(error: AuthError) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(error.message())),
    )
        .into_response()
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Build the tenant context from verified claims. Tokens without a
/// company or with an unknown role are rejected; there is no
/// tenant-less access.
fn context_from_claims(claims: &TokenClaims) -> Option<TenantContext> {
    let user_id = Uuid::parse_str(&claims.sub).ok()?;
    let company_id = Uuid::parse_str(&claims.company).ok()?;
    let role = UserRole::parse(&claims.role)?;
    Some(TenantContext::new(company_id, user_id, role))
}

/// Bearer JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let Some(ctx) = context_from_claims(&claims) else {
                return auth_error_response(AuthError::MalformedClaims);
            };
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, company: &str, role: &str) -> TokenClaims {
        let now = chrono::Utc::now().timestamp();
        TokenClaims {
            sub: sub.to_string(),
            company: company.to_string(),
            role: role.to_string(),
            exp: now + 3600,
            iat: now,
            iss: "fleetline-idp".to_string(),
        }
    }

    #[test]
    fn well_formed_claims_build_context() {
        let user = Uuid::new_v4();
        let company = Uuid::new_v4();
        let ctx =
            context_from_claims(&claims(&user.to_string(), &company.to_string(), "Manager"))
                .unwrap();
        assert_eq!(ctx.user_id, user);
        assert_eq!(ctx.company_id, company);
        assert_eq!(ctx.role, UserRole::Manager);
    }

    #[test]
    fn unknown_role_rejected() {
        let user = Uuid::new_v4().to_string();
        let company = Uuid::new_v4().to_string();
        assert!(context_from_claims(&claims(&user, &company, "Root")).is_none());
    }

    #[test]
    fn non_uuid_company_rejected() {
        let user = Uuid::new_v4().to_string();
        assert!(context_from_claims(&claims(&user, "acme", "Staff")).is_none());
    }

    #[test]
    fn bearer_prefix_required() {
        assert_eq!(extract_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_token("Basic abc"), None);
    }
}
