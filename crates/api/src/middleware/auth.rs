//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::response::fail;
use bursary_core::access::{AccessGate, Operation, Role};
use bursary_shared::{AppError, Claims};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return fail(&AppError::Unauthorized(
            "Authorization header with Bearer token is required".to_string(),
        ));
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(bursary_shared::JwtError::Expired) => {
            fail(&AppError::Unauthorized("Token has expired".to_string()))
        }
        Err(_) => fail(&AppError::Unauthorized(
            "Invalid or malformed token".to_string(),
        )),
    }
}

/// Extractor for authenticated user claims.
///
/// Use this in handlers to get the authenticated user's claims:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let role = auth.require(Operation::ReadBalances)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub const fn user_id(&self) -> uuid::Uuid {
        self.0.user_id()
    }

    /// Returns the user's role string.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.0.role
    }

    /// Checks the role's capabilities for `operation`.
    ///
    /// # Errors
    ///
    /// Returns a `403 Forbidden` envelope response if the role is unknown
    /// or the operation is outside its capability list.
    pub fn require(&self, operation: Operation) -> Result<Role, Response> {
        let Some(role) = Role::parse(&self.0.role) else {
            return Err(fail(&AppError::Forbidden(format!(
                "unrecognized role '{}'",
                self.0.role
            ))));
        };
        AccessGate::authorize(role, operation)
            .map_err(|e| fail(&AppError::Forbidden(e.to_string())))?;
        Ok(role)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| fail(&AppError::Unauthorized("Authentication required".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn auth_user(role: &str) -> AuthUser {
        AuthUser(Claims::new(
            Uuid::new_v4(),
            role,
            Utc::now() + Duration::hours(1),
        ))
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_require_allows_capability() {
        let auth = auth_user("director");
        assert!(auth.require(Operation::ReviewBudget).is_ok());
    }

    #[test]
    fn test_require_rejects_missing_capability() {
        // directors delegate payment recording
        let auth = auth_user("director");
        assert!(auth.require(Operation::RecordPayment).is_err());
    }

    #[test]
    fn test_require_rejects_unknown_role() {
        let auth = auth_user("janitor");
        assert!(auth.require(Operation::ReadBalances).is_err());
    }
}
