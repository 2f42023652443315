//! Authorization middleware gating routes behind a live session

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{
    error::ApiError,
    models::{Role, Session},
    state::AppState,
};

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Resolve the request's bearer token to a live session
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Session, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;

    state
        .session_manager
        .get_session(token)
        .await
        .ok_or(ApiError::Unauthorized)
}

/// Authentication middleware
///
/// Requires a live session and stores it in the request extensions for
/// handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let session = authenticate(&state, req.headers()).await?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Check that a session carries the required role
///
/// Roles are compared by exact match; no role implies another.
pub fn require_role(session: &Session, role: Role) -> Result<(), ApiError> {
    if session.role != role {
        return Err(ApiError::Forbidden);
    }

    Ok(())
}

/// Admin middleware
///
/// A missing or invalid token fails Unauthorized; a live session whose role
/// is not `Admin` fails Forbidden.
pub async fn admin_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let session = authenticate(&state, req.headers()).await?;
    require_role(&session, Role::Admin)?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_extracts_the_token() {
        let headers = headers_with_authorization("Bearer abc123");
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes() {
        let headers = headers_with_authorization("Basic abc123");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn bearer_token_requires_the_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_tokens() {
        let state = AppState::new();
        let headers = headers_with_authorization("Bearer not-a-session");

        let result = authenticate(&state, &headers).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn require_role_matches_exactly() {
        use chrono::Utc;

        let session = Session {
            token: "t".to_string(),
            user_id: 1,
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        };

        assert!(require_role(&session, Role::Admin).is_ok());
        assert!(matches!(
            require_role(&session, Role::Resident),
            Err(ApiError::Forbidden)
        ));
    }
}
