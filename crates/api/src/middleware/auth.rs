//! Permission guard for protected routes.
//!
//! [`protected`] composes the guard around a route's handlers:
//!
//! ```ignore
//! Router::new().route(
//!     "/drinks-detail",
//!     protected(state, GET_DRINKS_DETAIL, get(drinks::list_drinks_detail)),
//! )
//! ```
//!
//! The guard verifies the bearer token, checks that the required permission
//! is granted, and inserts the decoded [`Claims`] into the request extensions
//! so handlers can read them with `Extension<Claims>`.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::MethodRouter;

use crate::auth::{extract_bearer_token, AuthError, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Check that `claims` grant `permission`.
pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_ref()
        .ok_or_else(AuthError::permissions_missing)?;

    if !permissions.iter().any(|p| p == permission) {
        return Err(AuthError::permission_not_found());
    }
    Ok(())
}

/// Verify the request's token and require `permission` before running `next`.
pub async fn require_permission(
    state: AppState,
    permission: &'static str,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let result = authorize(&state, permission, req.headers()).await;
    let claims = match result {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                code = err.code,
                status = err.status.as_u16(),
                required_permission = permission,
                uri = %req.uri(),
                "Authorization failed"
            );
            return Err(err.into());
        }
    };

    tracing::debug!(
        sub = claims.sub.as_deref().unwrap_or("-"),
        permission,
        "Authorized"
    );
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

async fn authorize(
    state: &AppState,
    permission: &str,
    headers: &HeaderMap,
) -> Result<Claims, AuthError> {
    let token = extract_bearer_token(headers)?;
    let claims = state.verifier.verify(token).await?;
    check_permission(&claims, permission)?;
    Ok(claims)
}

/// Wrap `route` so every method on it requires `permission`.
pub fn protected(
    state: &AppState,
    permission: &'static str,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(
        state.clone(),
        move |State(state): State<AppState>, req: Request, next: Next| {
            require_permission(state, permission, req, next)
        },
    ))
}
