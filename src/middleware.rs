use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::context::AppState;
use crate::error::ApiError;

/// Middleware guarding the admin console
///
/// Lets the request through only while the Auth Gate is open (after a
/// successful `POST /api/auth/login`). Otherwise responds with
/// **401 Unauthorized**.
pub async fn admin_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authenticated = state.lock().auth.is_authenticated();
    if !authenticated {
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
