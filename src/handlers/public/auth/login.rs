// handlers/public/auth/login.rs - POST /auth/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::utils::{AuthPayload, LoginRequest};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AuthService;
use crate::state::AppState;

/// POST /auth/login - Authenticate with email and password
///
/// 200 with `{ accessToken, user }`; 401 "Authentication failed" for an
/// unknown email or a wrong password alike.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthPayload> {
    let Json(request) = payload?;

    let session = AuthService::from_state(&state)
        .login(&request.email, &request.password)
        .await?;

    Ok(ApiResponse::success("Login successful", AuthPayload::from(session)))
}
