// handlers/public/auth/register.rs - POST /auth/register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::utils::{AuthPayload, RegisterRequest};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AuthService;
use crate::state::AppState;

/// POST /auth/register - Create a user, their default organisation and a token
///
/// Expected Input:
/// ```json
/// { "firstName": "John", "lastName": "Doe", "email": "john@example.com",
///   "password": "secret", "phone": "1234567890" }
/// ```
///
/// 201 with `{ accessToken, user: { ..., organisations: [...] } }`, or 422
/// naming the first missing field / "Email already exists".
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<AuthPayload> {
    let Json(request) = payload?;
    let registration = request.validate()?;

    let session = AuthService::from_state(&state).register(registration).await?;

    Ok(ApiResponse::created(
        "Registration successful",
        AuthPayload::from(session),
    ))
}
