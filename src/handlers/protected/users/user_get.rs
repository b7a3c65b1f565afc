// handlers/protected/users/user_get.rs - GET /api/users/:id

use axum::extract::{Extension, Path, State};

use crate::database::models::UserProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UserService;
use crate::state::AppState;

/// GET /api/users/:id - The caller's own profile, or that of a user who shares
/// an organisation with them
pub async fn user_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> ApiResult<UserProfile> {
    let user = UserService::from_state(&state)
        .get_visible(auth.id, &user_id)
        .await?;

    Ok(ApiResponse::success("User retrieved", user.profile()))
}
