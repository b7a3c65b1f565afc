// handlers/protected/organisations/member_add.rs - POST /api/organisations/:orgId/users

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::OrganisationService;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddMemberRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAdded {
    pub org_id: Uuid,
    pub user_id: Uuid,
}

/// POST /api/organisations/:orgId/users - Add a user to an organisation the
/// caller already belongs to
pub async fn member_add_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(org_id): Path<String>,
    payload: Result<Json<AddMemberRequest>, JsonRejection>,
) -> ApiResult<MemberAdded> {
    let service = OrganisationService::from_state(&state);
    let organisation = service.get_for_member(auth.id, &org_id).await?;

    // Body is only read once the caller is known to be a member
    let Json(request) = payload?;

    let membership = service
        .add_user_to(auth.id, &organisation, request.user_id.as_deref())
        .await?;

    Ok(ApiResponse::success(
        "User added to organisation successfully",
        MemberAdded {
            org_id: membership.org_id,
            user_id: membership.user_id,
        },
    ))
}
