// handlers/protected/organisations/organisation_get.rs - GET /api/organisations/:orgId

use axum::extract::{Extension, Path, State};

use crate::database::models::Organisation;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::OrganisationService;
use crate::state::AppState;

/// GET /api/organisations/:orgId - Organisation details for members only.
///
/// Any id the caller cannot see, including ones that do not exist, answers
/// 403 "You do not have access to this organisation".
pub async fn organisation_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(org_id): Path<String>,
) -> ApiResult<Organisation> {
    let organisation = OrganisationService::from_state(&state)
        .get_for_member(auth.id, &org_id)
        .await?;

    Ok(ApiResponse::success("Organisation retrieved", organisation))
}
