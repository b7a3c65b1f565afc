// handlers/protected/organisations/organisation_list.rs - GET /api/organisations

use axum::extract::{Extension, State};
use serde::Serialize;

use crate::database::models::Organisation;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::OrganisationService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrganisationList {
    pub organisations: Vec<Organisation>,
}

/// GET /api/organisations - Every organisation the caller belongs to
pub async fn organisation_list_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<OrganisationList> {
    let organisations = OrganisationService::from_state(&state)
        .list_for_user(auth.id)
        .await?;

    Ok(ApiResponse::success(
        "Organisations retrieved",
        OrganisationList { organisations },
    ))
}
