// handlers/protected/organisations/organisation_create.rs - POST /api/organisations

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};
use serde::Deserialize;

use crate::database::models::Organisation;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::OrganisationService;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrganisationRequest {
    pub name: String,
    pub description: Option<String>,
}

/// POST /api/organisations - Create an organisation with the caller as member
pub async fn organisation_create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<CreateOrganisationRequest>, JsonRejection>,
) -> ApiResult<Organisation> {
    let Json(request) = payload?;

    let organisation = OrganisationService::from_state(&state)
        .create(auth.id, &request.name, request.description.as_deref())
        .await?;

    Ok(ApiResponse::created(
        "Organisation created successfully",
        organisation,
    ))
}
