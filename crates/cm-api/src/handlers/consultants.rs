//! Consultant API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cm_core::traits::Id;
use cm_models::{Consultant, ConsultantParams};

use super::created;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AppState};
use crate::representers::{ConsultantRepresentation, ConsultantRepresenter};

async fn represent(state: &AppState, consultant: Consultant) -> ApiResult<ConsultantRepresentation> {
    let role = state.services.roles.get(consultant.consultant_role_id).await?;
    Ok(ConsultantRepresenter::represent(consultant, Some(&role)))
}

/// GET /api/consultants
pub async fn list_consultants(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ConsultantRepresentation>>> {
    let consultants = state.services.consultants.list().await?;
    let roles = state.services.roles.list().await?;
    Ok(Json(ConsultantRepresenter::represent_all(consultants, roles)))
}

/// GET /api/consultants/:id
pub async fn get_consultant(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<Json<ConsultantRepresentation>> {
    let consultant = state.services.consultants.get(id).await?;
    Ok(Json(represent(&state, consultant).await?))
}

/// POST /api/consultants
pub async fn create_consultant(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<ConsultantParams>,
) -> ApiResult<impl IntoResponse> {
    let consultant = state.services.consultants.create(params).await?;
    let location = format!("/api/consultants/{}", consultant.id);
    Ok(created(location, represent(&state, consultant).await?))
}

/// PUT /api/consultants/:id
pub async fn update_consultant(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
    ApiJson(params): ApiJson<ConsultantParams>,
) -> ApiResult<StatusCode> {
    state.services.consultants.update(id, params).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/consultants/:id
pub async fn delete_consultant(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<StatusCode> {
    state.services.consultants.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
