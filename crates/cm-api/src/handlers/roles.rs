//! Role API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cm_core::traits::Id;
use cm_models::RoleParams;

use super::created;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AppState};
use crate::representers::RoleRepresentation;

/// GET /api/roles
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Json<Vec<RoleRepresentation>>> {
    let roles = state.services.roles.list().await?;
    Ok(Json(roles.into_iter().map(Into::into).collect()))
}

/// GET /api/roles/:id
pub async fn get_role(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<Json<RoleRepresentation>> {
    let role = state.services.roles.get(id).await?;
    Ok(Json(role.into()))
}

/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<RoleParams>,
) -> ApiResult<impl IntoResponse> {
    let role = state.services.roles.create(params).await?;
    Ok(created(
        format!("/api/roles/{}", role.id),
        RoleRepresentation::from(role),
    ))
}

/// PUT /api/roles/:id
pub async fn update_role(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
    ApiJson(params): ApiJson<RoleParams>,
) -> ApiResult<StatusCode> {
    state.services.roles.update(id, params).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/roles/:id
pub async fn delete_role(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<StatusCode> {
    state.services.roles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
