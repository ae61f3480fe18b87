use axum::{
    Json,
    extract::{Extension, State},
};
use uuid::Uuid;

use crate::{
    AppState,
    error::AppError,
    models::{Group, Page, User},
    routes::{
        common::PaginationQuery,
        extract::{AppJson, AppPath, AppQuery},
    },
    utils::{ApiResponse, success_to_api_response},
};

use super::model::{AccessCodeResponse, GroupRequest, GroupResponse};

#[axum::debug_handler]
pub async fn create_group(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(req): AppJson<GroupRequest>,
) -> Result<Json<ApiResponse<GroupResponse>>, AppError> {
    let group = state
        .group_service()
        .create(user.id, req.title()?, &req.description)
        .await?;
    Ok(success_to_api_response(GroupResponse::for_owner(group)))
}

pub async fn list_groups(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Page<GroupResponse>>>, AppError> {
    let pagination = query.resolve(&state.config)?;
    let page = state.group_service().list(&pagination).await?;
    Ok(success_to_api_response(page.map(GroupResponse::from)))
}

pub async fn find_group(
    State(state): State<AppState>,
    AppPath(group_id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<GroupResponse>>, AppError> {
    let group = state.group_service().find(group_id).await?;
    Ok(success_to_api_response(group.into()))
}

/// 以下处理函数的所有权已由 require_group_owner 检查
pub async fn update_group(
    State(state): State<AppState>,
    Extension(group): Extension<Group>,
    AppJson(req): AppJson<GroupRequest>,
) -> Result<Json<ApiResponse<GroupResponse>>, AppError> {
    let group = state
        .group_service()
        .update(group.id, req.title()?, &req.description)
        .await?;
    Ok(success_to_api_response(GroupResponse::for_owner(group)))
}

pub async fn delete_group(
    State(state): State<AppState>,
    Extension(group): Extension<Group>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.group_service().delete(group.id).await?;
    Ok(success_to_api_response(()))
}

pub async fn access_code(
    Extension(group): Extension<Group>,
) -> Json<ApiResponse<AccessCodeResponse>> {
    success_to_api_response(AccessCodeResponse {
        access_code: group.access_code,
    })
}
