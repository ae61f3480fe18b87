use axum::{
    Json,
    extract::{Extension, State},
};
use uuid::Uuid;

use crate::{
    AppState,
    error::AppError,
    models::{Location, Page, Role, User},
    routes::{
        common::{AreaRequest, PaginationQuery},
        extract::{AppJson, AppPath, AppQuery},
    },
    utils::{ApiResponse, success_to_api_response},
};

use super::model::{AreaScopeQuery, LocationRequest, LocationResponse};

#[axum::debug_handler]
pub async fn create_location(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(req): AppJson<LocationRequest>,
) -> Result<Json<ApiResponse<LocationResponse>>, AppError> {
    let location = state
        .location_service()
        .create(user.id, req.into())
        .await?;
    Ok(success_to_api_response(location.into()))
}

pub async fn my_locations(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Page<LocationResponse>>>, AppError> {
    let pagination = query.resolve(&state.config)?;
    let page = state
        .location_service()
        .list_for_user(user.id, &pagination)
        .await?;
    Ok(success_to_api_response(page.map(LocationResponse::from)))
}

/// 指定 group_id 时调用者必须是群主或群成员（任意角色）
#[axum::debug_handler]
pub async fn find_in_area(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppQuery(scope): AppQuery<AreaScopeQuery>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppJson(req): AppJson<AreaRequest>,
) -> Result<Json<ApiResponse<Page<LocationResponse>>>, AppError> {
    let pagination = query.resolve(&state.config)?;
    let bounds = req.bounds()?;

    if let Some(group_id) = scope.group_id {
        state
            .gate()
            .require_role(group_id, user.id, &Role::ALL)
            .await?;
    }

    let page = state
        .geo()
        .find_in_area(&bounds, &pagination, scope.group_id)
        .await?;
    Ok(success_to_api_response(page.map(LocationResponse::from)))
}

pub async fn find_location(
    State(state): State<AppState>,
    AppPath(location_id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<LocationResponse>>, AppError> {
    let location = state.location_service().find(location_id).await?;
    Ok(success_to_api_response(location.into()))
}

/// 所有权已由 require_location_owner 检查
pub async fn update_location(
    State(state): State<AppState>,
    Extension(location): Extension<Location>,
    AppJson(req): AppJson<LocationRequest>,
) -> Result<Json<ApiResponse<LocationResponse>>, AppError> {
    let location = state
        .location_service()
        .update(location.id, location.user_id, req.into())
        .await?;
    Ok(success_to_api_response(location.into()))
}

pub async fn delete_location(
    State(state): State<AppState>,
    Extension(location): Extension<Location>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .location_service()
        .delete(location.id, location.user_id)
        .await?;
    Ok(success_to_api_response(()))
}
