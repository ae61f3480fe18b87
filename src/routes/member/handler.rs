use axum::{
    Json,
    extract::{Extension, State},
};
use uuid::Uuid;

use crate::{
    AppState,
    error::AppError,
    models::{Page, User},
    routes::{
        common::{AreaRequest, PaginationQuery},
        extract::{AppJson, AppPath, AppQuery},
    },
    utils::{ApiResponse, success_to_api_response},
};

use super::model::{ChangeRoleRequest, JoinRequest, MemberResponse};

#[axum::debug_handler]
pub async fn join_group(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(req): AppJson<JoinRequest>,
) -> Result<Json<ApiResponse<MemberResponse>>, AppError> {
    let member = state
        .authority()
        .join(req.access_code.trim(), user.id)
        .await?;
    Ok(success_to_api_response(member.into()))
}

pub async fn list_members(
    State(state): State<AppState>,
    AppPath(group_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Page<MemberResponse>>>, AppError> {
    let pagination = query.resolve(&state.config)?;
    let page = state.authority().list_members(group_id, &pagination).await?;
    Ok(success_to_api_response(page.map(MemberResponse::from)))
}

pub async fn members_in_area(
    State(state): State<AppState>,
    AppPath(group_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppJson(req): AppJson<AreaRequest>,
) -> Result<Json<ApiResponse<Page<MemberResponse>>>, AppError> {
    let pagination = query.resolve(&state.config)?;
    let bounds = req.bounds()?;
    let page = state
        .geo()
        .find_members_in_area(group_id, &bounds, &pagination)
        .await?;
    Ok(success_to_api_response(page.map(MemberResponse::from)))
}

pub async fn leave_group(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(group_id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.authority().leave(group_id, user.id).await?;
    Ok(success_to_api_response(()))
}

pub async fn change_role(
    State(state): State<AppState>,
    AppPath((group_id, member_id)): AppPath<(Uuid, Uuid)>,
    AppJson(req): AppJson<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<MemberResponse>>, AppError> {
    let authority = state.authority();
    let member = authority.member_in_group(group_id, member_id).await?;
    let member = authority.change_role(member.id, &req.role).await?;
    Ok(success_to_api_response(member.into()))
}

pub async fn remove_member(
    State(state): State<AppState>,
    AppPath((group_id, member_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let authority = state.authority();
    let member = authority.member_in_group(group_id, member_id).await?;
    authority.remove(member.id).await?;
    Ok(success_to_api_response(()))
}
