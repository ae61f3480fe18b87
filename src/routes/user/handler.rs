use axum::{
    Json,
    extract::{Extension, State},
};

use crate::{
    AppState,
    cache::SessionId,
    error::AppError,
    models::User,
    routes::extract::AppJson,
    utils::{ApiResponse, success_to_api_response},
};

use super::model::{
    ChangePasswordRequest, CoordinatesRequest, CoordinatesResponse, LoginRequest, LoginResponse,
    RegisterRequest, UpdateUserRequest, UserResponse,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state
        .user_service()
        .register(&req.name, &req.email, &req.password)
        .await?;
    Ok(success_to_api_response(user.into()))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let issued = state.user_service().login(&req.email, &req.password).await?;
    Ok(success_to_api_response(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: issued.user.into(),
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.user_service().logout(session).await?;
    Ok(success_to_api_response(()))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .user_service()
        .change_password(&user, &req.old_password, &req.new_password)
        .await?;
    Ok(success_to_api_response(()))
}

pub async fn me(Extension(user): Extension<User>) -> Json<ApiResponse<UserResponse>> {
    success_to_api_response(user.into())
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state
        .user_service()
        .update_profile(user.id, &req.name, &req.email)
        .await?;
    Ok(success_to_api_response(user.into()))
}

pub async fn delete_me(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.user_service().delete(user.id).await?;
    Ok(success_to_api_response(()))
}

pub async fn get_coordinates(
    Extension(user): Extension<User>,
) -> Json<ApiResponse<CoordinatesResponse>> {
    success_to_api_response(CoordinatesResponse {
        lat: user.lat,
        lon: user.lon,
    })
}

pub async fn set_coordinates(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(req): AppJson<CoordinatesRequest>,
) -> Result<Json<ApiResponse<CoordinatesResponse>>, AppError> {
    state
        .user_service()
        .set_coordinates(user.id, req.lat, req.lon)
        .await?;
    Ok(success_to_api_response(CoordinatesResponse {
        lat: Some(req.lat),
        lon: Some(req.lon),
    }))
}
