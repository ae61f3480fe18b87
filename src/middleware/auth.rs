use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{AppState, error::AppError};

/// 校验 Bearer 令牌并把调用者 `User` 与 `SessionId` 放入请求扩展
///
/// 已登出的会话和已软删除的用户即使持有未过期的令牌也会被拒绝。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;

    let (user, session) = state.user_service().authenticate(bearer.token()).await?;

    req.extensions_mut().insert(user);
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
