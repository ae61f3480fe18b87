// 路由级授权守卫，在处理函数之前执行
// 依赖 auth_middleware 先放入的调用者 User

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::{
    AppState,
    error::AppError,
    group::require_owner,
    models::{Role, User},
    routes::extract::AppPath,
};

const MODERATION_ROLES: &[Role] = &[Role::Moderator, Role::Admin];
const ADMIN_ROLES: &[Role] = &[Role::Admin];

fn path_id(params: &HashMap<String, String>, key: &'static str) -> Result<Uuid, AppError> {
    let raw = params
        .get(key)
        .ok_or_else(|| AppError::Validation(format!("missing path parameter {key}")))?;
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("{key} must be a uuid")))
}

async fn role_gate(
    state: &AppState,
    caller: &User,
    params: &HashMap<String, String>,
    allowed: &[Role],
) -> Result<(), AppError> {
    let group_id = path_id(params, "group_id")?;
    state.gate().require_role(group_id, caller.id, allowed).await
}

/// 群主、moderator 或 admin
pub async fn require_moderator(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    AppPath(params): AppPath<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    role_gate(&state, &caller, &params, MODERATION_ROLES).await?;
    Ok(next.run(req).await)
}

/// 群主或 admin
pub async fn require_admin(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    AppPath(params): AppPath<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    role_gate(&state, &caller, &params, ADMIN_ROLES).await?;
    Ok(next.run(req).await)
}

/// 群主本人，通过后把 `Group` 放入请求扩展
pub async fn require_group_owner(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    AppPath(params): AppPath<HashMap<String, String>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let group_id = path_id(&params, "group_id")?;
    let group = state.group_service().find(group_id).await?;
    require_owner(&group, caller.id)?;

    req.extensions_mut().insert(group);
    Ok(next.run(req).await)
}

/// 地点创建者本人，通过后把 `Location` 放入请求扩展
pub async fn require_location_owner(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    AppPath(params): AppPath<HashMap<String, String>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let location_id = path_id(&params, "location_id")?;
    let location = state.location_service().find(location_id).await?;
    require_owner(&location, caller.id)?;

    req.extensions_mut().insert(location);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_id_requires_uuid() {
        let id = Uuid::new_v4();
        let params = HashMap::from([
            ("group_id".to_string(), id.to_string()),
            ("member_id".to_string(), "nope".to_string()),
        ]);

        assert_eq!(path_id(&params, "group_id").unwrap(), id);
        assert!(matches!(
            path_id(&params, "member_id"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            path_id(&params, "location_id"),
            Err(AppError::Validation(_))
        ));
    }
}
