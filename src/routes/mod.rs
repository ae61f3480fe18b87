// HTTP 路由
// 公开路由只有注册与登录，其余路由都经过 auth_middleware

pub mod common;
pub mod extract;
pub mod group;
pub mod location;
pub mod member;
pub mod user;

use axum::{Router, middleware::from_fn_with_state};

use crate::{AppState, middleware::auth_middleware};

/// 挂载在 `API_BASE_URI` 下的全部业务路由
pub fn api_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .merge(user::routes())
        .merge(location::routes(state.clone()))
        .merge(group::routes(state.clone()))
        .merge(member::routes(state.clone()))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .merge(user::public_routes())
        .merge(protected_routes);

    Router::new()
        .nest(&state.config.api_base_uri, api)
        .with_state(state)
}
