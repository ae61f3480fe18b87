mod handler;
mod model;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::AppState;

/// 需要认证的用户路由
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(handler::logout))
        .route("/auth/change-pwd", put(handler::change_password))
        .route(
            "/users",
            get(handler::me)
                .put(handler::update_me)
                .delete(handler::delete_me),
        )
        .route(
            "/users/coordinates",
            get(handler::get_coordinates).put(handler::set_coordinates),
        )
}

/// 公开的注册与登录
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handler::register))
        .route("/auth/login", post(handler::login))
}
