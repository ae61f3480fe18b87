mod handler;
mod model;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::{AppState, middleware::require_group_owner};

pub fn routes(state: AppState) -> Router<AppState> {
    let owner_only = from_fn_with_state(state, require_group_owner);

    Router::new()
        .route("/groups", post(handler::create_group))
        .route("/groups/list", get(handler::list_groups))
        .route(
            "/groups/{group_id}",
            get(handler::find_group).merge(
                put(handler::update_group)
                    .delete(handler::delete_group)
                    .route_layer(owner_only.clone()),
            ),
        )
        .route(
            "/groups/{group_id}/access-code",
            get(handler::access_code).route_layer(owner_only),
        )
}
