mod handler;
mod model;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    middleware::{require_admin, require_moderator},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let moderators = from_fn_with_state(state.clone(), require_moderator);
    let admins = from_fn_with_state(state, require_admin);

    Router::new()
        .route("/members", post(handler::join_group))
        .route(
            "/members/{group_id}",
            get(handler::list_members).route_layer(moderators.clone()),
        )
        .route(
            "/members/{group_id}/in-area",
            post(handler::members_in_area).route_layer(moderators),
        )
        .route("/members/{group_id}/me", delete(handler::leave_group))
        .route(
            "/members/{group_id}/{member_id}",
            put(handler::change_role)
                .delete(handler::remove_member)
                .route_layer(admins),
        )
}
