mod handler;
mod model;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::{AppState, middleware::require_location_owner};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/locations", post(handler::create_location))
        .route("/locations/my", get(handler::my_locations))
        .route("/locations/in-area", post(handler::find_in_area))
        .route(
            "/locations/{location_id}",
            get(handler::find_location).merge(
                put(handler::update_location)
                    .delete(handler::delete_location)
                    .route_layer(from_fn_with_state(state, require_location_owner)),
            ),
        )
}
