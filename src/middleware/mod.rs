mod auth;
mod authorization;
mod error_handler;
mod rate_limit;

pub use auth::auth_middleware;
pub use authorization::{
    require_admin, require_group_owner, require_location_owner, require_moderator,
};
pub use error_handler::log_errors;
pub use rate_limit::{RateLimiter, client_ip, rate_limit};
