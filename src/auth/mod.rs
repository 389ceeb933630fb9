//! User registration, log in, and the bearer token checks that guard every other route.

mod log_in;
mod middleware;
mod register;
mod token;

pub use log_in::log_in;
pub use middleware::{auth_guard, authorize};
pub use register::{Credentials, register_user};
pub use token::{Claims, JwtKeys, TOKEN_DURATION};
