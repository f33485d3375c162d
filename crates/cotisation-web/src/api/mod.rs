pub mod auth;
pub mod cotisations;
mod error;
mod http;
pub mod profile;
pub mod users;

pub use error::{ApiError, ApiResult};
