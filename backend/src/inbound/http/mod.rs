//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod bearer;
pub mod doctors;
pub mod emergency;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod users;

pub use error::ApiResult;
