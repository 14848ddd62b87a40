pub mod auth;

pub use auth::{authorize, extract_bearer_token};
