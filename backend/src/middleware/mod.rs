//! HTTP middleware for the FarmTrack platform

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
