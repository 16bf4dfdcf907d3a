//! HTTP handlers for the FarmTrack platform

pub mod auth;
pub mod cost;
pub mod crop;
pub mod harvest;
pub mod health;
pub mod notification;
pub mod project;
pub mod reporting;
pub mod weather;

pub use auth::*;
pub use cost::*;
pub use crop::*;
pub use harvest::*;
pub use health::*;
pub use notification::*;
pub use project::*;
pub use reporting::*;
pub use weather::*;
