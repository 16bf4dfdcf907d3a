//! Database models for the FarmTrack platform
//!
//! Re-exports models from the shared crate and adds backend-specific models

pub use shared::models::*;
