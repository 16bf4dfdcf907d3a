//! Domain models for the FarmTrack platform

mod cost;
mod crop;
mod harvest;
mod project;
mod weather;

pub use cost::*;
pub use crop::*;
pub use harvest::*;
pub use project::*;
pub use weather::*;
