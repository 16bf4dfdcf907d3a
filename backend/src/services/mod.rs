//! Business logic services for the FarmTrack platform

pub mod auth;
pub mod cost;
pub mod crop;
pub mod harvest;
pub mod notification;
pub mod project;
pub mod reporting;
pub mod weather;

pub use auth::AuthService;
pub use cost::CostService;
pub use crop::CropService;
pub use harvest::HarvestService;
pub use notification::NotificationService;
pub use project::ProjectService;
pub use reporting::ReportingService;
pub use weather::WeatherService;
