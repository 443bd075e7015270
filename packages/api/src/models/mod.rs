//! Data models for the application.

mod report;
mod user;
mod vital;

pub use report::{Insight, Report};
pub use user::UserInfo;
pub use vital::{Vital, VitalForm};
