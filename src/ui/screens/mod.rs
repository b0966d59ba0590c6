pub mod calendar;
pub mod dashboard;
pub mod notifications;
pub mod plants;
pub mod settings;

pub use calendar::CalendarScreen;
pub use dashboard::DashboardScreen;
pub use notifications::NotificationsScreen;
pub use plants::PlantsScreen;
pub use settings::{SettingsField, SettingsScreen};
