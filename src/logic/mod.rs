pub mod activities;
pub mod calculations;
pub mod catalog;
pub mod coordinator;
pub mod lifecycle;
pub mod notifier;
pub mod timers;

pub use activities::EventGenerator;
pub use catalog::PlantCatalog;
pub use coordinator::CareCoordinator;
pub use lifecycle::Integration;
pub use notifier::NotificationDispatcher;
pub use timers::{TimerKind, TimerRegistry};
