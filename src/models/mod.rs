pub mod event;
pub mod notification;
pub mod plant;
pub mod preferences;
pub mod schedule;

pub use event::*;
pub use notification::*;
pub use plant::*;
pub use preferences::*;
pub use schedule::*;
