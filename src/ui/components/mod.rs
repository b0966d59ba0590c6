pub mod calendar;

pub use calendar::{CalendarWidget, CareLegend};
