pub mod activity;
pub mod date_window;
pub mod statistics;

pub use activity::{ActivityItem, Category};
pub use date_window::DateWindow;
pub use statistics::Statistics;
