pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod utils;

pub use error::{Result, StatsError};
pub use models::{ActivityItem, Category, DateWindow, Statistics};
