pub mod activity;
pub mod assistant;
pub mod board;
pub mod calendar;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod list;
pub mod paths;
pub mod prefs;
pub mod store;
pub mod task;
pub mod types;
pub mod week;

pub use error::{Result, TaskdeckError};
