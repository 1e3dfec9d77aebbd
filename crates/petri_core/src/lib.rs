pub mod config;
pub mod constants;
pub mod history;
pub mod types;

pub use config::SimConfig;
pub use constants::*;
pub use history::{BoundedHistory, HistoryError};
pub use types::Species;
