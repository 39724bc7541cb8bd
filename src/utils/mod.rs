pub mod config;
pub mod format;

pub use format::{format_minutes, format_minutes_detailed};
