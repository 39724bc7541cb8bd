pub mod activity;
pub mod dashboard;

pub use dashboard::{DashboardSession, DashboardView, Tab};
