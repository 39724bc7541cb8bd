pub mod activity;
pub mod dashboard;
pub mod member;
pub mod settings;

pub use activity::*;
pub use dashboard::*;
pub use member::*;
pub use settings::*;
