pub mod config;
pub mod text;
pub mod types;

pub use config::DashboardConfig;
pub use text::html_escape;
pub use types::*;
