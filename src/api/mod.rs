//! API endpoints module

pub mod config;
pub mod health;
pub mod resources;
pub mod start;
pub mod stats;
pub mod status;

pub use config::get_config;
pub use health::get_health;
pub use resources::get_resources;
pub use start::{start_demo, StartResponse, START_DEMO_SCHEMA};
pub use stats::{get_stats, VariantStats};
pub use status::get_status;
