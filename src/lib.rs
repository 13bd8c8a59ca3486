//! Omics Dashboard - demo backend API
//!
//! Proxies status queries to AWS Batch and S3 for the omics demo dashboard
//! and reshapes the responses into the JSON the frontend expects. Every
//! endpoint either forwards a request to a managed cloud API or returns
//! synthetic demo data; there is no persistent state beyond the
//! configuration loaded at startup.

pub mod api;
pub mod cloud;
pub mod config;
pub mod costs;
pub mod error;
pub mod logging;
pub mod resources;
pub mod server;
pub mod state;
pub mod status;
pub mod validate;

pub use config::DashboardConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
