//! Dashboard configuration
//!
//! The demo ships a `config.sh` next to the deployment scripts; this module
//! reads the handful of `KEY=VALUE` pairs it cares about, applies
//! environment overrides, and falls back to defaults for anything missing.
//! A malformed or absent file is logged and ignored, never fatal.

use serde::Serialize;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BUCKET: &str = "omics-demo-bucket";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_STACK_NAME: &str = "omics-demo";

/// Immutable configuration, loaded once per process.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardConfig {
    /// AWS region for all service clients
    pub region: String,
    /// S3 bucket holding demo inputs and results
    pub bucket: String,
    /// AWS credential profile name
    pub profile: String,
    /// CloudFormation stack name; queue and job-definition names derive from it
    pub stack_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            stack_name: DEFAULT_STACK_NAME.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a `KEY=VALUE` file, then apply environment
    /// overrides. Missing or unreadable files leave the defaults in place.
    pub fn load(path: &Path) -> Self {
        let mut config = match fs::read_to_string(path) {
            Ok(contents) => Self::from_key_values(&contents),
            Err(e) => {
                tracing::warn!("Could not read config file {}: {}", path.display(), e);
                Self::default()
            }
        };
        config.apply_env_overrides();
        config
    }

    /// Parse `KEY=VALUE` lines; `#` comments and unrecognized keys are skipped.
    pub fn from_key_values(contents: &str) -> Self {
        let mut config = Self::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.starts_with('#') || !line.contains('=') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').to_string();
            if value.is_empty() {
                continue;
            }
            match key.trim() {
                "REGION" => config.region = value,
                "BUCKET_NAME" => config.bucket = value,
                "PROFILE" => config.profile = value,
                "STACK_NAME" => config.stack_name = value,
                _ => {}
            }
        }
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(region) = env::var("REGION") {
            self.region = region;
        }
        if let Ok(bucket) = env::var("BUCKET_NAME") {
            self.bucket = bucket;
        }
        if let Ok(profile) = env::var("AWS_PROFILE") {
            self.profile = profile;
        }
        if let Ok(stack) = env::var("STACK_NAME") {
            self.stack_name = stack;
        }
    }

    /// Name of the Batch job queue provisioned by the stack.
    pub fn queue_name(&self) -> String {
        format!("{}-queue", self.stack_name)
    }

    /// Name of the Batch job definition provisioned by the stack.
    pub fn job_definition_name(&self) -> String {
        format!("{}-job-def", self.stack_name)
    }
}
