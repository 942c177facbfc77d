//! Shared application state.

use chrono::{DateTime, Utc};

use crate::config::PipelineConfig;

/// State shared across handlers. The pipelines themselves are stateless;
/// the only shared mutable state is the artifact files on disk.
pub struct AppState {
    pub pipeline: PipelineConfig,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: PipelineConfig) -> Self {
        Self {
            pipeline,
            started_at: Utc::now(),
        }
    }

    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }

    /// Host memory snapshot for the health endpoint.
    pub fn memory_usage_percent(&self) -> f64 {
        use sysinfo::System;

        let mut sys = System::new();
        sys.refresh_memory();
        if sys.total_memory() == 0 {
            return 0.0;
        }
        (sys.used_memory() as f64 / sys.total_memory() as f64) * 100.0
    }
}
