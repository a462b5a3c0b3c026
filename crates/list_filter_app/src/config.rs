use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use filter_logging::filter_info;
use list_filter_core::SessionConfig;
use list_filter_engine::PagingOptions;
use serde::Deserialize;

/// Virtual time a run may take before it is reported as unsettled.
const DEFAULT_SETTLE_LIMIT: Duration = Duration::from_secs(120);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// On-disk overrides. Every field is optional; durations are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub container_poll_ms: Option<u64>,
    pub locate_retry_delay_ms: Option<u64>,
    pub max_locate_tries: Option<u32>,
    pub scroll_slack: Option<u64>,
    pub settle_delay_ms: Option<u64>,
    pub stall_tolerance: Option<u32>,
    pub mutation_threshold: Option<usize>,
    pub mutation_quiet_period_ms: Option<u64>,
    pub navigation_poll_ms: Option<u64>,
    pub navigation_settle_ms: Option<u64>,
    pub container_selector: Option<String>,
    pub location: Option<String>,
    pub settle_limit_ms: Option<u64>,
    pub paging: Option<PagingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagingConfig {
    pub page_size: Option<usize>,
    pub entry_extent: Option<u64>,
    pub viewport_extent: Option<u64>,
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ron::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    filter_info!("Loaded config from {:?}", path);
    Ok(config)
}

fn millis(value: Option<u64>, fallback: Duration) -> Duration {
    value.map(Duration::from_millis).unwrap_or(fallback)
}

impl AppConfig {
    /// Defaults with every present field laid over them.
    pub fn session_config(&self) -> SessionConfig {
        let base = SessionConfig::default();
        SessionConfig {
            container_poll: millis(self.container_poll_ms, base.container_poll),
            locate_retry_delay: millis(self.locate_retry_delay_ms, base.locate_retry_delay),
            max_locate_tries: self.max_locate_tries.unwrap_or(base.max_locate_tries),
            scroll_slack: self.scroll_slack.unwrap_or(base.scroll_slack),
            settle_delay: millis(self.settle_delay_ms, base.settle_delay),
            stall_tolerance: self.stall_tolerance.unwrap_or(base.stall_tolerance),
            mutation_threshold: self.mutation_threshold.unwrap_or(base.mutation_threshold),
            mutation_quiet_period: millis(self.mutation_quiet_period_ms, base.mutation_quiet_period),
            navigation_poll: millis(self.navigation_poll_ms, base.navigation_poll),
            navigation_settle: millis(self.navigation_settle_ms, base.navigation_settle),
        }
    }

    /// Paging options with the command-line page size taking precedence.
    pub fn paging(&self, page_size: Option<usize>) -> PagingOptions {
        let base = PagingOptions::default();
        let file = self.paging.clone().unwrap_or_default();
        PagingOptions {
            page_size: page_size.or(file.page_size).unwrap_or(base.page_size).max(1),
            entry_extent: file.entry_extent.unwrap_or(base.entry_extent),
            viewport_extent: file.viewport_extent.unwrap_or(base.viewport_extent),
        }
    }

    pub fn settle_limit(&self) -> Duration {
        millis(self.settle_limit_ms, DEFAULT_SETTLE_LIMIT)
    }
}
