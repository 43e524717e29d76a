//! Collector tuning

use std::time::Duration;

use crate::enumerate::UnitFile;

/// Options controlling a collection run. The default is unbounded fan-out
/// with no read timeout and no name filter.
#[derive(Debug, Clone, Default)]
pub struct CollectorConfig {
    /// Maximum number of unit files read at once (None = one task per file, all at once)
    pub max_concurrency: Option<usize>,
    /// Per-file read deadline
    pub read_timeout: Option<Duration>,
    /// Only collect units whose file name matches this pattern
    pub unit_filter: Option<glob::Pattern>,
}

impl CollectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap concurrent reads; zero is treated as one
    pub fn max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit.max(1));
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn unit_filter(mut self, pattern: glob::Pattern) -> Self {
        self.unit_filter = Some(pattern);
        self
    }

    /// True if the unit passes the name filter
    pub fn accepts(&self, file: &UnitFile) -> bool {
        match &self.unit_filter {
            Some(pattern) => file.name().is_some_and(|name| pattern.matches(name)),
            None => true,
        }
    }
}
