//! Engine configuration.
//!
//! Built from the command line at startup; `setoption name Hash` adjusts the
//! table size at runtime.

use std::path::PathBuf;

pub const DEFAULT_HASH_MB: usize = 16;
pub const MIN_HASH_MB: usize = 1;
pub const MAX_HASH_MB: usize = 1024;

/// Iterative deepening never goes past this depth
pub const MAX_SEARCH_DEPTH: i32 = 99;

pub const DEFAULT_ERROR_LOG: &str = "engine_errors.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Transposition table budget in megabytes
    pub hash_mb: usize,
    /// Deepest iteration when `go` gives no depth
    pub max_depth: i32,
    /// Keep the transposition table between `go` commands until `ucinewgame`
    pub reuse_tt: bool,
    /// Nodes between two time checks
    pub time_check_interval: u64,
    /// File receiving a record per failed `go`, `None` to disable
    pub error_log: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hash_mb: DEFAULT_HASH_MB,
            max_depth: 64,
            reuse_tt: false,
            time_check_interval: 5000,
            error_log: Some(PathBuf::from(DEFAULT_ERROR_LOG)),
        }
    }
}

impl EngineConfig {
    /// Clamp values into their supported ranges
    pub fn normalized(mut self) -> Self {
        self.hash_mb = clamp_hash_mb(self.hash_mb);
        self.max_depth = self.max_depth.clamp(1, MAX_SEARCH_DEPTH);
        self.time_check_interval = self.time_check_interval.max(1);
        self
    }
}

#[inline]
pub fn clamp_hash_mb(mb: usize) -> usize {
    mb.clamp(MIN_HASH_MB, MAX_HASH_MB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.hash_mb, 16);
        assert_eq!(config.max_depth, 64);
        assert!(!config.reuse_tt);
        assert_eq!(config.time_check_interval, 5000);
        assert_eq!(config.error_log, Some(PathBuf::from("engine_errors.log")));
    }

    #[test]
    fn test_normalized_clamps() {
        let config = EngineConfig {
            hash_mb: 0,
            max_depth: 500,
            time_check_interval: 0,
            ..EngineConfig::default()
        }
        .normalized();
        assert_eq!(config.hash_mb, MIN_HASH_MB);
        assert_eq!(config.max_depth, MAX_SEARCH_DEPTH);
        assert_eq!(config.time_check_interval, 1);

        assert_eq!(clamp_hash_mb(4096), MAX_HASH_MB);
    }
}
