use std::env;
use std::num::NonZeroUsize;
use std::thread;
use log::warn;
use crate::error::SortError;

/// Default range width at or below which the parallel scheduler stops spawning.
pub const THRESHOLD: usize = 16;

pub const THRESHOLD_ENV: &str = "FORKSORT_THRESHOLD";
pub const WORKERS_ENV: &str = "FORKSORT_WORKERS";

const _: () = {
    assert!(THRESHOLD >= 1, "THRESHOLD must be at least 1");
};

/// Tuning knobs for the parallel entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    /// Sequential-fallback cutoff, compared against `hi - lo` of a range.
    pub threshold: usize,
    /// Number of worker threads in the pool.
    pub worker_count: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            threshold: THRESHOLD,
            worker_count: default_worker_count(),
        }
    }
}

impl SortConfig {
    pub fn new(threshold: usize, worker_count: usize) -> SortConfig {
        SortConfig {
            threshold,
            worker_count,
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Defaults overridden by `FORKSORT_THRESHOLD` and `FORKSORT_WORKERS`.
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let defaults = SortConfig::default();
        SortConfig {
            threshold: read_env(THRESHOLD_ENV).unwrap_or(defaults.threshold),
            worker_count: read_env(WORKERS_ENV).unwrap_or(defaults.worker_count),
        }
    }

    pub fn validate(&self) -> Result<(), SortError> {
        if self.threshold == 0 {
            return Err(SortError::precondition("threshold must be at least 1"));
        }
        if self.worker_count == 0 {
            return Err(SortError::precondition("worker_count must be at least 1"));
        }
        Ok(())
    }
}

pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn read_env(key: &str) -> Option<usize> {
    let value = env::var(key).ok()?;
    match value.trim().parse::<usize>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a non-negative integer", key, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_threshold_and_hardware() {
        let config = SortConfig::default();
        assert_eq!(config.threshold, THRESHOLD);
        assert!(config.worker_count >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let config = SortConfig::new(0, 4);
        assert!(matches!(config.validate(), Err(SortError::PreconditionViolation { .. })));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let config = SortConfig::default().with_worker_count(0);
        assert!(matches!(config.validate(), Err(SortError::PreconditionViolation { .. })));
    }

    #[test]
    fn env_overrides_and_ignores_garbage() {
        env::set_var(THRESHOLD_ENV, " 32 ");
        env::set_var(WORKERS_ENV, "many");
        let config = SortConfig::from_env();
        env::remove_var(THRESHOLD_ENV);
        env::remove_var(WORKERS_ENV);
        assert_eq!(config.threshold, 32);
        assert_eq!(config.worker_count, default_worker_count());
    }

    #[test]
    fn builders_override_fields() {
        let config = SortConfig::default().with_threshold(2).with_worker_count(3);
        assert_eq!(config, SortConfig::new(2, 3));
    }
}
