use std::fmt;
use std::fmt::Debug;
use rayon::{ThreadPool, ThreadPoolBuilder};
use crate::config::SortConfig;
use crate::error::SortError;

/// A closed range `[offset, offset + arr.len() - 1]` of the sequence being
/// sorted, owned exclusively by one task. Splitting goes through
/// `split_at_mut`, so two live tasks can never alias an index.
pub struct Task<'a, T> {
    pub arr: &'a mut [T],
    pub offset: usize,
    pub depth: usize,
}

impl<'a, T> Task<'a, T> {
    pub fn new(arr: &'a mut [T]) -> Task<'a, T> {
        Task {
            arr,
            offset: 0,
            depth: 0,
        }
    }

    /// Width as `hi - lo`; 0 for ranges of zero or one element.
    pub fn width(&self) -> usize {
        self.arr.len().saturating_sub(1)
    }

    pub fn is_trivial(&self) -> bool {
        self.arr.len() <= 1
    }

    pub fn is_base_case(&self, threshold: usize) -> bool {
        self.width() <= threshold
    }

    /// Consumes the task and hands out `[lo, p-1]` and `[p+1, hi]`. `p` is relative
    /// to this task's window and must be in bounds.
    pub fn split(self, p: usize) -> (Task<'a, T>, Task<'a, T>) {
        let (left, rest) = self.arr.split_at_mut(p);
        let (_pivot, right) = rest.split_at_mut(1);
        (
            Task {
                arr: left,
                offset: self.offset,
                depth: self.depth + 1,
            },
            Task {
                arr: right,
                offset: self.offset + p + 1,
                depth: self.depth + 1,
            },
        )
    }
}

impl<T> fmt::Display for Task<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arr.is_empty() {
            write!(f, "[] (depth {})", self.depth)
        } else {
            write!(f, "[{}, {}] (depth {})", self.offset, self.offset + self.arr.len() - 1, self.depth)
        }
    }
}

/// Parallel sorter that keeps its worker pool across calls.
///
/// The free functions in [`crate::sort`] build a fresh pool on each call; use a
/// `Sorter` when sorting repeatedly so the pool is created once. The pool is
/// torn down when the `Sorter` is dropped.
pub struct Sorter {
    pub(crate) pool: ThreadPool,
    pub(crate) config: SortConfig,
}

impl Sorter {
    pub fn new(config: SortConfig) -> Result<Sorter, SortError> {
        let pool = build_pool(&config)?;
        Ok(Sorter { pool, config })
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Debug for Sorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sorter")
            .field("config", &self.config)
            .field("num_threads", &self.pool.current_num_threads())
            .finish()
    }
}

pub(crate) fn build_pool(config: &SortConfig) -> Result<ThreadPool, SortError> {
    config.validate()?;
    let pool = ThreadPoolBuilder::new()
        .num_threads(config.worker_count)
        .thread_name(|i| format!("forksort-worker-{}", i))
        .build()?;
    Ok(pool)
}
