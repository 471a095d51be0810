//! In-place fork/join quicksort.
//!
//! The sequential and parallel entry points share one Lomuto partitioner. The
//! parallel scheduler splits the buffer into disjoint `&mut` windows, spawns the
//! left window on a rayon pool, sorts the right one inline and joins before
//! returning; windows at or below the threshold are sorted sequentially.

pub mod sort;
mod comparator;
mod config;
mod error;
mod parallel;
mod partition;
mod sequential;
mod sorter;

pub use comparator::{Comparator, Natural};
pub use config::{default_worker_count, SortConfig, THRESHOLD, THRESHOLD_ENV, WORKERS_ENV};
pub use error::SortError;
pub use partition::partition;
pub use sort::{
    sort_parallel, sort_parallel_by, sort_parallel_with, sort_parallel_with_by, sort_range_sequential,
    sort_sequential, sort_sequential_by,
};
pub use sorter::Sorter;
