use std::cmp::Ordering;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use log::{debug, info};
use rayon::ThreadPool;
use crate::comparator::{Comparator, Natural};
use crate::config::SortConfig;
use crate::error::SortError;
use crate::parallel::parallel_rec;
use crate::sequential::sequential_rec;
use crate::sorter::{build_pool, Sorter, Task};

/// Sorts `arr` in place on the calling thread.
pub fn sort_sequential<T: Ord>(arr: &mut [T]) -> Result<(), SortError> {
    run_sequential(Task::new(arr), &Natural)
}

pub fn sort_sequential_by<T, F>(arr: &mut [T], cmp: F) -> Result<(), SortError>
where
    F: Fn(&T, &T) -> Ordering,
{
    run_sequential(Task::new(arr), &cmp)
}

/// Sorts only the closed range `[lo, hi]` of `arr`.
pub fn sort_range_sequential<T: Ord>(arr: &mut [T], lo: usize, hi: usize) -> Result<(), SortError> {
    let task = range_task(arr, lo, hi)?;
    run_sequential(task, &Natural)
}

/// Sorts `arr` in place on a worker pool sized to the available hardware
/// parallelism. The pool is created for this call and torn down before return.
pub fn sort_parallel<T: Ord + Send>(arr: &mut [T]) -> Result<(), SortError> {
    sort_parallel_with(arr, &SortConfig::default())
}

pub fn sort_parallel_by<T, F>(arr: &mut [T], cmp: F) -> Result<(), SortError>
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    sort_parallel_with_by(arr, &SortConfig::default(), cmp)
}

pub fn sort_parallel_with<T: Ord + Send>(arr: &mut [T], config: &SortConfig) -> Result<(), SortError> {
    run_per_call_pool(arr, config, &Natural)
}

pub fn sort_parallel_with_by<T, F>(arr: &mut [T], config: &SortConfig, cmp: F) -> Result<(), SortError>
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    run_per_call_pool(arr, config, &cmp)
}

impl Sorter {
    /// Parallel sort on this sorter's pool.
    pub fn sort<T: Ord + Send>(&self, arr: &mut [T]) -> Result<(), SortError> {
        run_on_pool(&self.pool, Task::new(arr), self.config.threshold, &Natural)
    }

    pub fn sort_by<T, F>(&self, arr: &mut [T], cmp: F) -> Result<(), SortError>
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        run_on_pool(&self.pool, Task::new(arr), self.config.threshold, &cmp)
    }

    /// Parallel sort of the closed range `[lo, hi]` of `arr`.
    pub fn sort_range<T: Ord + Send>(&self, arr: &mut [T], lo: usize, hi: usize) -> Result<(), SortError> {
        let task = range_task(arr, lo, hi)?;
        run_on_pool(&self.pool, task, self.config.threshold, &Natural)
    }
}

fn range_task<T>(arr: &mut [T], lo: usize, hi: usize) -> Result<Task<'_, T>, SortError> {
    if lo > hi || hi >= arr.len() {
        return Err(SortError::precondition(format!(
            "range [{}, {}] is not within [0, {})",
            lo,
            hi,
            arr.len()
        )));
    }
    Ok(Task {
        arr: &mut arr[lo..=hi],
        offset: lo,
        depth: 0,
    })
}

fn run_sequential<T, C>(task: Task<'_, T>, cmp: &C) -> Result<(), SortError>
where
    C: Comparator<T> + ?Sized,
{
    let len = task.arr.len();
    let start = Instant::now();
    panic::catch_unwind(AssertUnwindSafe(|| sequential_rec(task, cmp))).map_err(SortError::from_panic)?;
    debug!("Sequential sort of {} elements took {:?}", len, start.elapsed());
    Ok(())
}

fn run_per_call_pool<T, C>(arr: &mut [T], config: &SortConfig, cmp: &C) -> Result<(), SortError>
where
    T: Send,
    C: Comparator<T> + Sync + ?Sized,
{
    config.validate()?;
    if arr.len() <= 1 {
        return Ok(());
    }
    let pool = build_pool(config)?;
    info!("Created pool with {} workers for {} elements", pool.current_num_threads(), arr.len());
    let result = run_on_pool(&pool, Task::new(arr), config.threshold, cmp);
    drop(pool);
    result
}

fn run_on_pool<T, C>(pool: &ThreadPool, task: Task<'_, T>, threshold: usize, cmp: &C) -> Result<(), SortError>
where
    T: Send,
    C: Comparator<T> + Sync + ?Sized,
{
    let len = task.arr.len();
    let start = Instant::now();
    // `install` returns only once every task spawned under it has joined
    pool.install(|| panic::catch_unwind(AssertUnwindSafe(|| parallel_rec(task, cmp, threshold))))
        .map_err(SortError::from_panic)?;
    debug!(
        "Parallel sort of {} elements on {} threads took {:?}",
        len,
        pool.current_num_threads(),
        start.elapsed()
    );
    Ok(())
}
