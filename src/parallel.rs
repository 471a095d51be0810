use log::trace;
use rayon::{scope, Scope};
use crate::comparator::Comparator;
use crate::partition::partition;
use crate::sequential::sequential_rec;
use crate::sorter::Task;

/// Fork/join quicksort over the task's window.
///
/// Opens a single scope for the whole call tree and runs [`fork_loop`] in it.
/// The scope does not return before every task spawned under it, at any depth,
/// has finished, so the window is fully sorted when this returns. Windows of
/// width `<= threshold` never open a scope and go straight to
/// [`sequential_rec`].
pub(crate) fn parallel_rec<T, C>(task: Task<'_, T>, cmp: &C, threshold: usize)
where
    T: Send,
    C: Comparator<T> + Sync + ?Sized,
{
    if task.is_trivial() {
        return;
    }
    if task.is_base_case(threshold) {
        sequential_rec(task, cmp);
        return;
    }
    scope(|s| fork_loop(s, task, cmp, threshold));
}

/// Partitions, spawns the left side into `s` and keeps going on the right side
/// in the current control flow. Spawned tasks run the same loop in the same
/// scope, so no task ever blocks and the stack does not grow with the number of
/// splits.
fn fork_loop<'scope, T, C>(s: &Scope<'scope>, mut task: Task<'scope, T>, cmp: &'scope C, threshold: usize)
where
    T: Send + 'scope,
    C: Comparator<T> + Sync + ?Sized,
{
    loop {
        if task.is_trivial() {
            return;
        }
        if task.is_base_case(threshold) {
            sequential_rec(task, cmp);
            return;
        }

        let p = partition(task.arr, cmp);
        trace!("Thread {:?} partitioned {} at {}", rayon::current_thread_index(), task, task.offset + p);

        let (left, right) = task.split(p);
        if !left.is_trivial() {
            s.spawn(move |s| fork_loop(s, left, cmp, threshold));
        }
        task = right;
    }
}
