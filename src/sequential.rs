use log::trace;
use crate::comparator::Comparator;
use crate::partition::partition;
use crate::sorter::Task;

/// Plain recursive quicksort over the task's window.
///
/// Recurses into the smaller side and keeps looping on the larger one, which
/// visits the same ranges as recursing into both but bounds the stack by
/// `O(log n)` on sorted or duplicate-heavy input.
pub(crate) fn sequential_rec<T, C>(mut task: Task<'_, T>, cmp: &C)
where
    C: Comparator<T> + ?Sized,
{
    while !task.is_trivial() {
        let p = partition(task.arr, cmp);
        trace!("Partitioned {} at {}", task, task.offset + p);

        let (left, right) = task.split(p);
        if left.arr.len() < right.arr.len() {
            sequential_rec(left, cmp);
            task = right;
        } else {
            sequential_rec(right, cmp);
            task = left;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::Natural;
    use rand::prelude::SliceRandom;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sort(arr: &mut [u64]) {
        sequential_rec(Task::new(arr), &Natural);
    }

    fn verify_sorted(arr: &[u64]) {
        for i in 1..arr.len() {
            assert!(arr[i - 1] <= arr[i], "Array not sorted! {} (i={}) > {} (i={})", arr[i - 1], i - 1, arr[i], i);
        }
    }

    #[test]
    fn empty_and_single() {
        let mut empty: Vec<u64> = vec![];
        sort(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![42];
        sort(&mut single);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn small_example() {
        let mut arr = vec![5, 3, 8, 1, 9, 2];
        sort(&mut arr);
        assert_eq!(arr, vec![1, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn shuffled_permutation() {
        let mut arr: Vec<u64> = (1..=4096).collect();
        arr.shuffle(&mut StdRng::seed_from_u64(12345));
        sort(&mut arr);
        assert_eq!(arr, (1..=4096).collect::<Vec<u64>>());
    }

    #[test]
    fn sorted_and_reversed_inputs() {
        // deep skew: every partition peels off one element
        let mut sorted: Vec<u64> = (0..5_000).collect();
        sort(&mut sorted);
        verify_sorted(&sorted);

        let mut reversed: Vec<u64> = (0..5_000).rev().collect();
        sort(&mut reversed);
        verify_sorted(&reversed);
    }

    #[test]
    fn all_equal_terminates() {
        let mut arr = vec![7u64; 5_000];
        sort(&mut arr);
        assert!(arr.iter().all(|x| *x == 7));
    }

    #[test]
    fn few_distinct_values() {
        let mut rng = StdRng::seed_from_u64(54321);
        let mut arr: Vec<u64> = (0..5000).map(|_| rng.gen_range(0..4)).collect();
        let mut expected = arr.clone();
        expected.sort_unstable();
        sort(&mut arr);
        assert_eq!(arr, expected);
    }

    #[test]
    fn custom_comparator_descending() {
        let mut arr: Vec<u64> = (0..100).collect();
        sequential_rec(Task::new(&mut arr), &|a: &u64, b: &u64| b.cmp(a));
        assert_eq!(arr, (0..100).rev().collect::<Vec<u64>>());
    }
}
