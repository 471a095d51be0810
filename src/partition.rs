use crate::comparator::Comparator;

/// Lomuto partition around the last element.
///
/// Returns `p` such that the pivot ends up at `arr[p]`, everything in `arr[..p]`
/// compares `<=` to it and everything in `arr[p + 1..]` compares `>`. Elements
/// equal to the pivot land on the left. Only swaps are performed, so `arr` stays
/// a permutation of its input even if `cmp` panics halfway through.
///
/// Slices of length 0 or 1 are left untouched and yield 0.
pub fn partition<T, C>(arr: &mut [T], cmp: &C) -> usize
where
    C: Comparator<T> + ?Sized,
{
    if arr.len() < 2 {
        return 0;
    }
    let hi = arr.len() - 1;
    let mut idx = 0;
    for i in 0..hi {
        // pivot stays at `hi` until the final swap
        if cmp.le(&arr[i], &arr[hi]) {
            arr.swap(i, idx);
            idx += 1;
        }
    }
    arr.swap(idx, hi);
    idx
}
