//! The turn calculator.
//!
//! A path of length `l` delivers its first ant after `l` turns and one more ant every turn after that,
//! so by turn `t` it has delivered `max(0, t - l + 1)` ants.
//! The fewest turns a set of paths needs for `n` ants is the smallest `t >= 1` at which the paths together deliver `n`.

/// Ants delivered by a path of `length` tunnels within `turns` turns.
#[inline]
pub fn path_capacity(length: usize, turns: usize) -> usize {
    (turns + 1).saturating_sub(length)
}

/// Ants delivered by all paths of the given lengths within `turns` turns.
pub fn capacity(lengths: &[usize], turns: usize) -> usize {
    lengths.iter().map(|length| path_capacity(*length, turns)).sum()
}

/// The smallest `t >= 1` such that paths of the given `lengths` deliver at least `ants` ants within `t` turns.
///
/// Returns `None` when there are no paths to deliver through.
/// The result never decreases as `ants` grows.
pub fn turns_required(lengths: &[usize], ants: usize) -> Option<usize> {
    let shortest = *lengths.iter().min()?;
    debug_assert!(shortest > 0, "paths have at least one tunnel");

    // the shortest path alone delivers every ant by `hi`
    let mut lo = 1;
    let mut hi = (shortest + ants).saturating_sub(1).max(1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if capacity(lengths, mid) >= ants {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    Some(lo)
}
