//! Health bookkeeping shared by equipment changes and healing.

/// Rescales `current` health from `old_max` to `new_max`, keeping the same
/// fraction of maximum health. Rounds down and never exceeds `new_max`.
///
/// A zero `old_max` is treated as full health.
pub fn rescale_health(current: u32, old_max: u32, new_max: u32) -> u32 {
    if old_max == 0 {
        return new_max;
    }
    let scaled = current as u64 * new_max as u64 / old_max as u64;
    scaled.min(new_max as u64) as u32
}

/// Adds up to `amount` health without passing `max`. Returns the health
/// actually gained.
pub fn restore(current: &mut u32, max: u32, amount: u32) -> u32 {
    let before = *current;
    *current = current.saturating_add(amount).min(max);
    *current - before.min(*current)
}
