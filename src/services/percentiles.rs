/// Percentile helpers for already-sorted slices, using linear interpolation
/// between the two flanking values.
///
/// - Empty input => `None` (or `0.0` for the convenience wrapper).
/// - `percentile <= 0` => first element.
/// - `percentile >= 100` => last element.
/// - Otherwise the position within `[0, len-1]` is interpolated.
pub fn value_sorted(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    if sorted_values.is_empty() {
        return None;
    }
    if percentile <= 0.0 {
        return sorted_values.first().copied();
    }
    if percentile >= 100.0 {
        return sorted_values.last().copied();
    }

    let position = (percentile / 100.0) * (sorted_values.len() as f64 - 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return Some(sorted_values[lower]);
    }
    let fraction = position - lower as f64;
    Some(sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction)
}

/// Convenience wrapper that maps an empty slice to `0.0`.
pub fn value_or_zero(sorted_values: &[f64], percentile: f64) -> f64 {
    value_sorted(sorted_values, percentile).unwrap_or(0.0)
}
