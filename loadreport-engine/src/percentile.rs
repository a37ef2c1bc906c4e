/// Sort `values` ascending and return the element at index `floor(n * percentile / 100)`,
/// clamped to `[0, n - 1]`. Returns 0 for an empty slice.
///
/// This is nearest-rank selection with no interpolation, so small samples are coarse:
/// the p99 of ten values is the maximum.
pub fn percentile(values: &[u64], percentile: f64) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    percentile_of_sorted(&sorted, percentile)
}

/// Same selection as [`percentile`] for a slice that is already sorted ascending.
pub fn percentile_of_sorted(sorted: &[u64], percentile: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    // Float-to-int casts saturate, so a negative or NaN index lands on 0.
    let idx = (sorted.len() as f64 * percentile / 100.0).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
