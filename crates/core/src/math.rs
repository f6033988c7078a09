//! Division-guarded vector primitives
//!
//! Every norm or maximum that can be zero in the scoring pipeline goes
//! through these helpers, so a degenerate input yields 0 instead of NaN.

/// Cosine similarity from a precomputed dot product and the two norms.
///
/// Returns 0.0 whenever either norm is zero (or the result would not be
/// finite).
pub fn cosine_from_parts(dot: f32, norm_a: f32, norm_b: f32) -> f32 {
    let denominator = norm_a * norm_b;
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    let similarity = dot / denominator;
    if similarity.is_finite() {
        similarity
    } else {
        0.0
    }
}

/// Divide every value by the maximum value, in place.
///
/// If the maximum is not strictly positive every value becomes 0.0.
pub fn normalize_by_max(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    if max > 0.0 && max.is_finite() {
        values.iter_mut().for_each(|v| *v /= max);
    } else {
        values.iter_mut().for_each(|v| *v = 0.0);
    }
}

/// Round to a fixed number of decimal places.
///
/// Halves round away from zero (`f32::round`), not to even.
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let factor = 10f32.powi(decimals);
    (value * factor).round() / factor
}
