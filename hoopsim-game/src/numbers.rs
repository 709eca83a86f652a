//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Map a raw 32-bit draw onto the open unit interval (0, 1).
#[must_use]
pub fn unit_from_u32(sample: u32) -> f64 {
    let denom = f64::from(u32::MAX) + 1.0;
    ((f64::from(sample) + 0.5) / denom).clamp(0.0, 1.0)
}

/// Clamp into [0, 1], mapping non-finite values to 0.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Floor at zero, mapping non-finite values to 0.
#[must_use]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Convert a usize count to f64, returning 0.0 if the cast fails.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Convert a u64 total to f64, returning 0.0 if the cast fails.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_samples_stay_inside_interval() {
        assert!(unit_from_u32(0) > 0.0);
        assert!(unit_from_u32(u32::MAX) < 1.0);
        assert!((unit_from_u32(u32::MAX / 2) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn clamps_handle_non_finite() {
        assert!(clamp_unit(f64::NAN).abs() < f64::EPSILON);
        assert!((clamp_unit(3.0) - 1.0).abs() < f64::EPSILON);
        assert!(non_negative(-2.0).abs() < f64::EPSILON);
        assert!(non_negative(f64::INFINITY).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_convert_to_floats() {
        assert!((usize_to_f64(42) - 42.0).abs() < f64::EPSILON);
        assert!((u64_to_f64(1_000_000) - 1_000_000.0).abs() < f64::EPSILON);
        assert!(u64_to_f64(0).abs() < f64::EPSILON);
    }
}
