// ABOUTME: Small numeric helpers shared by the calculators
// ABOUTME: Count conversion, means, sample standard deviation, and decimal rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use tracing::debug;

/// Convert a sample count to f64, saturating at `u32::MAX`
pub(crate) fn count_to_f64(count: usize) -> f64 {
    match u32::try_from(count) {
        Ok(count_u32) => f64::from(count_u32),
        Err(e) => {
            debug!(count, error = %e, "Sample count exceeds u32, saturating");
            f64::from(u32::MAX)
        }
    }
}

/// Arithmetic mean; `None` for an empty slice
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / count_to_f64(values.len()))
}

/// Sample standard deviation (n - 1 denominator); `None` below two values
pub(crate) fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some((sum_sq / count_to_f64(values.len() - 1)).sqrt())
}

/// Round half away from zero to `places` decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}
