//! OLS trend-score estimator.
//!
//! Fits a straight line to a window of values by ordinary least squares
//! (position index as the independent variable) and reports the fitted
//! change across the window as a signed percentage. The linear fit makes
//! the score robust to single-bar noise compared to a raw endpoint
//! difference.

/// Guard added to the x-variance denominator of the OLS slope.
const VAR_EPSILON: f64 = 0.001;

/// Guard added to the fitted base value before the percentage division.
const BASE_EPSILON: f64 = 0.01;

/// Closed-form OLS fit of `values` against positions `0..len`.
///
/// Returns `(slope, intercept)`. Covariance and variance are both
/// unnormalized sums, so their ratio matches the normalized estimator;
/// the variance guard keeps a single-element window at slope 0 instead
/// of dividing by zero.
#[must_use]
pub fn ols_coefficients(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (f64::NAN, f64::NAN);
    }

    let mean_x = (n - 1) as f64 / 2.0;
    let mean_y = values.iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        covariance += dx * (y - mean_y);
        variance += dx * dx;
    }

    let slope = covariance / (variance + VAR_EPSILON);
    let intercept = mean_y - slope * mean_x;
    (slope, intercept)
}

/// Signed percentage trend strength of a window of values.
///
/// Evaluates the OLS fit at the first and last window positions and
/// returns `(last - first) / (first + 0.01) * 100`. Empty input returns
/// NaN; a single-element window returns 0.
#[must_use]
pub fn trend_score(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let (slope, intercept) = ols_coefficients(values);
    let first = intercept;
    let last = slope * (values.len() - 1) as f64 + intercept;

    (last - first) / (first + BASE_EPSILON) * 100.0
}
