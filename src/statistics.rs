//! Functions for fitting and scoring trend lines
//!
//! These are the primitives the linearizer is built from. Every function here is
//! pure and validates its input instead of producing NaN.
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a sequence.
//! - [`variance`]: Sum of squared deviations from the mean. **Not** divided by `n`.
//! - [`covariance`]: Sum of paired deviation products. **Not** divided by `n`.
//!
//! # Least Squares
//! - [`coefficients`]: Intercept and slope of the ordinary least-squares line.
//! - [`predict`]: Evaluates a line at `x`, rounded to [`PREDICTION_PLACES`] decimals.
//! - [`TrendLine`]: The fitted line as a value, with [`evaluate`] for a full report.
//!
//! # Error Metrics
//! - [`rmse`]: Root-mean-square error between two sequences. Lower is better.
//! - [`r_squared`]: Proportion of variance explained by a prediction. Higher is better.
//!
//! # Examples
//!
//! ```rust
//! use linearize::statistics::{coefficients, rmse, TrendLine};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [3.0, 5.0, 7.0, 9.0, 11.0];
//!
//! let (intercept, slope) = coefficients(&x, &y).unwrap();
//! assert_eq!((intercept, slope), (1.0, 2.0));
//!
//! let line = TrendLine::fit(&x, &y).unwrap();
//! let predicted = line.predictions(&x);
//! assert_eq!(rmse(&y, &predicted).unwrap(), 0.0);
//! ```
use crate::{
    error::{Error, Result},
    value::Value,
};

/// Number of decimal places predictions are rounded to.
///
/// Rounding keeps residual scores deterministic across platforms.
pub const PREDICTION_PLACES: usize = 3;

fn ensure_paired<T>(x: &[T], y: &[T]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(Error::NoData);
    }
    Ok(())
}

/// Computes the arithmetic mean of a sequence of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
/// </div>
///
/// # Errors
/// Returns [`Error::NoData`] if `values` is empty.
///
/// # Examples
/// ```rust
/// let m = linearize::statistics::mean(&[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(values: &[T]) -> Result<T> {
    if values.is_empty() {
        return Err(Error::NoData);
    }

    let mut sum = T::zero();
    for &value in values {
        sum += value;
    }
    Ok(sum / T::from_positive_int(values.len()))
}

/// Computes the unnormalized variance of a sequence: the sum of squared deviations from the mean.
///
/// This is deliberately **not** divided by `N` or `N - 1`. It is only ever used as
/// the denominator of [`covariance`]`/variance` in [`coefficients`], where the
/// normalization cancels out.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// S_xx = Σ (x_i - Mean)²
/// ```
/// </div>
///
/// # Errors
/// Returns [`Error::NoData`] if `values` is empty.
///
/// # Examples
/// ```rust
/// let v = linearize::statistics::variance(&[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(v, 2.0);
/// ```
pub fn variance<T: Value>(values: &[T]) -> Result<T> {
    let mean = mean(values)?;
    let mut sum_sq = T::zero();
    for &value in values {
        sum_sq += Value::powi(value - mean, 2);
    }
    Ok(sum_sq)
}

/// Computes the unnormalized covariance of two paired sequences.
///
/// Uses the same convention as [`variance`]: a plain sum, not an average.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// S_xy = Σ (x_i - Mean_x)(y_i - Mean_y)
/// ```
/// </div>
///
/// # Errors
/// - [`Error::LengthMismatch`] if the sequences differ in length.
/// - [`Error::NoData`] if they are empty.
pub fn covariance<T: Value>(x: &[T], y: &[T]) -> Result<T> {
    ensure_paired(x, y)?;

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    let mut covar = T::zero();
    for (&xi, &yi) in x.iter().zip(y) {
        covar += (xi - mean_x) * (yi - mean_y);
    }
    Ok(covar)
}

/// Computes the ordinary least-squares line through a paired dataset.
///
/// Returns `(intercept, slope)`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// b1 = S_xy / S_xx
/// b0 = Mean_y - b1 * Mean_x
/// ```
/// </div>
///
/// # Errors
/// - [`Error::LengthMismatch`] if the sequences differ in length.
/// - [`Error::NoData`] if they are empty.
/// - [`Error::ZeroVariance`] if every x value is identical.
///
/// # Examples
/// ```rust
/// # use linearize::statistics::coefficients;
/// let (b0, b1) = coefficients(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
/// assert_eq!((b0, b1), (1.0, 2.0));
/// ```
pub fn coefficients<T: Value>(x: &[T], y: &[T]) -> Result<(T, T)> {
    ensure_paired(x, y)?;

    let s_xx = variance(x)?;
    if s_xx == T::zero() {
        return Err(Error::ZeroVariance);
    }

    let slope = covariance(x, y)? / s_xx;
    let intercept = mean(y)? - slope * mean(x)?;
    Ok((intercept, slope))
}

/// Evaluates `b0 + b1 * x`, rounded to [`PREDICTION_PLACES`] decimal places.
#[must_use]
pub fn predict<T: Value>(b0: T, b1: T, x: T) -> T {
    (b0 + b1 * x).round_to(PREDICTION_PLACES)
}

/// Computes the root-mean-square error between observed and predicted values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// RMSE = sqrt( Σ (y_i - y_fit_i)² / N )
/// ```
/// </div>
///
/// # Errors
/// - [`Error::LengthMismatch`] if the sequences differ in length.
/// - [`Error::NoData`] if they are empty.
///
/// # Examples
/// ```rust
/// # use linearize::statistics::rmse;
/// let e = rmse(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]).unwrap();
/// assert!((e - (4.0_f64 / 3.0).sqrt()).abs() < 1e-12);
/// ```
pub fn rmse<T: Value>(actual: &[T], predicted: &[T]) -> Result<T> {
    ensure_paired(actual, predicted)?;

    let mut sum_sq = T::zero();
    for (&a, &p) in actual.iter().zip(predicted) {
        sum_sq += Value::powi(p - a, 2);
    }
    let mse = sum_sq / T::from_positive_int(actual.len());
    Ok(mse.sqrt())
}

/// Calculate the R-squared value of a prediction.
///
/// - `1` means the prediction explains all of the variation.
/// - `0` means it explains none of it. Values can go negative for bad predictions.
///
/// Returns NaN when `actual` is constant, since there is no variation to explain.
///
/// # Errors
/// - [`Error::LengthMismatch`] if the sequences differ in length.
/// - [`Error::NoData`] if they are empty.
pub fn r_squared<T: Value>(actual: &[T], predicted: &[T]) -> Result<T> {
    ensure_paired(actual, predicted)?;

    let ss_tot = variance(actual)?;
    let mut ss_res = T::zero();
    for (&a, &p) in actual.iter().zip(predicted) {
        ss_res += Value::powi(a - p, 2);
    }

    if ss_tot == T::zero() {
        return Ok(T::nan());
    }
    Ok(T::one() - ss_res / ss_tot)
}

/// A straight line `y = intercept + slope * x` fitted by least squares.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct TrendLine<T: Value> {
    /// Value of the line at `x = 0`
    pub intercept: T,

    /// Change in `y` per unit of `x`
    pub slope: T,
}
impl<T: Value> TrendLine<T> {
    /// Fits a trend line to a paired dataset.
    ///
    /// # Errors
    /// See [`coefficients`].
    pub fn fit(x: &[T], y: &[T]) -> Result<Self> {
        let (intercept, slope) = coefficients(x, y)?;
        Ok(Self { intercept, slope })
    }

    /// Evaluates the line at `x`. See [`predict`].
    #[must_use]
    pub fn predict(&self, x: T) -> T {
        predict(self.intercept, self.slope, x)
    }

    /// Evaluates the line at every `x`.
    #[must_use]
    pub fn predictions(&self, x: &[T]) -> Vec<T> {
        x.iter().map(|&x| self.predict(x)).collect()
    }
}
impl<T: Value> From<TrendLine<T>> for (T, T) {
    fn from(line: TrendLine<T>) -> Self {
        (line.intercept, line.slope)
    }
}

/// Trend line, predictions and residual error of a dataset.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Evaluation<T: Value> {
    /// The least-squares line
    pub trend: TrendLine<T>,

    /// The line evaluated at every `x`
    pub predictions: Vec<T>,

    /// RMSE of `y` against `predictions`
    pub rmse: T,
}

/// Fits a trend line to `(x, y)` and measures how far `y` strays from it.
///
/// # Errors
/// See [`coefficients`].
pub fn evaluate<T: Value>(x: &[T], y: &[T]) -> Result<Evaluation<T>> {
    let trend = TrendLine::fit(x, y)?;
    let predictions = trend.predictions(x);
    let rmse = rmse(y, &predictions)?;
    Ok(Evaluation {
        trend,
        predictions,
        rmse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn mean_simple() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert_eq!(mean(&[-3.0_f32]).unwrap(), -3.0);
    }

    #[test]
    fn mean_empty() {
        let empty: [f64; 0] = [];
        assert!(matches!(mean(&empty), Err(Error::NoData)));
        assert!(matches!(variance(&empty), Err(Error::NoData)));
    }

    #[test]
    fn variance_is_unnormalized() {
        // deviations from 5: -3, -1, 1, 3 → 9 + 1 + 1 + 9
        let v = variance(&[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert_eq!(v, 20.0);
    }

    #[test]
    fn variance_scales_quadratically() {
        let x = [0.5, 1.25, 3.0, 7.5, -2.0];
        for scale in [2.0, -3.0, 0.1] {
            let scaled: Vec<f64> = x.iter().map(|v| v * scale).collect();
            let expected = scale * scale * variance(&x).unwrap();
            assert_close!(variance(&scaled).unwrap(), expected, tol = 1e-9);
        }
    }

    #[test]
    fn covariance_simple() {
        // mean x = 2, mean y = 4; (-1)(-2) + 0 + (1)(2) = 4
        let c = covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(c, 4.0);
    }

    #[test]
    fn covariance_of_self_is_variance() {
        let x = [1.0, 4.0, 2.0, 8.0];
        assert_close!(covariance(&x, &x).unwrap(), variance(&x).unwrap(), tol = 1e-12);
    }

    #[test]
    fn covariance_length_mismatch() {
        let err = covariance(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { x: 2, y: 1 }));
    }

    #[test]
    fn coefficients_perfect_line() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [3.0, 5.0, 7.0, 9.0, 11.0];
        let (b0, b1) = coefficients(&x, &y).unwrap();
        assert_close!(b0, 1.0, tol = 1e-6);
        assert_close!(b1, 2.0, tol = 1e-6);
    }

    #[test]
    fn coefficients_ignore_order() {
        let x = [1.0, 2.0, 4.0, 3.0, 5.0];
        let y = [1.0, 3.0, 3.0, 2.0, 5.0];
        let (b0, b1) = coefficients(&x, &y).unwrap();
        assert_close!(b0, 0.4, tol = 1e-9);
        assert_close!(b1, 0.8, tol = 1e-9);
    }

    #[test]
    fn coefficients_zero_variance() {
        let err = coefficients(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::ZeroVariance));
    }

    #[test]
    fn coefficients_bad_input() {
        let empty: [f64; 0] = [];
        assert!(matches!(coefficients(&empty, &empty), Err(Error::NoData)));
        assert!(matches!(
            coefficients(&[1.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn predict_rounds_to_three_places() {
        assert_eq!(predict(0.0, 1.0, 1.23456), 1.235);
        assert_eq!(predict(1.0, 2.0, 3.0), 7.0);
        assert_eq!(predict(0.0, 1.0 / 3.0, 1.0), 0.333);

        // Exact ties go to even, near ties follow the stored binary value
        assert_eq!(predict(0.0, 1.0, 0.0625), 0.062);
        assert_eq!(predict(0.0, 1.0, 1.0005), 1.0);
        assert_eq!(predict(0.0, 1.0, 0.1235), 0.123);
        assert_eq!(predict(0.0, 1.0, 1.2345), 1.234);
    }

    #[test]
    fn rmse_identical_is_zero() {
        let v = [0.3, -1.7, 22.0, 4.5];
        assert_eq!(rmse(&v, &v).unwrap(), 0.0);
    }

    #[test]
    fn rmse_simple_case() {
        // errors: [0, 0, 3] → mse 3 → rmse sqrt(3)
        let e = rmse(&[1.0, 2.0, 3.0], &[1.0, 2.0, 6.0]).unwrap();
        assert_close!(e, 3.0_f64.sqrt());
    }

    #[test]
    fn rmse_bad_input() {
        let empty: [f64; 0] = [];
        assert!(matches!(rmse(&empty, &empty), Err(Error::NoData)));
        assert!(matches!(
            rmse(&[1.0], &[1.0, 2.0]),
            Err(Error::LengthMismatch { x: 1, y: 2 })
        ));
    }

    #[test]
    fn r_squared_cases() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(r_squared(&y, &y).unwrap(), 1.0);
        assert_eq!(r_squared(&y, &[2.0, 2.0, 2.0]).unwrap(), 0.0);
        assert!(r_squared(&[2.0_f64, 2.0], &[2.0, 2.0]).unwrap().is_nan());
    }

    #[test]
    fn evaluate_matches_parts() {
        let x = [0.008, 0.022, 0.036, 0.052, 0.067];
        let y = [0.196, 0.294, 0.392, 0.491, 0.589];
        let eval = evaluate(&x, &y).unwrap();

        let (b0, b1) = coefficients(&x, &y).unwrap();
        assert_eq!(eval.trend, TrendLine { intercept: b0, slope: b1 });
        assert_eq!(eval.predictions.len(), x.len());
        assert_eq!(eval.rmse, rmse(&y, &eval.predictions).unwrap());
        assert!(eval.rmse < 0.01);
    }
}
