//! One step of the straightening search.
//!
//! A step tries every transform in [`Transform::CATALOG`], fits a least-squares line
//! to x vs T(y), and scores each transform by the RMSE of T(y) around its own line.
//! The lowest score wins. Exact ties go to the transform listed first in the catalog.
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    statistics::{self, TrendLine},
    transforms::Transform,
    value::Value,
};

/// Number of decimal places step scores are rounded to before comparison.
pub const SCORE_PLACES: usize = 5;

/// The outcome of applying one catalog transform to a series.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StepResult<T: Value> {
    /// The transform that was applied
    pub transform: Transform,

    /// The transformed y values
    pub y: Vec<T>,

    /// RMSE of `y` around its own trend line, rounded to [`SCORE_PLACES`] decimals.
    ///
    /// Lower means x vs `y` is closer to a straight line.
    pub score: T,
}
impl<T: Value> StepResult<T> {
    /// Name of the applied transform, e.g. `"sqrt(y)"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.transform.name()
    }

    /// Trend line through x vs the transformed y.
    ///
    /// # Errors
    /// See [`statistics::coefficients`].
    pub fn trend(&self, x: &[T]) -> Result<TrendLine<T>> {
        TrendLine::fit(x, &self.y)
    }
}

/// Checks that `(x, y)` is a usable dataset: equal lengths, at least 2 points, all finite.
pub(crate) fn validate<T: Value>(x: &[T], y: &[T]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    match x.len() {
        0 => return Err(Error::NoData),
        1 => return Err(Error::TooFewPoints(1)),
        _ => {}
    }

    for (axis, values) in [('x', x), ('y', y)] {
        let bad = values
            .iter()
            .position(|&v| !num_traits::float::FloatCore::is_finite(v));
        if let Some(index) = bad {
            return Err(Error::NonFinite {
                axis,
                index,
                value: values[index].to_string(),
            });
        }
    }
    Ok(())
}

/// Scores a series that has already been transformed.
///
/// Fits a line to x vs `y`, predicts every x, and returns the rounded RMSE.
pub(crate) fn score<T: Value>(x: &[T], y: &[T]) -> Result<T> {
    let evaluation = statistics::evaluate(x, y)?;
    Ok(evaluation.rmse.round_to(SCORE_PLACES))
}

/// Applies and scores a single transform.
///
/// # Errors
/// - [`Error::Domain`] if `y` is outside the transform's domain.
/// - [`Error::NonFiniteScore`] if the transformed values are finite but too large to score.
/// - [`Error::ZeroVariance`] if every x is identical.
pub fn evaluate_transform<T: Value>(
    transform: Transform,
    x: &[T],
    y: &[T],
) -> Result<StepResult<T>> {
    let y = transform.apply(y)?;
    let score = score(x, &y)?;
    if !num_traits::float::FloatCore::is_finite(score) {
        return Err(Error::NonFiniteScore { transform });
    }
    trace!(transform = transform.name(), score = %score, "scored transform");
    Ok(StepResult {
        transform,
        y,
        score,
    })
}

/// Scores every catalog transform against `(x, y)`, in catalog order.
///
/// This is the scoreboard [`linearize_step`] selects from.
///
/// A transform outside its domain aborts the whole evaluation: the first
/// [`Error::Domain`] or [`Error::NonFiniteScore`] is returned and no partial
/// scoreboard is produced. Every score on a returned scoreboard is finite.
///
/// # Errors
/// - [`Error::LengthMismatch`], [`Error::NoData`] or [`Error::TooFewPoints`] for malformed input.
/// - [`Error::NonFinite`] if any x or y is NaN or infinite.
/// - [`Error::NonFiniteScore`] if a transform's score overflows.
/// - [`Error::ZeroVariance`] if every x is identical.
/// - [`Error::Domain`] if any catalog transform is undefined for some y.
pub fn evaluate_catalog<T: Value>(x: &[T], y: &[T]) -> Result<Vec<StepResult<T>>> {
    validate(x, y)?;

    Transform::CATALOG
        .iter()
        .map(|&transform| evaluate_transform(transform, x, y))
        .collect()
}

/// Index of the lowest-scoring entry. Ties go to the earliest entry.
fn best_index<T: Value>(candidates: &[StepResult<T>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        match best {
            Some(b) if candidate.score >= candidates[b].score => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Picks the lowest-scoring entry. Ties go to the earliest entry.
///
/// Returns `None` only if `candidates` is empty.
#[must_use]
pub fn select_best<T: Value>(candidates: &[StepResult<T>]) -> Option<&StepResult<T>> {
    best_index(candidates).map(|i| &candidates[i])
}

/// Performs one straightening step.
///
/// Every catalog transform is applied to `y`, a trend line is fitted to x vs T(y),
/// and the transform whose result lies closest to its own line is returned.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// score(T) = round( RMSE( T(y), b0 + b1·x ), 5 )
/// where
///   (b0, b1) = least-squares line through (x, T(y)), predictions rounded to 3 places
/// ```
/// </div>
///
/// # Errors
/// - [`Error::LengthMismatch`], [`Error::NoData`] or [`Error::TooFewPoints`] for malformed input.
/// - [`Error::ZeroVariance`] if every x is identical.
/// - [`Error::Domain`] if any catalog transform is undefined for some y, for example
///   `log(y)` when y contains zero. The step is aborted rather than skipping the transform.
/// - [`Error::NonFinite`] if any x or y is NaN or infinite.
/// - [`Error::NonFiniteScore`] if a transform's values are finite but their score overflows.
///
/// # Example
/// ```rust
/// use linearize::{linearize_step, transforms::Transform};
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [1.0, 4.0, 9.0, 16.0, 25.0];
///
/// let step = linearize_step(&x, &y).unwrap();
/// assert_eq!(step.transform, Transform::Sqrt);
/// assert_eq!(step.y, x);
/// assert_eq!(step.score, 0.0);
/// ```
pub fn linearize_step<T: Value>(x: &[T], y: &[T]) -> Result<StepResult<T>> {
    let mut candidates = evaluate_catalog(x, y)?;
    let index = best_index(&candidates).ok_or(Error::NoData)?;

    let best = candidates.swap_remove(index);
    debug!(transform = best.name(), score = %best.score, "selected transform");
    Ok(best)
}
