//! Repeated straightening until the data is linear enough.
//!
//! [`Linearizer`] feeds the output of each [`linearize_step`] back into the next one
//! until the score drops to the threshold, recording every transform it applies.
//!
//! The run is bounded: it stops with [`Error::NoConvergence`] after
//! [`Linearizer::max_iterations`] steps, or as soon as a step selects the identity
//! while still above the threshold (every later step would repeat it exactly).
//!
//! ```rust
//! use linearize::{Linearizer, transforms::Transform};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [1.0, 4.0, 9.0, 16.0, 25.0];
//!
//! let result = Linearizer::new().threshold(0.01).run(&x, &y).unwrap();
//! assert_eq!(result.history, vec![Transform::Sqrt]);
//! assert_eq!(result.iterations, 1);
//! assert_eq!(result.y, x);
//! ```
use tracing::{debug, info, warn};

use crate::{
    error::{Error, PartialConvergence, Result},
    linearize::{self, linearize_step},
    transforms::{Transform, TransformChain},
    value::Value,
};

/// Threshold used by [`linearize_to_threshold`] callers that have no preference.
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Default step limit: two full passes over the catalog.
pub const DEFAULT_MAX_ITERATIONS: usize = 2 * Transform::CATALOG.len();

/// Result of a converged run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Convergence<T: Value> {
    /// The final transformed y values
    pub y: Vec<T>,

    /// Score of the final y values around their trend line
    pub rmse: T,

    /// Every transform applied, in order. Empty if the input already met the threshold.
    pub history: Vec<Transform>,

    /// Number of steps that did real work.
    ///
    /// A final identity step is not counted, since it means the previous step was
    /// already as straight as the catalog allows.
    pub iterations: usize,
}
impl<T: Value> Convergence<T> {
    /// True if at least one transform was needed.
    #[must_use]
    pub fn is_linearized(&self) -> bool {
        self.iterations > 0
    }

    /// The history as one nested expression, e.g. `log(sqrt(y))`.
    #[must_use]
    pub fn chain(&self) -> TransformChain<'_> {
        TransformChain::new(&self.history)
    }
}

/// Drives a series to a threshold by repeated linearization steps.
///
/// Configure with the builder methods, then call [`Linearizer::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linearizer<T: Value> {
    threshold: T,
    max_iterations: usize,
}
impl<T: Value> Default for Linearizer<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Value> Linearizer<T> {
    /// Creates a linearizer with [`DEFAULT_THRESHOLD`] and [`DEFAULT_MAX_ITERATIONS`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: T::try_cast(DEFAULT_THRESHOLD).unwrap_or(T::zero()),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Sets the highest acceptable score. The run stops once a step scores at or below it.
    #[must_use]
    pub fn threshold(mut self, threshold: T) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the maximum number of steps before giving up.
    #[must_use]
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// The configured threshold.
    #[must_use]
    pub fn get_threshold(&self) -> T {
        self.threshold
    }

    /// The configured step limit.
    #[must_use]
    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn validate(&self) -> Result<()> {
        if !num_traits::float::FloatCore::is_finite(self.threshold) || self.threshold < T::zero() {
            return Err(Error::InvalidConfig(format!(
                "threshold must be finite and non-negative, got {}",
                self.threshold
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Straightens `(x, y)` until its score is at or below the threshold.
    ///
    /// If `y` already meets the threshold, no step is taken: the result has zero
    /// iterations, an empty history, and `y` unchanged.
    ///
    /// # Errors
    /// - [`Error::InvalidConfig`] if the threshold is negative or not finite, or the step limit is 0.
    /// - [`Error::LengthMismatch`], [`Error::NoData`] or [`Error::TooFewPoints`] for malformed input.
    /// - [`Error::NonFinite`] if any x or y is NaN or infinite.
    /// - [`Error::ZeroVariance`] if every x is identical.
    /// - [`Error::StepFailed`] if a step fails part way through, with the history so far.
    /// - [`Error::NoConvergence`] if the step limit is reached or the search stalls, with the best state.
    pub fn run(&self, x: &[T], y: &[T]) -> Result<Convergence<T>> {
        self.validate()?;
        linearize::validate(x, y)?;

        let initial = linearize::score(x, y)?;
        if initial <= self.threshold {
            debug!(rmse = %initial, "input already meets threshold");
            return Ok(Convergence {
                y: y.to_vec(),
                rmse: initial,
                history: Vec::new(),
                iterations: 0,
            });
        }

        let mut history = Vec::new();
        let mut current = y.to_vec();
        let mut best: Option<(Vec<T>, T, usize)> = None;

        for iteration in 1..=self.max_iterations {
            let step = linearize_step(x, &current).map_err(|e| Error::StepFailed {
                iteration,
                history: history.clone(),
                source: Box::new(e),
            })?;
            history.push(step.transform);
            debug!(
                iteration,
                transform = step.name(),
                score = %step.score,
                "applied transform"
            );

            if step.score <= self.threshold {
                let mut iterations = iteration;
                if step.transform == Transform::Identity {
                    iterations -= 1;
                }

                info!(
                    iterations,
                    rmse = %step.score,
                    chain = %TransformChain::new(&history),
                    "converged"
                );
                return Ok(Convergence {
                    y: step.y,
                    rmse: step.score,
                    history,
                    iterations,
                });
            }

            if best.as_ref().map_or(true, |(_, score, _)| step.score < *score) {
                best = Some((step.y.clone(), step.score, iteration));
            }

            if step.transform == Transform::Identity {
                warn!(rmse = %step.score, "no transform improves the data any further");
                return Err(self.no_convergence(best, history, y, initial));
            }
            current = step.y;
        }

        warn!(
            max_iterations = self.max_iterations,
            "step limit reached without convergence"
        );
        Err(self.no_convergence(best, history, y, initial))
    }

    fn no_convergence(
        &self,
        best: Option<(Vec<T>, T, usize)>,
        history: Vec<Transform>,
        y: &[T],
        initial: T,
    ) -> Error {
        let (best_y, rmse, iterations) = match best {
            Some((best_y, score, iteration)) if score < initial => (best_y, score, iteration),
            _ => (y.to_vec(), initial, 0),
        };

        Error::NoConvergence {
            threshold: self.threshold.to_f64_lossy(),
            best: Box::new(PartialConvergence {
                y: best_y.into_iter().map(Value::to_f64_lossy).collect(),
                rmse: rmse.to_f64_lossy(),
                history,
                iterations,
            }),
        }
    }
}

/// Straightens `(x, y)` until its score is at or below `threshold`.
///
/// Shorthand for `Linearizer::new().threshold(threshold).run(x, y)`, using
/// [`DEFAULT_MAX_ITERATIONS`] as the step limit. [`DEFAULT_THRESHOLD`] is the usual choice.
///
/// # Errors
/// See [`Linearizer::run`].
pub fn linearize_to_threshold<T: Value>(x: &[T], y: &[T], threshold: T) -> Result<Convergence<T>> {
    Linearizer::new().threshold(threshold).run(x, y)
}
