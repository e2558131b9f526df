//! Error types for linearization
//!
//! This module defines the failures encountered while validating data,
//! fitting trend lines, applying transforms, or driving a series to a
//! threshold, along with a convenient `Result` alias.
use crate::transforms::{Transform, TransformChain};

/// Errors that can occur while linearizing a dataset.
///
/// Every variant belongs to one [`ErrorKind`], see [`Error::kind`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A sequence was empty where at least one value is required.
    #[error("No data available")]
    NoData,

    /// Paired sequences have different lengths.
    #[error("Length mismatch: x has {x} values but y has {y}")]
    LengthMismatch {
        /// Length of the x (or actual) sequence
        x: usize,
        /// Length of the y (or predicted) sequence
        y: usize,
    },

    /// A dataset needs at least two points to describe a line.
    #[error("At least 2 data points are required, found {0}")]
    TooFewPoints(usize),

    /// A sample is NaN or infinite.
    #[error("Non-finite sample {axis}[{index}] = {value}")]
    NonFinite {
        /// `'x'` or `'y'`
        axis: char,
        /// Index of the first offending value
        index: usize,
        /// The offending value, formatted
        value: String,
    },

    /// Every x value is identical, so no trend line exists.
    ///
    /// The least-squares slope divides by the spread of x, which is zero here.
    #[error("All x values are identical; the trend line is undefined")]
    ZeroVariance,

    /// A transform was applied to a value outside its domain.
    ///
    /// For example the logarithm of a non-positive value, or the reciprocal of zero.
    #[error("Transform `{transform}` is undefined for y[{index}] = {value}")]
    Domain {
        /// The transform that failed
        transform: Transform,
        /// Index of the first offending value
        index: usize,
        /// The offending value, formatted
        value: String,
    },

    /// A transform produced finite values, but their score overflowed.
    ///
    /// Treated like a domain error: the values are too extreme to compare.
    #[error("Transform `{transform}` produced values too large to score")]
    NonFiniteScore {
        /// The transform whose score was not finite
        transform: Transform,
    },

    /// The iteration cap was reached, or the search stalled, before the score
    /// dropped under the threshold.
    ///
    /// Carries the best state reached so that callers can still report it.
    #[error(
        "No convergence under threshold {threshold}: best rmse {} from `{}` after {} step(s)",
        best.rmse, best.best_chain(), best.iterations
    )]
    NoConvergence {
        /// The threshold that was not met
        threshold: f64,
        /// The lowest-scoring state reached
        best: Box<PartialConvergence>,
    },

    /// A step of the convergence driver failed.
    ///
    /// The underlying error is available as the source. `history` holds the
    /// transforms applied before the failing step.
    #[error("Step {iteration} failed: {source}")]
    StepFailed {
        /// 1-based index of the failing step
        iteration: usize,
        /// Transforms applied before the failure
        history: Vec<Transform>,
        /// The error raised by the step
        #[source]
        source: Box<Error>,
    },

    /// A driver setting is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A dataset file could not be parsed.
    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    /// A dataset file could not be read.
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty, mismatched or otherwise malformed input
    InvalidInput,

    /// Input is well formed but a fit is undefined for it
    Degenerate,

    /// A transform was applied outside its valid domain
    Domain,

    /// The driver could not reach its threshold
    Convergence,
}

impl Error {
    /// Returns the classification of this error.
    ///
    /// [`Error::StepFailed`] reports the kind of the error it wraps.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoData
            | Error::LengthMismatch { .. }
            | Error::TooFewPoints(_)
            | Error::NonFinite { .. }
            | Error::InvalidConfig(_)
            | Error::Parse(_)
            | Error::Io(_)
            | Error::CastFailed => ErrorKind::InvalidInput,
            Error::ZeroVariance => ErrorKind::Degenerate,
            Error::Domain { .. } | Error::NonFiniteScore { .. } => ErrorKind::Domain,
            Error::NoConvergence { .. } => ErrorKind::Convergence,
            Error::StepFailed { source, .. } => source.kind(),
        }
    }

    /// Transforms applied before the error occurred, if it came from the convergence driver.
    #[must_use]
    pub fn history(&self) -> Option<&[Transform]> {
        match self {
            Error::StepFailed { history, .. } => Some(history),
            Error::NoConvergence { best, .. } => Some(&best.history),
            _ => None,
        }
    }
}

/// State of an unfinished convergence run.
///
/// Values are widened to `f64` so that the error type stays independent of the
/// numeric type used for the run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PartialConvergence {
    /// Transformed y values at the best step
    pub y: Vec<f64>,

    /// Score of the best step
    pub rmse: f64,

    /// Every transform applied during the run, in order
    pub history: Vec<Transform>,

    /// Number of steps that produced the best state
    pub iterations: usize,
}

impl PartialConvergence {
    /// The transforms that produced the best state: the first `iterations` of the history.
    #[must_use]
    pub fn best_chain(&self) -> TransformChain<'_> {
        let steps = self.history.get(..self.iterations).unwrap_or(&self.history[..]);
        TransformChain::new(steps)
    }

    /// Every transform the run applied, including any after the best state.
    #[must_use]
    pub fn applied(&self) -> TransformChain<'_> {
        TransformChain::new(&self.history)
    }
}

/// Result type for linearization
pub type Result<T> = std::result::Result<T, Error>;
