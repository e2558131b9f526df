//! Human-readable output for linearization results
//!
//! This module turns trend lines, step scoreboards, and finished runs into text
//! for terminals and test failure messages.
//!
//! # Key Concepts
//! - **[`format_trend_line`]**: Renders a fitted line as `label = slope·x ± intercept`.
//! - **[`Scoreboard`]**: Table of every catalog transform's score for one step.
//! - **[`Report`]**: Summary of a converged run, from raw trend line to final chain.
//!
//! # Helpers
//! - [`format_number`]: Fixed or scientific notation depending on magnitude.
//! - [`Sign`]: Tracks whether a term is positive or negative.
use std::fmt;

use crate::{
    converge::Convergence,
    dataset::Dataset,
    error::Result,
    linearize::{select_best, StepResult, SCORE_PLACES},
    statistics::{self, TrendLine},
    value::Value,
};

/// Default number of decimal places for equations and reports
pub const DEFAULT_PRECISION: usize = 3;

/// Default range in which scientific notation is not used
#[must_use]
pub fn default_fixed_range<T: Value>() -> Option<std::ops::Range<T>> {
    const RANGE: std::ops::Range<f64> = 1e-3..1e3;
    let s = T::try_cast(RANGE.start).ok()?;
    let e = T::try_cast(RANGE.end).ok()?;
    Some(s..e)
}

/// Formats a number with `precision` decimal places.
///
/// Magnitudes between `1e-3` and `1e3` (and zero) use fixed notation, everything
/// else uses scientific notation.
///
/// # Example
/// ```
/// # use linearize::display::format_number;
/// assert_eq!(format_number(2.5, 2), "2.50");
/// assert_eq!(format_number(-0.25, 3), "-0.250");
/// assert_eq!(format_number(1e5, 2), "1.00e5");
/// ```
#[must_use]
pub fn format_number<T: Value>(n: T, precision: usize) -> String {
    let fixed = n.is_zero()
        || default_fixed_range::<T>().is_some_and(|range| range.contains(&Value::abs(n)));

    if fixed {
        format!("{n:.precision$}")
    } else {
        format!("{n:.precision$e}")
    }
}

/// Represents the sign of a term in an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use linearize::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef.is_sign_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// Formats a trend line as an equation in `x`.
///
/// `label` names the left-hand side, usually the transform chain that produced
/// the fitted values. Terms that are zero (within epsilon) are skipped.
///
/// # Example
/// ```
/// # use linearize::{display::format_trend_line, statistics::TrendLine};
/// let line = TrendLine { intercept: -0.5, slope: 3.0 };
/// assert_eq!(format_trend_line(&line, "log(y)", 2), "log(y) = 3.00x - 0.50");
/// ```
#[must_use]
pub fn format_trend_line<T: Value>(trend: &TrendLine<T>, label: &str, precision: usize) -> String {
    let is_zero = |v: T| Value::abs(v) <= T::epsilon();

    if is_zero(trend.slope) {
        let intercept = if is_zero(trend.intercept) {
            T::zero()
        } else {
            trend.intercept
        };
        return format!("{label} = {}", format_number(intercept, precision));
    }

    let mut equation = format!("{label} = ");
    if Sign::from_coef(trend.slope) == Sign::Negative {
        equation.push('-');
    }
    equation.push_str(&format_number(Value::abs(trend.slope), precision));
    equation.push('x');

    if !is_zero(trend.intercept) {
        let sign = Sign::from_coef(trend.intercept).char();
        let intercept = format_number(Value::abs(trend.intercept), precision);
        equation.push_str(&format!(" {sign} {intercept}"));
    }

    equation
}

/// Table of every catalog transform's score for one step, best marked.
///
/// Built from the output of [`crate::evaluate_catalog`]:
/// ```text
/// # |  Transform |        Score
/// --|------------|-------------
/// 1 |        y^3 |  22.51374
/// 4 |    sqrt(y) |   0.00000 <- best
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scoreboard<'a, T: Value> {
    candidates: &'a [StepResult<T>],
}
impl<'a, T: Value> Scoreboard<'a, T> {
    /// Wraps a scoreboard for display.
    #[must_use]
    pub fn new(candidates: &'a [StepResult<T>]) -> Self {
        Self { candidates }
    }
}
impl<T: Value> fmt::Display for Scoreboard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let best = select_best(self.candidates).map(|c| c.transform);
        let places = SCORE_PLACES;

        writeln!(f, "# | {:>10} | {:>12}", "Transform", "Score")?;
        writeln!(f, "--|-{:-^10}-|-{:-^12}", "", "")?;
        for (i, candidate) in self.candidates.iter().enumerate() {
            let n = i + 1;
            let name = candidate.name();
            let score = format!("{:.places$}", candidate.score);
            let marker = if Some(candidate.transform) == best {
                " <- best"
            } else {
                ""
            };
            writeln!(f, "{n} | {name:>10} | {score:>12}{marker}")?;
        }
        Ok(())
    }
}

/// Summary of a finished run.
///
/// Shows the trend line of the raw data, the transform chain that was chosen,
/// the trend line of the transformed data, and its quality.
#[derive(Debug, Clone)]
pub struct Report<T: Value> {
    axes: Option<(String, String)>,
    points: usize,
    raw: TrendLine<T>,
    chain: String,
    trend: TrendLine<T>,
    rmse: T,
    r_squared: T,
    iterations: usize,
}
impl<T: Value> Report<T> {
    /// Builds a report for a run of the driver on `(x, y)`.
    ///
    /// # Errors
    /// Fails if either the raw or the transformed data has no trend line, see
    /// [`statistics::coefficients`].
    pub fn new(x: &[T], y: &[T], convergence: &Convergence<T>) -> Result<Self> {
        let raw = TrendLine::fit(x, y)?;
        let trend = TrendLine::fit(x, &convergence.y)?;
        let r_squared = statistics::r_squared(&convergence.y, &trend.predictions(x))?;

        Ok(Self {
            axes: None,
            points: x.len(),
            raw,
            chain: convergence.chain().to_string(),
            trend,
            rmse: convergence.rmse,
            r_squared,
            iterations: convergence.iterations,
        })
    }

    /// Builds a report for a run on a dataset, including its axis titles.
    ///
    /// # Errors
    /// See [`Report::new`].
    pub fn for_dataset(dataset: &Dataset<T>, convergence: &Convergence<T>) -> Result<Self> {
        let mut report = Self::new(dataset.x(), dataset.y(), convergence)?;
        if let (Some(x), Some(y)) = (dataset.x_title(), dataset.y_title()) {
            report.axes = Some((x.to_string(), y.to_string()));
        }
        Ok(report)
    }

    /// The raw data's trend line
    #[must_use]
    pub fn raw_trend(&self) -> &TrendLine<T> {
        &self.raw
    }

    /// The transformed data's trend line
    #[must_use]
    pub fn trend(&self) -> &TrendLine<T> {
        &self.trend
    }
}
impl<T: Value> fmt::Display for Report<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = DEFAULT_PRECISION;

        if let Some((x, y)) = &self.axes {
            writeln!(f, "Data:        {y} vs {x}, {} points", self.points)?;
        } else {
            writeln!(f, "Data:        {} points", self.points)?;
        }
        writeln!(f, "Raw trend:   {}", format_trend_line(&self.raw, "y", p))?;
        writeln!(f, "Transform:   {}", self.chain)?;
        writeln!(f, "Trend line:  {}", format_trend_line(&self.trend, &self.chain, p))?;
        writeln!(f, "RMSE:        {}", format_number(self.rmse, SCORE_PLACES))?;

        if num_traits::float::FloatCore::is_nan(self.r_squared) {
            writeln!(f, "R²:          -----")?;
        } else {
            writeln!(f, "R²:          {:.4}", self.r_squared)?;
        }
        write!(f, "Iterations:  {}", self.iterations)
    }
}
