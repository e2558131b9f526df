//! # Linearize
//! ## Find the transform that makes your data a straight line
//!
//! Lab data rarely arrives as a straight line. Pressure falls off as the reciprocal of volume,
//! intensity as an inverse square, populations grow exponentially. A straight line is the
//! one shape everybody can fit, read a slope off of, and extrapolate from, so the usual trick
//! is to transform `y` until `x` vs `T(y)` is linear.
//!
//! This library does that search for you. It tries a fixed catalog of elementary transforms
//! (`y^3`, `y^2`, `y`, `sqrt(y)`, `log(y)`, `1/y`, `1/y^2`, `1/y^3`), fits a least-squares line
//! to each result, and keeps the one that lies closest to its own line. Repeat until the
//! data is straight enough:
//! ```rust
//! use linearize::{linearize_to_threshold, transforms::Transform, DEFAULT_THRESHOLD};
//!
//! // Boyle's law: pressure against volume
//! let volume = [1.0, 2.0, 4.0, 5.0, 8.0, 10.0];
//! let pressure = [20.0, 10.0, 5.0, 4.0, 2.5, 2.0];
//!
//! let result = linearize_to_threshold(&volume, &pressure, DEFAULT_THRESHOLD).unwrap();
//! assert_eq!(result.history, vec![Transform::Reciprocal]);
//! assert_eq!(result.chain().to_string(), "1/y");
//! ```
//!
//! # Core Concepts
//! - A [`transforms::Transform`] is a named elementwise function of `y`.
//!     - [`transforms::Transform::CATALOG`] is the fixed, ordered list the search picks from.
//!     - Transforms with a restricted domain (`sqrt`, `log`, reciprocals) fail with [`error::Error::Domain`]
//!       instead of producing NaN or infinity.
//! - A **score** is the RMSE of `T(y)` around its own least-squares line, rounded to [`SCORE_PLACES`] decimals.
//!     - Lower is straighter. `0` means a perfect line.
//!     - Scores are absolute, not relative to the spread of the data.
//! - A **step** ([`linearize_step`]) scores every catalog transform and returns the best one.
//!     - Ties go to the transform listed first in the catalog.
//! - The **driver** ([`Linearizer`], [`linearize_to_threshold`]) repeats steps until the score
//!   meets a threshold, and records the chain of transforms it applied.
//!     - It gives up with [`error::Error::NoConvergence`] after [`DEFAULT_MAX_ITERATIONS`] steps,
//!       or as soon as no transform improves the data.
//!
//! # Implementation Details
//!
//! The statistics are the classic closed-form simple linear regression, see [`statistics`].
//! Everything is generic over [`value::Value`], so `f32` and `f64` both work.
//!
//! Logging goes through `tracing`: the driver reports each step at `debug` level and
//! the outcome at `info` or `warn`.
//!
//! # Testing utilities
//!
//! This crate includes assertion macros for float comparisons and for checking which transform
//! a dataset selects. See [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar

pub mod test;

pub mod dataset;
pub mod display;
pub mod error;
pub mod statistics;
pub mod transforms;
pub mod value;

mod converge;
mod linearize;

pub use converge::{
    linearize_to_threshold, Convergence, Linearizer, DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD,
};
pub use dataset::Dataset;
pub use linearize::{
    evaluate_catalog, evaluate_transform, linearize_step, select_best, StepResult, SCORE_PLACES,
};

pub use nalgebra;
