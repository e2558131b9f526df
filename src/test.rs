//! Assertions for testing code that linearizes data.
//!
//! ## Numeric assertions
//!
//! ### [`crate::assert_close`]
//! Asserts that two floating-point values are approximately equal.
//! - Uses the machine epsilon for the floating-point type as the tolerance, unless `tol = ...` is given.
//! - `assert_eq!` equivalent for floats.
//!
//! ### [`crate::assert_all_close`]
//! Element-wise [`crate::assert_close`] for two sequences of the same length.
//!
//! ## Linearization assertions
//!
//! ### [`crate::assert_linearizes`]
//! Asserts that one step of the linearizer picks a given transform for a dataset.
//! - On failure the full scoreboard is printed, so you can see how close the other candidates were.
//!
//! ```rust
//! use linearize::{assert_linearizes, transforms::Transform};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [1.0, 4.0, 9.0, 16.0, 25.0];
//! assert_linearizes!(&x, &y, Transform::Sqrt);
//! ```
mod assertions;
