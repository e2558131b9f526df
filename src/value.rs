//! Numeric types and pair utilities for linearization.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be linearized, ensuring compatibility with nalgebra,
//! floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `RealField` and `FloatCore` to provide:
//!   - `try_cast` for safe type conversion with error handling.
//!   - `round_to` for rounding to a fixed number of decimal places.
//!   - `powi` for integer exponentiation.
//! - [`CoordExt`]: Splits `(x, y)` pairs into their separate channels.
//!
//! # Example
//!
//! ```rust
//! use linearize::value::Value;
//!
//! let rounded = 2.0_f64.sqrt().round_to(3);
//! assert_eq!(rounded, 1.414);
//! ```
use crate::error::Error;

/// Numeric type for samples
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
    + std::str::FromStr
{
    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Widens the value to `f64`, or NaN if it cannot be represented
    fn to_f64_lossy(self) -> f64 {
        num_traits::cast(self).unwrap_or(f64::NAN)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Rounds the value to `places` decimal places.
    ///
    /// The result is the nearest representable value to the correctly rounded decimal
    /// expansion of `self`. Exact ties go to the even digit, so `0.0625` rounds to `0.062`,
    /// while `1.0005` (stored slightly below the tie) rounds to `1.0`.
    ///
    /// Non-finite values are returned unchanged.
    #[must_use]
    fn round_to(self, places: usize) -> Self {
        if !num_traits::float::FloatCore::is_finite(self) {
            return self;
        }

        // Float formatting with a precision is exact, which avoids the double rounding
        // of scaling by a power of ten first.
        format!("{self:.places$}").parse().unwrap_or(self)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
        + std::str::FromStr
{
}

/// Extension trait for accessing the `x` and `y` coordinates of a set of points.
///
/// # Examples
///
/// ```
/// # use linearize::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }
}
impl<T: Value> CoordExt<T> for Vec<(T, T)> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
impl<T: Value> CoordExt<T> for &[(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
