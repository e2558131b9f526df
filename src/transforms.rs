//! The catalog of candidate transforms for straightening data
//!
//! Each [`Transform`] maps every y value independently of x. The linearizer tries all of
//! them, in the order of [`Transform::CATALOG`], and keeps whichever makes x vs T(y) the
//! straightest. That order is also the tie-break order.
//!
//! # Powers
//! - [`Transform::Cube`] (`y^3`) and [`Transform::Square`] (`y^2`)
//!   - Straighten curves that flatten out as x grows.
//! - [`Transform::Identity`] (`y`)
//!   - Leaves the data alone. Selecting it means nothing else helped.
//!
//! # Roots and logarithms
//! - [`Transform::Sqrt`] (`sqrt(y)`)
//!   - Undoes a quadratic. Requires `y >= 0`.
//! - [`Transform::Log`] (`log(y)`)
//!   - Undoes an exponential. Natural log, requires `y > 0`.
//!
//! # Reciprocals
//! - [`Transform::Reciprocal`] (`1/y`), [`Transform::ReciprocalSquare`] (`1/y^2`), [`Transform::ReciprocalCube`] (`1/y^3`)
//!   - Straighten inverse relationships such as pressure vs volume. Require `y != 0`.
//!
//! A transform applied outside its domain fails with [`Error::Domain`] instead of
//! producing NaN or infinity. Finite values can still overflow once they are squared
//! and summed; scoring rejects those separately with [`Error::NonFiniteScore`].
//!
//! ```rust
//! use linearize::transforms::Transform;
//!
//! let roots = Transform::Sqrt.apply(&[1.0, 4.0, 9.0]).unwrap();
//! assert_eq!(roots, vec![1.0, 2.0, 3.0]);
//!
//! assert!(Transform::Log.apply(&[1.0, 0.0]).is_err());
//! ```
use std::{fmt, str::FromStr};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// A named elementwise transform of the dependent variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Transform {
    /// `y^3`
    #[serde(rename = "y^3")]
    Cube,

    /// `y^2`
    #[serde(rename = "y^2")]
    Square,

    /// `y`
    #[serde(rename = "y")]
    Identity,

    /// `sqrt(y)`, defined for `y >= 0`
    #[serde(rename = "sqrt(y)")]
    Sqrt,

    /// `log(y)`, the natural logarithm, defined for `y > 0`
    #[serde(rename = "log(y)")]
    Log,

    /// `1/y`, defined for `y != 0`
    #[serde(rename = "1/y")]
    Reciprocal,

    /// `1/y^2`, defined for `y != 0`
    #[serde(rename = "1/y^2")]
    ReciprocalSquare,

    /// `1/y^3`, defined for `y != 0`
    #[serde(rename = "1/y^3")]
    ReciprocalCube,
}

impl Transform {
    /// Every transform, in evaluation and tie-break order.
    pub const CATALOG: [Transform; 8] = [
        Transform::Cube,
        Transform::Square,
        Transform::Identity,
        Transform::Sqrt,
        Transform::Log,
        Transform::Reciprocal,
        Transform::ReciprocalSquare,
        Transform::ReciprocalCube,
    ];

    /// The display name, e.g. `"sqrt(y)"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Transform::Cube => "y^3",
            Transform::Square => "y^2",
            Transform::Identity => "y",
            Transform::Sqrt => "sqrt(y)",
            Transform::Log => "log(y)",
            Transform::Reciprocal => "1/y",
            Transform::ReciprocalSquare => "1/y^2",
            Transform::ReciprocalCube => "1/y^3",
        }
    }

    /// Looks a transform up by its display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::CATALOG.into_iter().find(|t| t.name() == name)
    }

    /// Returns true if `value` is inside this transform's domain.
    #[must_use]
    pub fn accepts<T: Value>(self, value: T) -> bool {
        if num_traits::float::FloatCore::is_nan(value) {
            return false;
        }

        match self {
            Transform::Cube | Transform::Square | Transform::Identity => true,
            Transform::Sqrt => value >= T::zero(),
            Transform::Log => value > T::zero(),
            Transform::Reciprocal | Transform::ReciprocalSquare | Transform::ReciprocalCube => {
                value != T::zero()
            }
        }
    }

    /// Maps a single value, without domain checks.
    fn map<T: Value>(self, y: T) -> T {
        match self {
            Transform::Cube => Value::powi(y, 3),
            Transform::Square => Value::powi(y, 2),
            Transform::Identity => y,
            Transform::Sqrt => y.sqrt(),
            Transform::Log => y.ln(),
            Transform::Reciprocal => T::one() / y,
            Transform::ReciprocalSquare => T::one() / Value::powi(y, 2),
            Transform::ReciprocalCube => T::one() / Value::powi(y, 3),
        }
    }

    /// Applies the transform to every value.
    ///
    /// # Errors
    /// Returns [`Error::Domain`] naming the first value outside the domain, or the first
    /// value whose image is not finite (for example `y^3` overflowing).
    pub fn apply<T: Value>(self, values: &[T]) -> Result<Vec<T>> {
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let out = self.map(value);
                if self.accepts(value) && num_traits::float::FloatCore::is_finite(out) {
                    Ok(out)
                } else {
                    Err(Error::Domain {
                        transform: self,
                        index,
                        value: value.to_string(),
                    })
                }
            })
            .collect()
    }

    /// Wraps an expression in this transform.
    ///
    /// `atomic` says whether `inner` can be raised to a power without parentheses.
    /// Returns the new expression and whether it is atomic.
    fn wrap(self, inner: &str, atomic: bool) -> (String, bool) {
        let base = if atomic {
            inner.to_string()
        } else {
            format!("({inner})")
        };

        match self {
            Transform::Identity => (inner.to_string(), atomic),
            Transform::Sqrt => (format!("sqrt({inner})"), true),
            Transform::Log => (format!("log({inner})"), true),
            Transform::Cube => (format!("{base}^3"), false),
            Transform::Square => (format!("{base}^2"), false),
            Transform::Reciprocal => (format!("1/{base}"), false),
            Transform::ReciprocalSquare => (format!("1/{base}^2"), false),
            Transform::ReciprocalCube => (format!("1/{base}^3"), false),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s.trim()).ok_or_else(|| Error::Parse(format!("unknown transform `{s}`")))
    }
}

/// An ordered sequence of transforms, displayed as one nested expression.
///
/// The first transform is applied first, so it ends up innermost:
/// ```rust
/// # use linearize::transforms::{Transform, TransformChain};
/// let chain = TransformChain::new(&[Transform::Sqrt, Transform::Log]);
/// assert_eq!(chain.to_string(), "log(sqrt(y))");
/// ```
/// An empty chain, or one of only identities, displays as `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformChain<'a> {
    steps: &'a [Transform],
}
impl<'a> TransformChain<'a> {
    /// Creates a chain over a transform history.
    #[must_use]
    pub fn new(steps: &'a [Transform]) -> Self {
        Self { steps }
    }

    /// Applies every transform in order.
    ///
    /// # Errors
    /// Returns the first [`Error::Domain`] raised along the way.
    pub fn apply<T: Value>(&self, values: &[T]) -> Result<Vec<T>> {
        let mut current = values.to_vec();
        for transform in self.steps {
            current = transform.apply(&current)?;
        }
        Ok(current)
    }
}

impl fmt::Display for TransformChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut expr = Transform::Identity.name().to_string();
        let mut atomic = true;
        for transform in self.steps {
            (expr, atomic) = transform.wrap(&expr, atomic);
        }
        f.write_str(&expr)
    }
}
