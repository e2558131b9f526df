//! Paired `(x, y)` datasets and the file format they are loaded from.
//!
//! A [`Dataset`] can only be built through a validating constructor, so any instance
//! holds two equal-length series of at least 2 points.
//!
//! Dataset files are JSON, either with named axes:
//! ```json
//! { "x": { "title": "Displacement (m)", "values": [0.008, 0.022, 0.036] },
//!   "y": { "title": "Force (N)",        "values": [0.196, 0.294, 0.392] } }
//! ```
//! or as a bare list of pairs: `[[0.008, 0.196], [0.022, 0.294]]`.
//! Titles are optional.
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    converge::{Convergence, Linearizer},
    error::{Error, Result},
    linearize::{self, StepResult},
    value::{CoordExt, Value},
};

#[derive(Deserialize)]
struct Axis<T> {
    #[serde(default)]
    title: Option<String>,
    values: Vec<T>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile<T> {
    Axes { x: Axis<T>, y: Axis<T> },
    Pairs(Vec<(T, T)>),
}

/// A validated set of `(x, y)` samples, paired by index.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Dataset<T: Value> {
    x: Vec<T>,
    y: Vec<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    x_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    y_title: Option<String>,
}
impl<T: Value> Dataset<T> {
    /// Creates a dataset from separate x and y series.
    ///
    /// # Errors
    /// - [`Error::LengthMismatch`] if the series differ in length.
    /// - [`Error::NoData`] or [`Error::TooFewPoints`] if there are fewer than 2 points.
    /// - [`Error::NonFinite`] if any value is NaN or infinite.
    pub fn new(x: Vec<T>, y: Vec<T>) -> Result<Self> {
        linearize::validate(&x, &y)?;
        Ok(Self {
            x,
            y,
            x_title: None,
            y_title: None,
        })
    }

    /// Creates a dataset from `(x, y)` pairs.
    ///
    /// # Errors
    /// [`Error::NoData`] or [`Error::TooFewPoints`] if there are fewer than 2 pairs.
    pub fn from_pairs(pairs: &[(T, T)]) -> Result<Self> {
        Self::new(pairs.x(), pairs.y())
    }

    /// Sets the axis titles, e.g. `"Displacement (m)"` and `"Force (N)"`.
    #[must_use]
    pub fn with_titles(mut self, x_title: impl Into<String>, y_title: impl Into<String>) -> Self {
        self.x_title = Some(x_title.into());
        self.y_title = Some(y_title.into());
        self
    }

    /// The x series
    #[must_use]
    pub fn x(&self) -> &[T] {
        &self.x
    }

    /// The y series
    #[must_use]
    pub fn y(&self) -> &[T] {
        &self.y
    }

    /// Title of the x axis, if the dataset has one
    #[must_use]
    pub fn x_title(&self) -> Option<&str> {
        self.x_title.as_deref()
    }

    /// Title of the y axis, if the dataset has one
    #[must_use]
    pub fn y_title(&self) -> Option<&str> {
        self.y_title.as_deref()
    }

    /// Number of points. Always at least 2.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterates over the `(x, y)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Runs one straightening step on the dataset. See [`crate::linearize_step`].
    ///
    /// # Errors
    /// See [`crate::linearize_step`].
    pub fn step(&self) -> Result<StepResult<T>> {
        linearize::linearize_step(&self.x, &self.y)
    }

    /// Straightens the dataset with the given driver settings. See [`Linearizer::run`].
    ///
    /// # Errors
    /// See [`Linearizer::run`].
    pub fn linearize(&self, linearizer: &Linearizer<T>) -> Result<Convergence<T>> {
        linearizer.run(&self.x, &self.y)
    }
}

impl<T: Value + DeserializeOwned> Dataset<T> {
    /// Parses a dataset from JSON text.
    ///
    /// # Errors
    /// - [`Error::Parse`] if the text is not a dataset in either supported shape.
    /// - Any error from [`Dataset::new`] if the parsed series are malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: DatasetFile<T> =
            serde_json::from_str(json).map_err(|e| Error::Parse(e.to_string()))?;

        match file {
            DatasetFile::Axes { x, y } => {
                let mut dataset = Self::new(x.values, y.values)?;
                dataset.x_title = x.title;
                dataset.y_title = y.title;
                Ok(dataset)
            }
            DatasetFile::Pairs(pairs) => Self::from_pairs(&pairs),
        }
    }

    /// Reads and parses a JSON dataset file.
    ///
    /// # Errors
    /// - [`Error::Io`] if the file cannot be read.
    /// - See [`Dataset::from_json_str`] for the rest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, transforms::Transform};

    const HOOKE: &str = r#"{
        "x": { "title": "Displacement (m)", "values": [0.008, 0.022, 0.036, 0.052] },
        "y": { "title": "Force (N)", "values": [0.196, 0.294, 0.392, 0.491] }
    }"#;

    #[test]
    fn parses_named_axes() {
        let data = Dataset::<f64>::from_json_str(HOOKE).unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.x(), &[0.008, 0.022, 0.036, 0.052]);
        assert_eq!(data.y()[3], 0.491);
        assert_eq!(data.x_title(), Some("Displacement (m)"));
        assert_eq!(data.y_title(), Some("Force (N)"));
    }

    #[test]
    fn titles_are_optional() {
        let json = r#"{ "x": { "values": [1, 2, 3] }, "y": { "values": [2, 4, 6] } }"#;
        let data = Dataset::<f64>::from_json_str(json).unwrap();
        assert_eq!(data.x_title(), None);
        assert_eq!(data.y(), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn parses_pair_list() {
        let data = Dataset::<f32>::from_json_str("[[1, 1], [2, 4], [3, 9]]").unwrap();
        assert_eq!(data.x(), &[1.0, 2.0, 3.0]);
        assert_eq!(data.pairs().collect::<Vec<_>>(), vec![(1.0, 1.0), (2.0, 4.0), (3.0, 9.0)]);
    }

    #[test]
    fn rejects_malformed_files() {
        let err = Dataset::<f64>::from_json_str("{ \"x\": [1, 2] }").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let mismatched = r#"{ "x": { "values": [1, 2, 3] }, "y": { "values": [1, 2] } }"#;
        assert!(matches!(
            Dataset::<f64>::from_json_str(mismatched),
            Err(Error::LengthMismatch { x: 3, y: 2 })
        ));

        assert!(matches!(
            Dataset::<f64>::from_json_str("[[1, 2]]"),
            Err(Error::TooFewPoints(1))
        ));
        assert!(matches!(Dataset::<f64>::from_json_str("[]"), Err(Error::NoData)));

        assert!(matches!(
            Dataset::from_pairs(&[(1.0, 2.0), (f64::NAN, 3.0)]),
            Err(Error::NonFinite { axis: 'x', index: 1, .. })
        ));
    }

    #[test]
    fn load_reads_files() {
        let name = format!("linearize-dataset-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, HOOKE).unwrap();
        let loaded = Dataset::<f64>::load(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.unwrap(), Dataset::from_json_str(HOOKE).unwrap());
    }

    #[test]
    fn load_reports_missing_files() {
        let err = Dataset::<f64>::load("/nonexistent/linearize/data.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn linearizes_through_the_dataset() {
        let data = Dataset::from_pairs(&[(1.0, 1.0), (2.0, 4.0), (3.0, 9.0), (4.0, 16.0)])
            .unwrap()
            .with_titles("t", "d");
        assert_eq!(data.step().unwrap().transform, Transform::Sqrt);

        let result = data.linearize(&Linearizer::new()).unwrap();
        assert_eq!(result.history, vec![Transform::Sqrt]);
        assert_eq!(data.y_title(), Some("d"));
    }
}
