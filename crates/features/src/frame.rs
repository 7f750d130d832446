//! Columnar feature table.
//!
//! A [`FeatureFrame`] is an ordered set of equal-length named columns
//! with typed access. Float columns use NaN for undefined entries
//! (incomplete windows); Int64 columns are always fully defined.
//! Column insertion order is preserved, so serialized partitions keep
//! a stable schema.

use crate::error::FeatureError;

/// Typed column storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Floating-point values; NaN marks undefined entries.
    Float64(Vec<f64>),
    /// Integer values (timestamps, counts, binary flags).
    Int64(Vec<i64>),
}

impl Column {
    /// Number of values in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Float64(v) => v.len(),
            Column::Int64(v) => v.len(),
        }
    }

    /// Returns true when the column has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn select(&self, indices: &[usize]) -> Column {
        match self {
            Column::Float64(v) => Column::Float64(indices.iter().map(|&i| v[i]).collect()),
            Column::Int64(v) => Column::Int64(indices.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// Ordered columnar table of feature values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    len: usize,
    columns: Vec<(String, Column)>,
}

impl FeatureFrame {
    /// Creates an empty frame with a fixed row count.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            columns: Vec::new(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Iterates over `(name, column)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, col)| (name.as_str(), col))
    }

    /// Appends a Float64 column.
    ///
    /// # Errors
    /// - [`FeatureError::DuplicateColumn`] when the name is taken.
    /// - [`FeatureError::LengthMismatch`] when the length differs from the frame.
    pub fn push_f64(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), FeatureError> {
        self.push(name.into(), Column::Float64(values))
    }

    /// Appends an Int64 column.
    ///
    /// # Errors
    /// - [`FeatureError::DuplicateColumn`] when the name is taken.
    /// - [`FeatureError::LengthMismatch`] when the length differs from the frame.
    pub fn push_i64(&mut self, name: impl Into<String>, values: Vec<i64>) -> Result<(), FeatureError> {
        self.push(name.into(), Column::Int64(values))
    }

    fn push(&mut self, name: String, column: Column) -> Result<(), FeatureError> {
        if self.column(&name).is_some() {
            return Err(FeatureError::DuplicateColumn(name));
        }
        if column.len() != self.len {
            return Err(FeatureError::LengthMismatch {
                column: name,
                expected: self.len,
                actual: column.len(),
            });
        }
        self.columns.push((name, column));
        Ok(())
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, col)| col)
    }

    /// Typed access to a Float64 column.
    ///
    /// # Errors
    /// - [`FeatureError::MissingColumn`] when the column does not exist.
    /// - [`FeatureError::InvalidColumnType`] when it is not Float64.
    pub fn f64s(&self, name: &str) -> Result<&[f64], FeatureError> {
        match self.column(name) {
            Some(Column::Float64(v)) => Ok(v),
            Some(Column::Int64(_)) => Err(FeatureError::InvalidColumnType {
                column: name.to_string(),
                expected: "Float64",
            }),
            None => Err(FeatureError::MissingColumn(name.to_string())),
        }
    }

    /// Typed access to an Int64 column.
    ///
    /// # Errors
    /// - [`FeatureError::MissingColumn`] when the column does not exist.
    /// - [`FeatureError::InvalidColumnType`] when it is not Int64.
    pub fn i64s(&self, name: &str) -> Result<&[i64], FeatureError> {
        match self.column(name) {
            Some(Column::Int64(v)) => Ok(v),
            Some(Column::Float64(_)) => Err(FeatureError::InvalidColumnType {
                column: name.to_string(),
                expected: "Int64",
            }),
            None => Err(FeatureError::MissingColumn(name.to_string())),
        }
    }

    /// Materializes a new frame containing the given rows, in order.
    ///
    /// # Panics
    /// Panics when an index is out of bounds.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> FeatureFrame {
        let columns = self
            .columns
            .iter()
            .map(|(name, col)| (name.clone(), col.select(indices)))
            .collect();
        FeatureFrame {
            len: indices.len(),
            columns,
        }
    }

    /// Returns a copy of the frame with rows sorted ascending by an
    /// Int64 key column.
    ///
    /// # Errors
    /// - [`FeatureError::MissingColumn`] / [`FeatureError::InvalidColumnType`]
    ///   when the key column is absent or not Int64.
    pub fn sorted_by_i64(&self, key: &str) -> Result<FeatureFrame, FeatureError> {
        let keys = self.i64s(key)?;
        let mut order: Vec<usize> = (0..self.len).collect();
        order.sort_by_key(|&i| keys[i]);
        Ok(self.select_rows(&order))
    }

    /// Concatenates frames sharing an identical schema, in order.
    ///
    /// # Errors
    /// - [`FeatureError::SchemaMismatch`] when column names or types differ.
    pub fn concat(frames: &[FeatureFrame]) -> Result<FeatureFrame, FeatureError> {
        let Some(first) = frames.first() else {
            return Ok(FeatureFrame::new(0));
        };

        let mut out = first.clone();
        for frame in &frames[1..] {
            if frame.names() != first.names() {
                return Err(FeatureError::SchemaMismatch(format!(
                    "column names differ: {:?} vs {:?}",
                    first.names(),
                    frame.names()
                )));
            }
            for ((_, dst), (name, src)) in out.columns.iter_mut().zip(frame.columns.iter()) {
                match (dst, src) {
                    (Column::Float64(d), Column::Float64(s)) => d.extend_from_slice(s),
                    (Column::Int64(d), Column::Int64(s)) => d.extend_from_slice(s),
                    _ => {
                        return Err(FeatureError::SchemaMismatch(format!(
                            "column {name} changes type between frames"
                        )));
                    }
                }
            }
            out.len += frame.len;
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> FeatureFrame {
        let mut frame = FeatureFrame::new(3);
        frame.push_i64("ts", vec![30, 10, 20]).unwrap();
        frame
            .push_f64("close", vec![3.0, 1.0, f64::NAN])
            .unwrap();
        frame
    }

    #[test]
    fn test_push_and_typed_access() {
        let frame = sample_frame();
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.num_columns(), 2);
        assert_eq!(frame.i64s("ts").unwrap(), &[30, 10, 20]);
        assert!(frame.f64s("close").unwrap()[2].is_nan());
    }

    #[test]
    fn test_push_rejects_duplicate() {
        let mut frame = sample_frame();
        let err = frame.push_f64("close", vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, FeatureError::DuplicateColumn(_)));
    }

    #[test]
    fn test_push_rejects_length_mismatch() {
        let mut frame = sample_frame();
        let err = frame.push_f64("open", vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, FeatureError::LengthMismatch { .. }));
    }

    #[test]
    fn test_typed_access_rejects_wrong_type() {
        let frame = sample_frame();
        assert!(matches!(
            frame.f64s("ts"),
            Err(FeatureError::InvalidColumnType { .. })
        ));
        assert!(matches!(
            frame.i64s("missing"),
            Err(FeatureError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_select_rows() {
        let frame = sample_frame();
        let selected = frame.select_rows(&[2, 0]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.i64s("ts").unwrap(), &[20, 30]);
        assert!(selected.f64s("close").unwrap()[0].is_nan());
    }

    #[test]
    fn test_sorted_by_i64() {
        let frame = sample_frame();
        let sorted = frame.sorted_by_i64("ts").unwrap();
        assert_eq!(sorted.i64s("ts").unwrap(), &[10, 20, 30]);
        assert!((sorted.f64s("close").unwrap()[0] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = sample_frame();
        let b = sample_frame();
        let merged = FeatureFrame::concat(&[a, b]).unwrap();
        assert_eq!(merged.len(), 6);
        assert_eq!(merged.i64s("ts").unwrap(), &[30, 10, 20, 30, 10, 20]);
    }

    #[test]
    fn test_concat_rejects_schema_mismatch() {
        let a = sample_frame();
        let mut b = FeatureFrame::new(1);
        b.push_i64("other", vec![1]).unwrap();
        let err = FeatureFrame::concat(&[a, b]).unwrap_err();
        assert!(matches!(err, FeatureError::SchemaMismatch(_)));
    }

    #[test]
    fn test_concat_empty_input() {
        let merged = FeatureFrame::concat(&[]).unwrap();
        assert!(merged.is_empty());
        assert_eq!(merged.num_columns(), 0);
    }
}
