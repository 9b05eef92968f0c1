//! Runtime values produced by evaluating graded expressions.
//!
//! A value is either a bare scalar or an [`ArrayValue`] of rank >= 1.
//! Scalars are never wrapped into a rank-0 array: the distinction
//! between a scalar and a one-entry vector is load-bearing for grading.
//! A vector of length n, a single-row matrix (1, n) and a single-column
//! matrix (n, 1) are likewise three distinct values even when they hold
//! the same numbers.

use ordered_float::OrderedFloat;

/// Runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(OrderedFloat<f64>),
    Array(ArrayValue),
}

/// Immutable numeric array with explicit shape.
///
/// `data` is row-major and always has exactly `shape.iter().product()`
/// entries; every axis length is >= 1. Constructed only by the entry
/// guard or by operators, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl Value {
    pub fn scalar(x: f64) -> Self {
        Value::Scalar(OrderedFloat(x))
    }

    /// Rank-1 value; panics on an empty entry list, since every axis
    /// length must be >= 1.
    pub fn vector(data: impl Into<Vec<f64>>) -> Self {
        let data = data.into();
        assert!(!data.is_empty(), "a vector needs at least one entry");
        let len = data.len();
        Value::Array(ArrayValue::from_parts(vec![len], data))
    }

    /// Rank-2 value; panics on empty or ragged rows.
    pub fn matrix<R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: Into<Vec<f64>>,
    {
        let rows: Vec<Vec<f64>> = rows.into_iter().map(Into::into).collect();
        let m = rows.len();
        let n = rows.first().map_or(0, |r| r.len());
        assert!(m >= 1 && n >= 1, "a matrix needs at least one entry");
        assert!(
            rows.iter().all(|r| r.len() == n),
            "matrix rows must all have the same length"
        );
        let data: Vec<f64> = rows.into_iter().flatten().collect();
        Value::Array(ArrayValue::from_parts(vec![m, n], data))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(x.0),
            Value::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Scalar(_) => None,
            Value::Array(a) => Some(a),
        }
    }

    /// Bare type word: "scalar", "vector", "matrix" or "tensor".
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Array(a) => a.kind(),
        }
    }

    /// Student-facing phrase with article, e.g. "a vector of length 3".
    pub fn describe(&self) -> String {
        match self {
            Value::Scalar(_) => "a scalar".to_string(),
            Value::Array(a) => a.describe(),
        }
    }

    /// Flat view of the numeric entries (a scalar is one entry).
    pub fn entries(&self) -> Vec<f64> {
        match self {
            Value::Scalar(x) => vec![x.0],
            Value::Array(a) => a.data().to_vec(),
        }
    }

    /// Shape as seen by the comparator; empty for scalars.
    pub fn shape(&self) -> &[usize] {
        match self {
            Value::Scalar(_) => &[],
            Value::Array(a) => a.shape(),
        }
    }
}

impl ArrayValue {
    /// Build from a shape/data pair; panics when `data.len()` disagrees
    /// with the shape product, when the rank is 0 or when any axis has
    /// length 0. The entry guard is the only place raw nested input is
    /// validated with recoverable errors.
    pub(crate) fn from_parts(shape: Vec<usize>, data: Vec<f64>) -> Self {
        assert!(
            !shape.is_empty() && shape.iter().all(|&d| d >= 1),
            "array shape must have rank >= 1 with every axis >= 1"
        );
        assert_eq!(
            shape.iter().product::<usize>(),
            data.len(),
            "array data length must match its shape"
        );
        ArrayValue { shape, data }
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_vector(&self) -> bool {
        self.rank() == 1
    }

    pub fn is_matrix(&self) -> bool {
        self.rank() == 2
    }

    pub fn is_square(&self) -> bool {
        self.rank() == 2 && self.shape[0] == self.shape[1]
    }

    /// Row count of a matrix; callers check rank first.
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Column count of a matrix; callers check rank first.
    pub fn cols(&self) -> usize {
        self.shape[1]
    }

    /// Element by multi-index; `None` when the index length or any
    /// coordinate is out of range.
    pub fn get(&self, indices: &[usize]) -> Option<f64> {
        let flat = self.flatten_index(indices)?;
        self.data.get(flat).copied()
    }

    fn flatten_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        let mut stride = 1;
        for (idx, &dim) in indices.iter().zip(&self.shape).rev() {
            if *idx >= dim {
                return None;
            }
            flat += idx * stride;
            stride *= dim;
        }
        Some(flat)
    }

    /// Fresh array with the same shape and `f` applied to every entry.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> ArrayValue {
        ArrayValue::from_parts(self.shape.clone(), self.data.iter().map(|&x| f(x)).collect())
    }

    /// Fresh array combining entries pairwise; `None` on shape mismatch.
    pub fn zip_with(&self, other: &ArrayValue, f: impl Fn(f64, f64) -> f64) -> Option<ArrayValue> {
        if self.shape != other.shape {
            return None;
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Some(ArrayValue::from_parts(self.shape.clone(), data))
    }

    /// Transpose of a rank-2 array; callers check rank first.
    pub fn transpose(&self) -> ArrayValue {
        let (m, n) = (self.shape[0], self.shape[1]);
        let mut data = vec![0.0; m * n];
        for i in 0..m {
            for j in 0..n {
                data[j * m + i] = self.data[i * n + j];
            }
        }
        ArrayValue::from_parts(vec![n, m], data)
    }

    /// Sum of the main diagonal of a square matrix; callers check first.
    pub fn trace(&self) -> f64 {
        let n = self.shape[0];
        (0..n).map(|i| self.data[i * n + i]).sum()
    }

    pub fn kind(&self) -> &'static str {
        match self.rank() {
            1 => "vector",
            2 => "matrix",
            _ => "tensor",
        }
    }

    /// Student-facing phrase with article, following the descriptor
    /// convention used by every shape error message.
    pub fn describe(&self) -> String {
        match self.rank() {
            1 => format!("a vector of length {}", self.shape[0]),
            2 => format!(
                "a matrix of shape (rows: {}, cols: {})",
                self.shape[0], self.shape[1]
            ),
            _ => {
                let dims: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
                format!("a tensor of shape ({})", dims.join(", "))
            }
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Scalar(x) => write!(f, "{}", x.0),
            Value::Array(a) => write!(f, "{}", a),
        }
    }
}

impl std::fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.rank() {
            1 => {
                write!(f, "[")?;
                for (i, x) in self.data.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", x)?;
                }
                write!(f, "]")
            }
            2 => {
                let n = self.cols();
                write!(f, "[")?;
                for (i, row) in self.data.chunks(n).enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[")?;
                    for (j, x) in row.iter().enumerate() {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", x)?;
                    }
                    write!(f, "]")?;
                }
                write!(f, "]")
            }
            _ => write!(f, "<{}>", self.describe()),
        }
    }
}
