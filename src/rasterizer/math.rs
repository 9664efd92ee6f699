//! Matrix math for shape transforms
//!
//! Matrices act on column vectors: `v' = M · v`. Translation is never
//! encoded in a matrix; transforms are applied relative to a pivot instead
//! (translate to the pivot, multiply, translate back).

use std::ops::Mul;
use serde::{Serialize, Deserialize};

use super::types::Coordinates;
use crate::error::MatrixError;

/// Rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Tilt around the horizontal screen axis
    X,
    /// Tilt around the vertical screen axis
    Y,
    /// In-plane rotation
    Z,
}

/// 3x3 linear transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x3 {
    pub data: [[f64; 3]; 3],
}

impl Matrix3x3 {
    pub const IDENTITY: Matrix3x3 = Matrix3x3 {
        data: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub fn new(data: [[f64; 3]; 3]) -> Self {
        Self { data }
    }

    /// Diagonal scale (sx, sy, 1). Negative factors mirror.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation by `degrees` around `axis`
    pub fn rotation(degrees: f64, axis: Axis) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        match axis {
            Axis::X => Self::new([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]),
            Axis::Y => Self::new([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]),
            Axis::Z => Self::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]),
        }
    }

    /// Shear: x' = x + shx * y, y' = shy * x + y
    pub fn shear(shx: f64, shy: f64) -> Self {
        Self::new([[1.0, shx, 0.0], [shy, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Matrix product `self · other`.
    ///
    /// Applied to a vertex, the result performs `other` first and `self`
    /// second. Shapes compose as `incoming.compose(existing)`, so the
    /// transform added last is applied last.
    pub fn compose(&self, other: &Matrix3x3) -> Matrix3x3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for k in 0..3 {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell += self.data[i][k] * other.data[k][j];
                }
            }
        }
        Matrix3x3 { data: out }
    }

    /// Multiply a column vector
    pub fn transform(&self, v: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (i, cell) in out.iter_mut().enumerate() {
            for (k, component) in v.iter().enumerate() {
                *cell += self.data[i][k] * component;
            }
        }
        out
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix3x3 {
    type Output = Matrix3x3;
    fn mul(self, other: Matrix3x3) -> Matrix3x3 {
        self.compose(&other)
    }
}

/// Round to the nearest integer, halves away from zero.
///
/// Every float-to-screen conversion in the crate goes through here.
pub fn round_coord(v: f64) -> i32 {
    v.round() as i32
}

/// Move a pivot-relative result back into absolute coordinates
pub(crate) fn from_pivot(relative: [f64; 3], origin: Coordinates) -> Coordinates {
    Coordinates {
        x: round_coord(relative[0] + origin.x as f64),
        y: round_coord(relative[1] + origin.y as f64),
        z: round_coord(relative[2] + origin.z as f64),
    }
}

/// Transform `vertex` by `matrix` about `origin`.
/// The pivot itself is returned untouched.
pub fn apply(vertex: Coordinates, origin: Coordinates, matrix: &Matrix3x3) -> Coordinates {
    if vertex == origin {
        return vertex;
    }
    from_pivot(matrix.transform(vertex.relative_to(origin)), origin)
}

/// Row-major matrix of arbitrary shape.
///
/// Used for batched vertex transforms (a 3xN block of column vectors).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self { rows, columns, data: vec![0.0; rows * columns] }
    }

    pub fn new(rows: usize, columns: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != rows * columns {
            return Err(MatrixError::DataLength { rows, columns, len: data.len() });
        }
        Ok(Self { rows, columns, data })
    }

    /// One column per vertex: row 0 holds x, row 1 y, row 2 z
    pub fn from_columns<I: IntoIterator<Item = [f64; 3]>>(vectors: I) -> Self {
        let vectors: Vec<[f64; 3]> = vectors.into_iter().collect();
        let mut m = Self::zeros(3, vectors.len());
        for (c, v) in vectors.iter().enumerate() {
            for (r, value) in v.iter().enumerate() {
                m.set(r, c, *value);
            }
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.data[row * self.columns + column]
    }

    pub fn set(&mut self, row: usize, column: usize, value: f64) {
        self.data[row * self.columns + column] = value;
    }

    /// Column `c` of a matrix with at least three rows
    pub fn column3(&self, c: usize) -> [f64; 3] {
        [self.get(0, c), self.get(1, c), self.get(2, c)]
    }

    /// Product `self · other`.
    ///
    /// Shape mismatches are not rejected: only the first
    /// `min(self.columns, other.rows)` operands take part in each sum and the
    /// result is `self.rows x other.columns`. Use [`Matrix::checked_product`]
    /// when a mismatch should be an error.
    pub fn product(&self, other: &Matrix) -> Matrix {
        let valid = self.columns.min(other.rows);
        let mut out = Matrix::zeros(self.rows, other.columns);
        for i in 0..self.rows {
            for k in 0..valid {
                let a = self.get(i, k);
                for j in 0..other.columns {
                    out.data[i * out.columns + j] += a * other.get(k, j);
                }
            }
        }
        out
    }

    pub fn checked_product(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.columns != other.rows {
            return Err(MatrixError::DimensionMismatch {
                left: (self.rows, self.columns),
                right: (other.rows, other.columns),
            });
        }
        Ok(self.product(other))
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.columns, self.rows);
        for i in 0..out.rows {
            for j in 0..out.columns {
                out.set(i, j, self.get(j, i));
            }
        }
        out
    }
}

impl From<Matrix3x3> for Matrix {
    fn from(m: Matrix3x3) -> Self {
        Matrix {
            rows: 3,
            columns: 3,
            data: m.data.iter().flatten().copied().collect(),
        }
    }
}

impl TryFrom<&Matrix> for Matrix3x3 {
    type Error = MatrixError;

    fn try_from(m: &Matrix) -> Result<Self, Self::Error> {
        if m.rows != 3 || m.columns != 3 {
            return Err(MatrixError::NotSquare3 { rows: m.rows, columns: m.columns });
        }
        let mut data = [[0.0; 3]; 3];
        for (i, row) in data.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = m.get(i, j);
            }
        }
        Ok(Matrix3x3 { data })
    }
}
