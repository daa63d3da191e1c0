//! Variable-size matrices over mixed-kind elements.

use crate::element::Element;
use crate::error::Error;
use crate::kind::{Kind, KindSet};
use crate::tags::TagArray;
use crate::vector::Vector;

/// A 2-D grid of mixed-kind elements, stored row-major.
///
/// Carries the same packed per-element tags and [`KindSet`] summary as
/// [`Vector`], with tags laid out over the row-major element order. A valid
/// matrix always has at least one row and one column.
///
/// Cloning produces an independent container shell with shared nested
/// elements, exactly as for [`Vector`].
///
/// # Example
///
/// ```
/// use mixtensors::Matrix;
///
/// let m = Matrix::from_numbers(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(m.determinant().unwrap(), -2.0);
/// assert_eq!(m.transpose().number(0, 1).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    elements: Vec<Element>,
    rows: usize,
    cols: usize,
    tags: TagArray,
    summary: KindSet,
}

impl Matrix {
    fn validate_grid<T>(grid: &[Vec<T>]) -> Result<(usize, usize), Error> {
        let rows = grid.len();
        if rows == 0 {
            return Err(Error::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let cols = grid[0].len();
        if cols == 0 {
            return Err(Error::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        for row in grid {
            if row.len() != cols {
                return Err(Error::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
        }
        Ok((rows, cols))
    }

    fn same_kind(grid: Vec<Vec<Element>>, kind: Kind) -> Result<Self, Error> {
        let (rows, cols) = Self::validate_grid(&grid)?;
        let elements: Vec<Element> = grid.into_iter().flatten().collect();
        let mut tags = TagArray::new(elements.len());
        for index in 0..elements.len() {
            tags.encode(index, kind).expect("tag index within bounds");
        }
        Ok(Self {
            elements,
            rows,
            cols,
            tags,
            summary: KindSet::of(kind),
        })
    }

    /// Matrix of numbers from a rectangular grid of rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] for an empty or ragged grid.
    pub fn from_numbers(grid: Vec<Vec<f64>>) -> Result<Self, Error> {
        Self::same_kind(
            grid.into_iter()
                .map(|row| row.into_iter().map(Element::Number).collect())
                .collect(),
            Kind::Number,
        )
    }

    /// Matrix of nested vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] for an empty or ragged grid.
    pub fn from_vectors(grid: Vec<Vec<Vector>>) -> Result<Self, Error> {
        Self::same_kind(
            grid.into_iter()
                .map(|row| row.into_iter().map(Element::from).collect())
                .collect(),
            Kind::Vector,
        )
    }

    /// Matrix of nested matrices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] for an empty or ragged grid.
    pub fn from_matrices(grid: Vec<Vec<Matrix>>) -> Result<Self, Error> {
        Self::same_kind(
            grid.into_iter()
                .map(|row| row.into_iter().map(Element::from).collect())
                .collect(),
            Kind::Matrix,
        )
    }

    /// Mixed grid with the kind of each element inferred at construction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] for an empty or ragged grid.
    pub fn from_elements(grid: Vec<Vec<Element>>) -> Result<Self, Error> {
        let (rows, cols) = Self::validate_grid(&grid)?;
        let elements: Vec<Element> = grid.into_iter().flatten().collect();
        let tags = TagArray::from_kinds(elements.iter().map(Element::kind));
        let summary = tags.summary();
        Ok(Self {
            elements,
            rows,
            cols,
            tags,
            summary,
        })
    }

    /// Trusted fast path over row-major elements with precomputed tags and
    /// summary. No inference and no validation beyond length agreement.
    ///
    /// # Panics
    ///
    /// Panics if `elements.len()` disagrees with `rows * cols` or with
    /// `tags.len()`.
    pub fn from_raw_parts(
        elements: Vec<Element>,
        rows: usize,
        cols: usize,
        tags: TagArray,
        summary: KindSet,
    ) -> Self {
        assert_eq!(
            elements.len(),
            rows * cols,
            "element count must match dimensions"
        );
        assert_eq!(
            elements.len(),
            tags.len(),
            "element and tag lengths must agree"
        );
        Self {
            elements,
            rows,
            cols,
            tags,
            summary,
        }
    }

    /// Number-kind zero matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when either dimension is zero.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, Error> {
        Self::from_numbers(vec![vec![0.0; cols]; rows])
    }

    /// Number-kind identity matrix of size `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when `n` is zero.
    pub fn identity(n: usize) -> Result<Self, Error> {
        let mut out = Self::zeros(n, n)?;
        for i in 0..n {
            out.set(i, i, 1.0)?;
        }
        Ok(out)
    }

    /// Row and column counts.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Summary of the kinds present anywhere in the matrix.
    #[inline]
    pub fn kinds(&self) -> KindSet {
        self.summary
    }

    /// The packed per-element kind tags, in row-major order.
    #[inline]
    pub fn tags(&self) -> &TagArray {
        &self.tags
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, Error> {
        if row >= self.rows {
            return Err(Error::IndexOutOfRange {
                index: row,
                extent: self.rows,
            });
        }
        if col >= self.cols {
            return Err(Error::IndexOutOfRange {
                index: col,
                extent: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// The element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] for either index out of range.
    pub fn get(&self, row: usize, col: usize) -> Result<&Element, Error> {
        let offset = self.offset(row, col)?;
        Ok(&self.elements[offset])
    }

    /// The numeric value at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] for a bad index and
    /// [`Error::Unsupported`] when the element is not a number.
    pub fn number(&self, row: usize, col: usize) -> Result<f64, Error> {
        match self.get(row, col)? {
            Element::Number(value) => Ok(*value),
            other => Err(Error::Unsupported {
                op: "number",
                reason: format!("element ({row}, {col}) is a {}", other.kind()),
            }),
        }
    }

    /// Replace the element at `(row, col)`, refreshing its tag and the
    /// summary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] for either index out of range.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<Element>) -> Result<(), Error> {
        let offset = self.offset(row, col)?;
        let value = value.into();
        self.tags.encode(offset, value.kind())?;
        self.elements[offset] = value;
        // the replaced element may have been the last of its kind
        self.summary = self.tags.summary();
        Ok(())
    }

    /// Extract column `col` as a column vector.
    ///
    /// Element handles and tags are copied, never aliased.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `col` is out of range.
    pub fn column(&self, col: usize) -> Result<Vector, Error> {
        if col >= self.cols {
            return Err(Error::IndexOutOfRange {
                index: col,
                extent: self.cols,
            });
        }
        let mut tags = TagArray::new(self.rows);
        let mut elements = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let offset = row * self.cols + col;
            tags.encode(row, self.tags.decode(offset)?)
                .expect("tag index within bounds");
            elements.push(self.elements[offset].clone());
        }
        let summary = tags.summary();
        Ok(Vector::from_raw_parts(elements, tags, summary, true))
    }

    /// Element transpose: `transpose()[i, j] == self[j, i]`.
    pub fn transpose(&self) -> Matrix {
        let mut elements = Vec::with_capacity(self.elements.len());
        let mut tags = TagArray::new(self.elements.len());
        let mut index = 0;
        for col in 0..self.cols {
            for row in 0..self.rows {
                let offset = row * self.cols + col;
                elements.push(self.elements[offset].clone());
                tags.encode(index, self.tags.decode(offset).expect("offset within tag array"))
                    .expect("tag index within bounds");
                index += 1;
            }
        }
        Self {
            elements,
            rows: self.cols,
            cols: self.rows,
            tags,
            summary: self.summary,
        }
    }

    /// Frobenius norm, `sqrt(sum(x_ij^2))`. Purely numeric matrices only;
    /// rejects nested kinds just as [`Vector::norm`] does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] unless the summary is exactly
    /// [`Kind::Number`].
    pub fn norm(&self) -> Result<f64, Error> {
        if self.summary.only() != Some(Kind::Number) {
            return Err(self.summary.unsupported("norm"));
        }
        let sum: f64 = self.numbers().map(|x| x * x).sum();
        Ok(sum.sqrt())
    }

    /// Unit-norm version of a numeric matrix, or the per-element recursive
    /// normalization of a matrix of vectors / matrix of matrices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroNorm`] for a numeric matrix of norm zero and
    /// [`Error::Unsupported`] for mixed containers.
    pub fn normalized(&self) -> Result<Matrix, Error> {
        match self.summary.only() {
            Some(Kind::Number) => {
                let norm = self.norm()?;
                if norm == 0.0 {
                    return Err(Error::ZeroNorm);
                }
                let elements = self.numbers().map(|x| Element::Number(x / norm)).collect();
                Ok(Self::from_raw_parts(
                    elements,
                    self.rows,
                    self.cols,
                    self.tags.clone(),
                    self.summary,
                ))
            }
            Some(Kind::Vector) | Some(Kind::Matrix) => {
                let elements = self
                    .elements
                    .iter()
                    .map(Element::normalized)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::from_raw_parts(
                    elements,
                    self.rows,
                    self.cols,
                    self.tags.clone(),
                    self.summary,
                ))
            }
            _ => Err(self.summary.unsupported("normalize")),
        }
    }

    fn zip_with(
        &self,
        other: &Matrix,
        combine: impl Fn(&Element, &Element) -> Result<Element, Error>,
    ) -> Result<Matrix, Error> {
        let rows = self.rows.min(other.rows);
        let cols = self.cols.min(other.cols);
        let mut out = if self.rows * self.cols >= other.rows * other.cols {
            self.clone()
        } else {
            other.clone()
        };
        for row in 0..rows {
            for col in 0..cols {
                let combined = combine(self.get(row, col)?, other.get(row, col)?)?;
                out.set(row, col, combined)?;
            }
        }
        Ok(out)
    }

    /// Element-wise sum.
    ///
    /// Dimensions need not match: the operand covering more cells supplies
    /// the result's dimensions and its cells outside the overlapping
    /// `min(rows) x min(cols)` block (ties favor `self`); the overlap is
    /// combined element-wise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when overlapping elements are of
    /// different kinds.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, Error> {
        self.zip_with(other, |a, b| a.checked_add(b))
    }

    /// Element-wise difference under the same dimension policy as
    /// [`Matrix::add`]; carried cells of the dominant operand stay
    /// unmodified even when that operand is `other`.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix, Error> {
        self.zip_with(other, |a, b| a.checked_sub(b))
    }

    /// Multiply every element by `scalar`, recursing into nested containers.
    pub fn scale(&self, scalar: f64) -> Matrix {
        let elements = self.elements.iter().map(|el| el.scale(scalar)).collect();
        Self::from_raw_parts(
            elements,
            self.rows,
            self.cols,
            self.tags.clone(),
            self.summary,
        )
    }

    /// Standard matrix product `C[i, j] = sum_k self[i, k] * other[k, j]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] unless both operands are purely
    /// numeric, and [`Error::DimensionMismatch`] when the inner dimensions
    /// disagree.
    ///
    /// # Example
    ///
    /// ```
    /// use mixtensors::Matrix;
    ///
    /// let a = Matrix::zeros(2, 3).unwrap();
    /// let b = Matrix::zeros(3, 5).unwrap();
    /// assert_eq!(a.matmul(&b).unwrap().dimensions(), (2, 5));
    /// ```
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, Error> {
        if self.summary.only() != Some(Kind::Number) {
            return Err(self.summary.unsupported("matmul"));
        }
        if other.summary.only() != Some(Kind::Number) {
            return Err(other.summary.unsupported("matmul"));
        }
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch {
                expected: self.cols,
                actual: other.rows,
            });
        }
        let mut grid = Vec::with_capacity(self.rows);
        for i in 0..self.rows {
            let mut row = Vec::with_capacity(other.cols);
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.number_at(i * self.cols + k) * other.number_at(k * other.cols + j);
                }
                row.push(sum);
            }
            grid.push(row);
        }
        Self::from_numbers(grid)
    }

    /// Determinant of a square numeric matrix.
    ///
    /// Closed forms for 1x1 and 2x2, first-row cofactor expansion with
    /// recursive minors above that.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSquare`] for a non-square matrix and
    /// [`Error::Unsupported`] unless the summary is exactly
    /// [`Kind::Number`].
    pub fn determinant(&self) -> Result<f64, Error> {
        if self.rows != self.cols {
            return Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.summary.only() != Some(Kind::Number) {
            return Err(self.summary.unsupported("determinant"));
        }
        Ok(self.det_numbers())
    }

    fn det_numbers(&self) -> f64 {
        match self.rows {
            1 => self.number_at(0),
            2 => self.number_at(0) * self.number_at(3) - self.number_at(1) * self.number_at(2),
            n => {
                let mut det = 0.0;
                for col in 0..n {
                    let cofactor = self.minor(0, col).det_numbers();
                    let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                    det += sign * self.number_at(col) * cofactor;
                }
                det
            }
        }
    }

    /// The submatrix with `row` and `col` removed.
    fn minor(&self, row: usize, col: usize) -> Matrix {
        let n = self.rows;
        let mut grid = Vec::with_capacity(n - 1);
        for i in (0..n).filter(|&i| i != row) {
            let mut minor_row = Vec::with_capacity(n - 1);
            for j in (0..n).filter(|&j| j != col) {
                minor_row.push(self.number_at(i * self.cols + j));
            }
            grid.push(minor_row);
        }
        Self::from_numbers(grid).expect("minor of a square matrix is well-formed")
    }

    fn number_at(&self, offset: usize) -> f64 {
        self.elements[offset]
            .as_number()
            .expect("summary says all elements are numbers")
    }

    fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.elements
            .iter()
            .map(|el| el.as_number().expect("summary says all elements are numbers"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Matrix {
        Matrix::from_numbers(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap()
    }

    #[test]
    fn test_construction_validation() {
        assert!(Matrix::from_numbers(vec![]).is_err());
        assert!(Matrix::from_numbers(vec![vec![]]).is_err());
        assert!(matches!(
            Matrix::from_numbers(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_get_set_and_bounds() {
        let mut m = sample();
        assert_eq!(m.number(1, 0).unwrap(), 3.0);
        assert!(matches!(
            m.get(2, 0),
            Err(Error::IndexOutOfRange { index: 2, extent: 2 })
        ));
        assert!(m.get(0, 2).is_err());

        m.set(0, 1, 9.0).unwrap();
        assert_eq!(m.number(0, 1).unwrap(), 9.0);
        assert!(m.set(0, 5, 1.0).is_err());
    }

    #[test]
    fn test_set_refreshes_summary() {
        let mut m = sample();
        m.set(0, 0, Vector::zeros(2)).unwrap();
        assert!(m.kinds().is_mixed());
        assert_eq!(m.tags().decode(0).unwrap(), Kind::Vector);
        m.set(0, 0, 1.0).unwrap();
        assert_eq!(m.kinds().only(), Some(Kind::Number));
    }

    #[test]
    fn test_clone_is_independent_shell() {
        let original = sample();
        let mut copy = original.clone();
        copy.set(1, 1, 40.0).unwrap();
        assert_eq!(original.number(1, 1).unwrap(), 4.0);
        assert_eq!(copy.number(1, 1).unwrap(), 40.0);
    }

    #[test]
    fn test_column_extraction() {
        let m = Matrix::from_numbers(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let col = m.column(1).unwrap();
        assert_eq!(col.dimension(), 2);
        assert!(col.is_transposed());
        assert_eq!(col.number(0).unwrap(), 2.0);
        assert_eq!(col.number(1).unwrap(), 5.0);
        assert!(m.column(3).is_err());

        // round-trips back to a 2x1 column matrix
        assert_eq!(col.to_matrix().unwrap().dimensions(), (2, 1));
    }

    #[test]
    fn test_transpose_cells_and_involution() {
        let m = Matrix::from_numbers(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t.dimensions(), (3, 2));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t.get(j, i).unwrap(), m.get(i, j).unwrap());
            }
        }
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_norm_and_normalized() {
        let m = Matrix::from_numbers(vec![vec![3.0], vec![4.0]]).unwrap();
        assert_eq!(m.norm().unwrap(), 5.0);
        let n = m.normalized().unwrap();
        assert_relative_eq!(n.norm().unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(Matrix::zeros(2, 2).unwrap().normalized(), Err(Error::ZeroNorm));
    }

    #[test]
    fn test_normalized_recurses_into_matrices() {
        let inner = Matrix::from_numbers(vec![vec![3.0, 4.0]]).unwrap();
        let m = Matrix::from_matrices(vec![vec![inner]]).unwrap();
        let n = m.normalized().unwrap();
        let nested = n.get(0, 0).unwrap().as_matrix().unwrap().clone();
        assert_relative_eq!(nested.number(0, 0).unwrap(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_add_identity_and_sub() {
        let m = sample();
        assert_eq!(m.add(&Matrix::zeros(2, 2).unwrap()).unwrap(), m);
        let diff = m.sub(&m).unwrap();
        assert_eq!(diff, Matrix::zeros(2, 2).unwrap());
    }

    #[test]
    fn test_add_dominant_operand_supplies_shape() {
        let small = Matrix::from_numbers(vec![vec![1.0]]).unwrap();
        let big = sample();
        let sum = small.add(&big).unwrap();
        assert_eq!(sum.dimensions(), (2, 2));
        assert_eq!(sum.number(0, 0).unwrap(), 2.0);
        // cells outside the overlap come from the dominant operand
        assert_eq!(sum.number(1, 1).unwrap(), 4.0);
    }

    #[test]
    fn test_scale_recurses() {
        let m = Matrix::from_vectors(vec![vec![Vector::from_numbers([1.0, 2.0])]]).unwrap();
        let scaled = m.scale(2.0);
        let inner = scaled.get(0, 0).unwrap().as_vector().unwrap().clone();
        assert_eq!(inner.number(1).unwrap(), 4.0);
    }

    #[test]
    fn test_matmul() {
        let a = Matrix::from_numbers(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_numbers(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.number(0, 0).unwrap(), 19.0);
        assert_eq!(c.number(0, 1).unwrap(), 22.0);
        assert_eq!(c.number(1, 0).unwrap(), 43.0);
        assert_eq!(c.number(1, 1).unwrap(), 50.0);
    }

    #[test]
    fn test_matmul_shape_and_mismatch() {
        let a = Matrix::zeros(4, 3).unwrap();
        let b = Matrix::zeros(3, 2).unwrap();
        assert_eq!(a.matmul(&b).unwrap().dimensions(), (4, 2));
        assert!(matches!(
            b.matmul(&a),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_determinant() {
        assert_eq!(sample().determinant().unwrap(), -2.0);
        assert_eq!(Matrix::identity(4).unwrap().determinant().unwrap(), 1.0);

        let m = Matrix::from_numbers(vec![
            vec![2.0, 0.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap();
        // cofactor expansion: 2*(3-2) - 0 + 1*(1-3) = 0
        assert_eq!(m.determinant().unwrap(), 0.0);
    }

    #[test]
    fn test_determinant_errors() {
        let rect = Matrix::zeros(2, 3).unwrap();
        assert!(matches!(
            rect.determinant(),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        ));
        let nested = Matrix::from_vectors(vec![vec![Vector::zeros(1)]]).unwrap();
        assert!(matches!(nested.determinant(), Err(Error::Unsupported { .. })));
    }
}
