//! Variable-dimension vectors over mixed-kind elements.

use crate::element::Element;
use crate::error::Error;
use crate::kind::{Kind, KindSet};
use crate::matrix::Matrix;
use crate::tags::TagArray;

/// An ordered, index-addressable sequence of mixed-kind elements.
///
/// Every element carries a 2-bit kind tag in a packed side array, and the
/// container keeps a [`KindSet`] summary of the kinds present anywhere in it.
/// Operations branch on the summary first and consult per-element tags only
/// for genuinely mixed containers.
///
/// The transposition flag is a label consumed by [`Vector::to_matrix`]
/// (row vector vs column vector); it does not affect indexing or dimension.
///
/// Cloning produces an independent container shell: the tag array is copied
/// and nested vector/matrix elements are shared by handle, so mutating the
/// clone through [`Vector::set`] is never observed by the original.
///
/// # Example
///
/// ```
/// use mixtensors::Vector;
///
/// let v = Vector::from_numbers([3.0, 4.0]);
/// assert_eq!(v.dimension(), 2);
/// assert_eq!(v.norm().unwrap(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    elements: Vec<Element>,
    tags: TagArray,
    summary: KindSet,
    transposed: bool,
}

impl Vector {
    fn same_kind(elements: Vec<Element>, kind: Kind) -> Self {
        let mut tags = TagArray::new(elements.len());
        for index in 0..elements.len() {
            tags.encode(index, kind).expect("tag index within bounds");
        }
        let summary = if elements.is_empty() {
            KindSet::EMPTY
        } else {
            KindSet::of(kind)
        };
        Self {
            elements,
            tags,
            summary,
            transposed: false,
        }
    }

    /// Vector of numbers.
    pub fn from_numbers<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self::same_kind(
            values.into_iter().map(Element::Number).collect(),
            Kind::Number,
        )
    }

    /// Vector of nested vectors.
    pub fn from_vectors<I: IntoIterator<Item = Vector>>(values: I) -> Self {
        Self::same_kind(
            values.into_iter().map(Element::from).collect(),
            Kind::Vector,
        )
    }

    /// Vector of nested matrices.
    pub fn from_matrices<I: IntoIterator<Item = Matrix>>(values: I) -> Self {
        Self::same_kind(
            values.into_iter().map(Element::from).collect(),
            Kind::Matrix,
        )
    }

    /// Concatenation of numbers, vectors and matrices, in that order.
    ///
    /// Tags follow the concatenation order and the summary accumulates the
    /// kinds of the non-empty parts.
    pub fn from_parts(numbers: Vec<f64>, vectors: Vec<Vector>, matrices: Vec<Matrix>) -> Self {
        let total = numbers.len() + vectors.len() + matrices.len();
        let mut tags = TagArray::new(total);
        let mut summary = KindSet::EMPTY;
        let mut index = 0;
        for (count, kind) in [
            (numbers.len(), Kind::Number),
            (vectors.len(), Kind::Vector),
            (matrices.len(), Kind::Matrix),
        ] {
            if count > 0 {
                summary.insert(kind);
            }
            for _ in 0..count {
                tags.encode(index, kind).expect("tag index within bounds");
                index += 1;
            }
        }
        let mut elements = Vec::with_capacity(total);
        elements.extend(numbers.into_iter().map(Element::Number));
        elements.extend(vectors.into_iter().map(Element::from));
        elements.extend(matrices.into_iter().map(Element::from));
        Self {
            elements,
            tags,
            summary,
            transposed: false,
        }
    }

    /// Mixed elements with the kind of each inferred at construction.
    ///
    /// This is the only entry point that inspects elements to derive tags;
    /// every other constructor takes the kind as given.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let tags = TagArray::from_kinds(elements.iter().map(Element::kind));
        let summary = tags.summary();
        Self {
            elements,
            tags,
            summary,
            transposed: false,
        }
    }

    /// Trusted fast path: raw elements with precomputed tags and summary.
    ///
    /// No inference and no validation beyond length agreement.
    ///
    /// # Panics
    ///
    /// Panics if `tags.len() != elements.len()`.
    pub fn from_raw_parts(
        elements: Vec<Element>,
        tags: TagArray,
        summary: KindSet,
        transposed: bool,
    ) -> Self {
        assert_eq!(
            elements.len(),
            tags.len(),
            "element and tag lengths must agree"
        );
        Self {
            elements,
            tags,
            summary,
            transposed,
        }
    }

    /// Number-kind zero vector.
    pub fn zeros(dimension: usize) -> Self {
        Self::from_numbers(vec![0.0; dimension])
    }

    /// Number of elements.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.elements.len()
    }

    /// Summary of the kinds present anywhere in the vector.
    #[inline]
    pub fn kinds(&self) -> KindSet {
        self.summary
    }

    /// The packed per-element kind tags.
    #[inline]
    pub fn tags(&self) -> &TagArray {
        &self.tags
    }

    /// Whether this vector is labeled as a column vector.
    #[inline]
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// The element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= dimension`.
    pub fn get(&self, index: usize) -> Result<&Element, Error> {
        self.elements.get(index).ok_or(Error::IndexOutOfRange {
            index,
            extent: self.elements.len(),
        })
    }

    /// The numeric value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] for a bad index and
    /// [`Error::Unsupported`] when the element is not a number.
    pub fn number(&self, index: usize) -> Result<f64, Error> {
        match self.get(index)? {
            Element::Number(value) => Ok(*value),
            other => Err(Error::Unsupported {
                op: "number",
                reason: format!("element {index} is a {}", other.kind()),
            }),
        }
    }

    /// Replace the element at `index`, refreshing its tag and the summary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= dimension`.
    pub fn set(&mut self, index: usize, value: impl Into<Element>) -> Result<(), Error> {
        if index >= self.elements.len() {
            return Err(Error::IndexOutOfRange {
                index,
                extent: self.elements.len(),
            });
        }
        let value = value.into();
        self.tags.encode(index, value.kind())?;
        self.elements[index] = value;
        // the replaced element may have been the last of its kind
        self.summary = self.tags.summary();
        Ok(())
    }

    /// Same elements and tags with the orientation flag inverted.
    ///
    /// Applying this twice restores the original vector exactly.
    pub fn transpose(&self) -> Vector {
        let mut out = self.clone();
        out.transposed = !out.transposed;
        out
    }

    /// Materialize as a single-row matrix, or a single-column matrix when
    /// transposed. Element handles and tags are copied, never aliased.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] for a dimension-0 vector (matrices
    /// have at least one row and column).
    pub fn to_matrix(&self) -> Result<Matrix, Error> {
        if self.elements.is_empty() {
            return Err(self.summary.unsupported("to_matrix"));
        }
        let (rows, cols) = if self.transposed {
            (self.elements.len(), 1)
        } else {
            (1, self.elements.len())
        };
        Ok(Matrix::from_raw_parts(
            self.elements.clone(),
            rows,
            cols,
            self.tags.clone(),
            self.summary,
        ))
    }

    /// Euclidean norm, `sqrt(sum(x_i^2))`. Purely numeric vectors only.
    ///
    /// Vectors of nested containers are rejected; [`Vector::normalized`],
    /// by contrast, does recurse into them.
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

    /// Unit-norm version of a numeric vector, or the per-element recursive
    /// normalization of a vector of vectors / vector of matrices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroNorm`] for a numeric vector of norm zero and
    /// [`Error::Unsupported`] for mixed or empty containers.
    pub fn normalized(&self) -> Result<Vector, Error> {
        match self.summary.only() {
            Some(Kind::Number) => {
                let norm = self.norm()?;
                if norm == 0.0 {
                    return Err(Error::ZeroNorm);
                }
                let elements = self.numbers().map(|x| Element::Number(x / norm)).collect();
                Ok(Self::from_raw_parts(
                    elements,
                    self.tags.clone(),
                    self.summary,
                    self.transposed,
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
                    self.tags.clone(),
                    self.summary,
                    self.transposed,
                ))
            }
            _ => Err(self.summary.unsupported("normalize")),
        }
    }

    fn zip_with(
        &self,
        other: &Vector,
        combine: impl Fn(&Element, &Element) -> Result<Element, Error>,
    ) -> Result<Vector, Error> {
        let overlap = self.dimension().min(other.dimension());
        let mut out = if self.dimension() >= other.dimension() {
            self.clone()
        } else {
            other.clone()
        };
        for index in 0..overlap {
            let combined = combine(&self.elements[index], &other.elements[index])?;
            out.set(index, combined)?;
        }
        Ok(out)
    }

    /// Element-wise sum.
    ///
    /// Dimensions need not match: the longer operand supplies the result's
    /// dimension and its trailing elements, and only the overlapping prefix
    /// is combined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when overlapping elements are of
    /// different kinds.
    ///
    /// # Example
    ///
    /// ```
    /// use mixtensors::Vector;
    ///
    /// let a = Vector::from_numbers([1.0, 2.0]);
    /// let b = Vector::from_numbers([10.0, 20.0, 30.0]);
    /// let sum = a.add(&b).unwrap();
    /// assert_eq!(sum.dimension(), 3);
    /// assert_eq!(sum.number(0).unwrap(), 11.0);
    /// assert_eq!(sum.number(2).unwrap(), 30.0);
    /// ```
    pub fn add(&self, other: &Vector) -> Result<Vector, Error> {
        self.zip_with(other, |a, b| a.checked_add(b))
    }

    /// Element-wise difference under the same dimension policy as
    /// [`Vector::add`]; the longer operand's tail is carried through
    /// unmodified, even when that operand is `other`.
    pub fn sub(&self, other: &Vector) -> Result<Vector, Error> {
        self.zip_with(other, |a, b| a.checked_sub(b))
    }

    /// Multiply every element by `scalar`, recursing into nested containers.
    pub fn scale(&self, scalar: f64) -> Vector {
        let elements = self.elements.iter().map(|el| el.scale(scalar)).collect();
        Self::from_raw_parts(elements, self.tags.clone(), self.summary, self.transposed)
    }

    /// Dot product over the overlapping prefix of two numeric vectors.
    ///
    /// Equal dimension is not enforced, mirroring the [`Vector::add`]
    /// policy: positions past the shorter operand contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] unless both summaries are exactly
    /// [`Kind::Number`].
    pub fn dot(&self, other: &Vector) -> Result<f64, Error> {
        if self.summary.only() != Some(Kind::Number) {
            return Err(self.summary.unsupported("dot"));
        }
        if other.summary.only() != Some(Kind::Number) {
            return Err(other.summary.unsupported("dot"));
        }
        let overlap = self.dimension().min(other.dimension());
        let mut sum = 0.0;
        for index in 0..overlap {
            sum += self.number_at(index) * other.number_at(index);
        }
        Ok(sum)
    }

    /// Cross product of numeric vectors of dimension at most 3.
    ///
    /// Operands shorter than 3 are zero-padded before the standard 3-D
    /// formula; a dimension-0 operand on either side yields the zero
    /// 3-vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when either operand has dimension 4 or
    /// more, or when a non-empty operand is not purely numeric.
    pub fn cross(&self, other: &Vector) -> Result<Vector, Error> {
        if self.dimension() > 3 || other.dimension() > 3 {
            let actual = self.dimension().max(other.dimension());
            return Err(Error::Unsupported {
                op: "cross",
                reason: format!("cross product is only defined through dimension 3, got {actual}"),
            });
        }
        for operand in [self, other] {
            if operand.dimension() > 0 && operand.summary.only() != Some(Kind::Number) {
                return Err(operand.summary.unsupported("cross"));
            }
        }
        if self.dimension() == 0 || other.dimension() == 0 {
            return Ok(Vector::zeros(3));
        }
        let a = |i: usize| self.component(i);
        let b = |i: usize| other.component(i);
        Ok(Vector::from_numbers([
            a(1) * b(2) - a(2) * b(1),
            a(2) * b(0) - a(0) * b(2),
            a(0) * b(1) - a(1) * b(0),
        ]))
    }

    /// Numeric component with zero-padding past the end.
    fn component(&self, index: usize) -> f64 {
        self.elements
            .get(index)
            .and_then(Element::as_number)
            .unwrap_or(0.0)
    }

    fn number_at(&self, index: usize) -> f64 {
        self.elements[index]
            .as_number()
            .expect("summary says all elements are numbers")
    }

    fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.elements
            .iter()
            .map(|el| el.as_number().expect("summary says all elements are numbers"))
    }
}
