//! Container elements and the algebra dispatch shared by vectors and matrices.

use std::sync::Arc;

use crate::error::Error;
use crate::kind::Kind;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// A single container slot: a number, a nested vector, or a nested matrix.
///
/// Nested containers sit behind [`Arc`] so a shallow container copy shares
/// them instead of cloning their storage; replacing a slot through `set`
/// swaps the handle without touching the other owner.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Number(f64),
    Vector(Arc<Vector>),
    Matrix(Arc<Matrix>),
}

impl Element {
    /// The kind tag describing this element.
    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Element::Number(_) => Kind::Number,
            Element::Vector(_) => Kind::Vector,
            Element::Matrix(_) => Kind::Matrix,
        }
    }

    /// The numeric value, if this element is a number.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Element::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The nested vector, if this element is one.
    #[inline]
    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Element::Vector(vector) => Some(vector),
            _ => None,
        }
    }

    /// The nested matrix, if this element is one.
    #[inline]
    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Element::Matrix(matrix) => Some(matrix),
            _ => None,
        }
    }

    fn mismatch(op: &'static str, lhs: &Element, rhs: &Element) -> Error {
        Error::Unsupported {
            op,
            reason: format!("cannot combine a {} with a {}", lhs.kind(), rhs.kind()),
        }
    }

    /// Element-wise sum, recursing into nested containers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when the operands are of different
    /// kinds, and propagates failures from nested containers.
    pub fn checked_add(&self, other: &Element) -> Result<Element, Error> {
        match (self, other) {
            (Element::Number(a), Element::Number(b)) => Ok(Element::Number(a + b)),
            (Element::Vector(a), Element::Vector(b)) => Ok(Element::Vector(Arc::new(a.add(b)?))),
            (Element::Matrix(a), Element::Matrix(b)) => Ok(Element::Matrix(Arc::new(a.add(b)?))),
            (a, b) => Err(Self::mismatch("add", a, b)),
        }
    }

    /// Element-wise difference, recursing into nested containers.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Element::checked_add`].
    pub fn checked_sub(&self, other: &Element) -> Result<Element, Error> {
        match (self, other) {
            (Element::Number(a), Element::Number(b)) => Ok(Element::Number(a - b)),
            (Element::Vector(a), Element::Vector(b)) => Ok(Element::Vector(Arc::new(a.sub(b)?))),
            (Element::Matrix(a), Element::Matrix(b)) => Ok(Element::Matrix(Arc::new(a.sub(b)?))),
            (a, b) => Err(Self::mismatch("sub", a, b)),
        }
    }

    /// Multiply by a scalar, recursing into nested containers.
    pub fn scale(&self, scalar: f64) -> Element {
        match self {
            Element::Number(value) => Element::Number(value * scalar),
            Element::Vector(vector) => Element::Vector(Arc::new(vector.scale(scalar))),
            Element::Matrix(matrix) => Element::Matrix(Arc::new(matrix.scale(scalar))),
        }
    }

    /// Normalize a nested container element.
    ///
    /// Number elements have no element-level normal form; purely numeric
    /// containers are normalized by the container against its own norm.
    pub fn normalized(&self) -> Result<Element, Error> {
        match self {
            Element::Number(_) => Err(Error::Unsupported {
                op: "normalize",
                reason: "a bare number has no element-level normal form".to_string(),
            }),
            Element::Vector(vector) => Ok(Element::Vector(Arc::new(vector.normalized()?))),
            Element::Matrix(matrix) => Ok(Element::Matrix(Arc::new(matrix.normalized()?))),
        }
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Element::Number(value)
    }
}

impl From<Vector> for Element {
    fn from(vector: Vector) -> Self {
        Element::Vector(Arc::new(vector))
    }
}

impl From<Matrix> for Element {
    fn from(matrix: Matrix) -> Self {
        Element::Matrix(Arc::new(matrix))
    }
}

impl From<Arc<Vector>> for Element {
    fn from(vector: Arc<Vector>) -> Self {
        Element::Vector(vector)
    }
}

impl From<Arc<Matrix>> for Element {
    fn from(matrix: Arc<Matrix>) -> Self {
        Element::Matrix(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(Element::Number(1.0).kind(), Kind::Number);
        assert_eq!(Element::from(Vector::from_numbers([1.0])).kind(), Kind::Vector);
    }

    #[test]
    fn test_checked_add_numbers() {
        let sum = Element::Number(2.0).checked_add(&Element::Number(3.5)).unwrap();
        assert_eq!(sum.as_number(), Some(5.5));
    }

    #[test]
    fn test_checked_add_vectors_recurses() {
        let a = Element::from(Vector::from_numbers([1.0, 2.0]));
        let b = Element::from(Vector::from_numbers([10.0, 20.0]));
        let sum = a.checked_add(&b).unwrap();
        let inner = sum.as_vector().unwrap();
        assert_eq!(inner.number(0).unwrap(), 11.0);
        assert_eq!(inner.number(1).unwrap(), 22.0);
    }

    #[test]
    fn test_kind_mismatch() {
        let number = Element::Number(1.0);
        let vector = Element::from(Vector::from_numbers([1.0]));
        assert!(matches!(
            number.checked_add(&vector),
            Err(Error::Unsupported { op: "add", .. })
        ));
        assert!(matches!(
            vector.checked_sub(&number),
            Err(Error::Unsupported { op: "sub", .. })
        ));
    }

    #[test]
    fn test_scale_recurses() {
        let element = Element::from(Vector::from_numbers([1.0, -2.0]));
        let scaled = element.scale(3.0);
        let inner = scaled.as_vector().unwrap();
        assert_eq!(inner.number(0).unwrap(), 3.0);
        assert_eq!(inner.number(1).unwrap(), -6.0);
    }

    #[test]
    fn test_normalize_bare_number_is_unsupported() {
        assert!(Element::Number(4.0).normalized().is_err());
    }
}
