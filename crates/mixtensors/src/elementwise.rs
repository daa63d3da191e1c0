//! Element-wise numeric operations over Number-kind vectors.

use crate::error::Error;
use crate::kind::Kind;
use crate::noise::fract as fract_scalar;
use crate::vector::Vector;

/// Apply `f` to every numeric element, returning a new vector.
///
/// # Errors
///
/// Returns [`Error::Unsupported`] unless the vector is purely numeric.
///
/// # Example
///
/// ```
/// use mixtensors::Vector;
/// use mixtensors::elementwise::apply;
///
/// let v = Vector::from_numbers([1.0, 4.0, 9.0]);
/// let roots = apply(&v, f64::sqrt).unwrap();
/// assert_eq!(roots.number(2).unwrap(), 3.0);
/// ```
pub fn apply<F>(vector: &Vector, f: F) -> Result<Vector, Error>
where
    F: Fn(f64) -> f64,
{
    if vector.kinds().only() != Some(Kind::Number) {
        return Err(vector.kinds().unsupported("apply"));
    }
    let mut values = Vec::with_capacity(vector.dimension());
    for index in 0..vector.dimension() {
        values.push(f(vector.number(index)?));
    }
    Ok(Vector::from_numbers(values))
}

/// Combine two numeric vectors of equal dimension element by element.
///
/// # Errors
///
/// Returns [`Error::Unsupported`] unless both vectors are purely numeric,
/// and [`Error::DimensionMismatch`] when their dimensions differ.
pub fn apply_binary<F>(a: &Vector, b: &Vector, f: F) -> Result<Vector, Error>
where
    F: Fn(f64, f64) -> f64,
{
    if a.kinds().only() != Some(Kind::Number) {
        return Err(a.kinds().unsupported("apply_binary"));
    }
    if b.kinds().only() != Some(Kind::Number) {
        return Err(b.kinds().unsupported("apply_binary"));
    }
    if a.dimension() != b.dimension() {
        return Err(Error::DimensionMismatch {
            expected: a.dimension(),
            actual: b.dimension(),
        });
    }
    let mut values = Vec::with_capacity(a.dimension());
    for index in 0..a.dimension() {
        values.push(f(a.number(index)?, b.number(index)?));
    }
    Ok(Vector::from_numbers(values))
}

/// Absolute value of every component.
pub fn abs(vector: &Vector) -> Result<Vector, Error> {
    apply(vector, f64::abs)
}

/// Floor of every component.
pub fn floor(vector: &Vector) -> Result<Vector, Error> {
    apply(vector, f64::floor)
}

/// Fractional part of every component, in `[0, 1)`.
pub fn fract(vector: &Vector) -> Result<Vector, Error> {
    apply(vector, fract_scalar)
}

/// Component-wise maximum of two vectors of equal dimension.
pub fn max(a: &Vector, b: &Vector) -> Result<Vector, Error> {
    apply_binary(a, b, f64::max)
}
