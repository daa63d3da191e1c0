//! Random container construction.

use rand::distr::StandardUniform;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::Error;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Number-kind vector with uniform values in `[0, 1)`.
pub fn random_vector(dimension: usize) -> Vector {
    random_vector_with_rng(dimension, &mut rand::rng())
}

/// Uniform random vector from a caller-supplied RNG.
///
/// Useful for reproducible results with a seeded RNG.
///
/// # Example
///
/// ```
/// use mixtensors::random::random_vector_with_rng;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let a = random_vector_with_rng(4, &mut StdRng::seed_from_u64(42));
/// let b = random_vector_with_rng(4, &mut StdRng::seed_from_u64(42));
/// assert_eq!(a, b);
/// ```
pub fn random_vector_with_rng<R: Rng>(dimension: usize, rng: &mut R) -> Vector {
    Vector::from_numbers(
        (0..dimension)
            .map(|_| rng.sample::<f64, _>(StandardUniform))
            .collect::<Vec<_>>(),
    )
}

/// Number-kind vector with standard normal values.
pub fn randn_vector(dimension: usize) -> Vector {
    randn_vector_with_rng(dimension, &mut rand::rng())
}

/// Standard normal random vector from a caller-supplied RNG.
pub fn randn_vector_with_rng<R: Rng>(dimension: usize, rng: &mut R) -> Vector {
    Vector::from_numbers(
        (0..dimension)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect::<Vec<_>>(),
    )
}

/// Number-kind matrix with uniform values in `[0, 1)`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] when either dimension is zero.
pub fn random_matrix(rows: usize, cols: usize) -> Result<Matrix, Error> {
    random_matrix_with_rng(rows, cols, &mut rand::rng())
}

/// Uniform random matrix from a caller-supplied RNG.
pub fn random_matrix_with_rng<R: Rng>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Matrix, Error> {
    Matrix::from_numbers(
        (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| rng.sample::<f64, _>(StandardUniform))
                    .collect()
            })
            .collect(),
    )
}

/// Number-kind matrix with standard normal values.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] when either dimension is zero.
pub fn randn_matrix(rows: usize, cols: usize) -> Result<Matrix, Error> {
    randn_matrix_with_rng(rows, cols, &mut rand::rng())
}

/// Standard normal random matrix from a caller-supplied RNG.
pub fn randn_matrix_with_rng<R: Rng>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Matrix, Error> {
    Matrix::from_numbers(
        (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| rng.sample::<f64, _>(StandardNormal))
                    .collect()
            })
            .collect(),
    )
}
