//! Interpolation over Number-kind containers.
//!
//! Sample points travel as numeric [`Vector`]s and corner grids as numeric
//! [`Matrix`]es; every function reads values through the container accessors
//! and reports wrong shapes as dimension mismatches.

use crate::error::Error;
use crate::matrix::Matrix;
use crate::vector::Vector;

fn expect_dimension(vector: &Vector, expected: usize) -> Result<(), Error> {
    if vector.dimension() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: vector.dimension(),
        });
    }
    Ok(())
}

fn expect_square(matrix: &Matrix, expected: usize) -> Result<(), Error> {
    let (rows, cols) = matrix.dimensions();
    if rows != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: rows,
        });
    }
    if cols != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: cols,
        });
    }
    Ok(())
}

/// Linear interpolation between the two values in `endpoints`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] unless `endpoints` has dimension 2.
///
/// # Example
///
/// ```
/// use mixtensors::Vector;
/// use mixtensors::interpolate::linear;
///
/// let endpoints = Vector::from_numbers([10.0, 20.0]);
/// assert_eq!(linear(&endpoints, 0.5).unwrap(), 15.0);
/// ```
pub fn linear(endpoints: &Vector, t: f64) -> Result<f64, Error> {
    expect_dimension(endpoints, 2)?;
    let a = endpoints.number(0)?;
    let b = endpoints.number(1)?;
    Ok(a + (b - a) * t)
}

/// Bilinear interpolation over a 2x2 corner grid; `t` holds `(x, y)`.
pub fn bilinear(corners: &Matrix, t: &Vector) -> Result<f64, Error> {
    expect_square(corners, 2)?;
    expect_dimension(t, 2)?;
    let tx = t.number(0)?;
    let ty = t.number(1)?;
    let first = corners.number(0, 0)? + (corners.number(0, 1)? - corners.number(0, 0)?) * tx;
    let second = corners.number(1, 0)? + (corners.number(1, 1)? - corners.number(1, 0)?) * tx;
    Ok(first + (second - first) * ty)
}

/// Trilinear interpolation between two 2x2 corner grids; `t` holds
/// `(x, y, z)` with `z` blending the two planes.
pub fn trilinear(upper: &Matrix, lower: &Matrix, t: &Vector) -> Result<f64, Error> {
    expect_dimension(t, 3)?;
    let plane = Vector::from_numbers([t.number(0)?, t.number(1)?]);
    let up = bilinear(upper, &plane)?;
    let down = bilinear(lower, &plane)?;
    Ok(up + (down - up) * t.number(2)?)
}

/// Catmull-Rom cubic through four sample values; interpolates between the
/// middle two as `t` runs from 0 to 1.
pub fn cubic(points: &Vector, t: f64) -> Result<f64, Error> {
    expect_dimension(points, 4)?;
    let a = points.number(0)?;
    let b = points.number(1)?;
    let c = points.number(2)?;
    let d = points.number(3)?;
    Ok(b + 0.5 * (c - a + (2.0 * a - 5.0 * b + 4.0 * c - d + (3.0 * (b - c) + (d - a)) * t) * t) * t)
}

/// Bicubic interpolation over a 4x4 grid; `t` holds `(x, y)`.
pub fn bicubic(grid: &Matrix, t: &Vector) -> Result<f64, Error> {
    expect_square(grid, 4)?;
    expect_dimension(t, 2)?;
    let tx = t.number(0)?;
    let mut columns = Vector::zeros(4);
    for i in 0..4 {
        let row = Vector::from_numbers([
            grid.number(i, 0)?,
            grid.number(i, 1)?,
            grid.number(i, 2)?,
            grid.number(i, 3)?,
        ]);
        columns.set(i, cubic(&row, tx)?)?;
    }
    cubic(&columns, t.number(1)?)
}

/// Tricubic interpolation over four 4x4 grids stacked along the blend axis;
/// `t` holds `(x, y, z)` with `y` blending the per-row bicubic slices.
pub fn tricubic(
    upper: &Matrix,
    upper_center: &Matrix,
    lower_center: &Matrix,
    lower: &Matrix,
    t: &Vector,
) -> Result<f64, Error> {
    let stack = [upper, upper_center, lower_center, lower];
    for grid in stack {
        expect_square(grid, 4)?;
    }
    expect_dimension(t, 3)?;
    let plane = Vector::from_numbers([t.number(0)?, t.number(2)?]);
    let mut slices = Vector::zeros(4);
    for i in 0..4 {
        let mut sheet = Matrix::zeros(4, 4)?;
        for (row, grid) in stack.iter().enumerate() {
            for j in 0..4 {
                sheet.set(row, j, grid.number(i, j)?)?;
            }
        }
        slices.set(i, bicubic(&sheet, &plane)?)?;
    }
    cubic(&slices, t.number(1)?)
}
