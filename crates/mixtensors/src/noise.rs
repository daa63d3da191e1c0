//! Sine-lattice noise and gradient hashing.
//!
//! Deterministic pseudo-random values derived from coordinates: the
//! fractional part of a large-amplitude sine keeps results in `[0, 1)`,
//! and the hashed gradients map hash bits to a small set of directions
//! dotted with a displacement vector.

use crate::error::Error;
use crate::vector::Vector;

const X_PRIME: f64 = 495_119.0;
const Y_PRIME: f64 = 494_109.0;
const Z_PRIME: f64 = 549_161.0;
const W_PRIME: f64 = 547_967.0;
const AMPLITUDE: f64 = 499_509.0;

/// Fractional part of `x`, always in `[0, 1)`.
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// 1-D sine noise in `[0, 1)`.
pub fn sinoise1(x: f64) -> f64 {
    fract((x * X_PRIME).sin() * AMPLITUDE)
}

/// 2-D sine noise in `[0, 1)`.
pub fn sinoise2(x: f64, y: f64) -> f64 {
    fract((x * X_PRIME + y * Y_PRIME).sin() * AMPLITUDE)
}

/// 3-D sine noise in `[0, 1)`.
pub fn sinoise3(x: f64, y: f64, z: f64) -> f64 {
    fract((x * X_PRIME + y * Y_PRIME + z * Z_PRIME).sin() * AMPLITUDE)
}

/// 4-D sine noise in `[0, 1)`.
pub fn sinoise4(x: f64, y: f64, z: f64, w: f64) -> f64 {
    fract((x * X_PRIME + y * Y_PRIME + z * Z_PRIME + w * W_PRIME).sin() * AMPLITUDE)
}

/// Sine noise at a numeric point of dimension 1 through 4.
///
/// # Errors
///
/// Returns [`Error::Unsupported`] for dimensions outside 1..=4 and for
/// non-numeric components.
pub fn sinoise(point: &Vector) -> Result<f64, Error> {
    match point.dimension() {
        1 => Ok(sinoise1(point.number(0)?)),
        2 => Ok(sinoise2(point.number(0)?, point.number(1)?)),
        3 => Ok(sinoise3(point.number(0)?, point.number(1)?, point.number(2)?)),
        4 => Ok(sinoise4(
            point.number(0)?,
            point.number(1)?,
            point.number(2)?,
            point.number(3)?,
        )),
        actual => Err(Error::Unsupported {
            op: "sinoise",
            reason: format!("point dimension must be 1 through 4, got {actual}"),
        }),
    }
}

/// Hashed gradient for 1-D noise: one of +-1..=8 times the displacement.
pub fn grad1(hash: i32, x: f64) -> f64 {
    let h = hash & 15;
    let mut grad = 1.0 + (h & 7) as f64;
    if h & 8 != 0 {
        grad = -grad;
    }
    grad * x
}

/// Hashed gradient dotted with a 2-D displacement.
///
/// The low 3 hash bits pick one of 8 gradient directions.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] when `point` has fewer than two
/// components and [`Error::Unsupported`] for non-numeric ones.
pub fn grad2(hash: i32, point: &Vector) -> Result<f64, Error> {
    let x = point.number(0)?;
    let y = point.number(1)?;
    let h = hash & 7;
    let u = if h < 4 { x } else { y };
    let v = if h < 4 { y } else { x };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -2.0 * v } else { 2.0 * v };
    Ok(u + v)
}

/// Hashed gradient dotted with a 3-D displacement.
///
/// The low 4 hash bits pick one of 12 gradient directions, with the repeats
/// at 12..=15 folded back.
pub fn grad3(hash: i32, point: &Vector) -> Result<f64, Error> {
    let x = point.number(0)?;
    let y = point.number(1)?;
    let z = point.number(2)?;
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -v } else { v };
    Ok(u + v)
}

/// Hashed gradient dotted with a 4-D displacement.
///
/// The low 5 hash bits pick one of 32 gradient directions.
pub fn grad4(hash: i32, point: &Vector) -> Result<f64, Error> {
    let x = point.number(0)?;
    let y = point.number(1)?;
    let z = point.number(2)?;
    let w = point.number(3)?;
    let h = hash & 31;
    let u = if h < 24 { x } else { y };
    let v = if h < 16 { y } else { z };
    let t = if h < 8 { z } else { w };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -v } else { v };
    let t = if h & 4 != 0 { -t } else { t };
    Ok(u + v + t)
}
