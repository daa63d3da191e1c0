//! Cross-module vector algebra scenarios.

use approx::assert_relative_eq;
use mixtensors::random::randn_vector_with_rng;
use mixtensors::{Error, Vector};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_basis_vector_scenario() {
    let a = Vector::from_numbers([1.0, 0.0, 0.0]);
    let b = Vector::from_numbers([0.0, 1.0, 0.0]);

    let cross = a.cross(&b).unwrap();
    assert_eq!(cross, Vector::from_numbers([0.0, 0.0, 1.0]));

    assert_eq!(a.dot(&b).unwrap(), 0.0);
    assert_eq!(a.add(&b).unwrap(), Vector::from_numbers([1.0, 1.0, 0.0]));
}

#[test]
fn test_cross_product_is_orthogonal() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..20 {
        let a = randn_vector_with_rng(3, &mut rng);
        let b = randn_vector_with_rng(3, &mut rng);
        let cross = a.cross(&b).unwrap();
        assert_relative_eq!(cross.dot(&a).unwrap(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(cross.dot(&b).unwrap(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_normalize_gives_unit_norm() {
    let mut rng = StdRng::seed_from_u64(99);
    for dimension in [1, 2, 5, 17] {
        let v = randn_vector_with_rng(dimension, &mut rng);
        if v.norm().unwrap() == 0.0 {
            continue;
        }
        let unit = v.normalized().unwrap();
        assert_relative_eq!(unit.norm().unwrap(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_add_zero_vector_is_identity() {
    let v = Vector::from_numbers([4.0, -1.5, 0.25]);
    let sum = v.add(&Vector::zeros(v.dimension())).unwrap();
    assert_eq!(sum, v);
}

#[test]
fn test_transpose_involution_preserves_everything() {
    let v = Vector::from_numbers([1.0, 2.0, 3.0, 4.0, 5.0]);
    let back = v.transpose().transpose();
    assert_eq!(back, v);
    assert_eq!(back.tags(), v.tags());
    assert_eq!(back.is_transposed(), v.is_transposed());
}

#[test]
fn test_dimension_tie_break_both_directions() {
    let short = Vector::from_numbers([1.0, 1.0]);
    let long = Vector::from_numbers([10.0, 20.0, 30.0, 40.0]);

    let sum = short.add(&long).unwrap();
    assert_eq!(sum, Vector::from_numbers([11.0, 21.0, 30.0, 40.0]));

    let diff = short.sub(&long).unwrap();
    assert_eq!(diff, Vector::from_numbers([-9.0, -19.0, 30.0, 40.0]));

    let sum_flipped = long.add(&short).unwrap();
    assert_eq!(sum_flipped, sum);
}

#[test]
fn test_vector_matrix_round_trip() {
    let v = Vector::from_numbers([1.0, 2.0, 3.0]);

    let row = v.to_matrix().unwrap();
    assert_eq!(row.dimensions(), (1, 3));

    let column = v.transpose().to_matrix().unwrap();
    assert_eq!(column.dimensions(), (3, 1));
    let extracted = column.column(0).unwrap();
    for i in 0..3 {
        assert_eq!(extracted.number(i).unwrap(), v.number(i).unwrap());
    }
}

#[test]
fn test_norm_is_number_only_but_normalize_recurses() {
    let nested = Vector::from_vectors([
        Vector::from_numbers([3.0, 4.0]),
        Vector::from_numbers([5.0, 12.0]),
    ]);
    assert!(matches!(nested.norm(), Err(Error::Unsupported { .. })));

    let normalized = nested.normalized().unwrap();
    let second = normalized.get(1).unwrap().as_vector().unwrap().clone();
    assert_relative_eq!(second.norm().unwrap(), 1.0, epsilon = 1e-12);
}
