use rayon::prelude::*;

use crate::{basis::base::Basis, errors::GridError, storage::GridStorage};

use super::affected_points::AffectedPoints;

///
/// Point evaluation of a hierarchical expansion: the affected grid points
/// at the coordinate, dotted with the coefficient vector `alpha` (one
/// coefficient per stored point, in sequence order).
///
pub struct BasisEvaluation<'a>(pub &'a GridStorage);

impl BasisEvaluation<'_>
{
    pub fn eval<BASIS: Basis>(&self, basis: &BASIS, alpha: &[f64], point: &[f64]) -> Result<f64, GridError>
    {
        if alpha.len() != self.0.len()
        {
            return Err(GridError::CoefficientCountMismatch);
        }
        let affected = AffectedPoints(self.0).query(basis, point)?;
        Ok(affected.iter().map(|&(seq, value)|alpha[seq] * value).sum())
    }

    pub fn eval_batch<BASIS: Basis + Sync>(&self, basis: &BASIS, alpha: &[f64], points: &[Vec<f64>]) -> Result<Vec<f64>, GridError>
    {
        points.par_iter().map(|point|self.eval(basis, alpha, point)).collect()
    }
}

#[cfg(test)]
use crate::{basis::base::GridBasis, storage::GridPoint};

#[cfg(test)]
fn parabola_storage() -> (GridStorage, Vec<f64>)
{
    // hierarchical surpluses of f(x) = 4x(1-x) on levels one and two
    let mut storage = GridStorage::new(1);
    storage.insert_point(GridPoint::new(&[1], &[1], false));
    storage.insert_point(GridPoint::new(&[2], &[1], true));
    storage.insert_point(GridPoint::new(&[2], &[3], true));
    (storage, vec![1.0, 0.25, 0.25])
}

#[test]
fn check_eval_at_nodes()
{
    let (storage, alpha) = parabola_storage();
    let evaluator = BasisEvaluation(&storage);
    let basis = GridBasis::linear();
    // the interpolant reproduces the function values at the grid nodes
    assert!((evaluator.eval(&basis, &alpha, &[0.5]).unwrap() - 1.0).abs() < 1e-10);
    assert!((evaluator.eval(&basis, &alpha, &[0.25]).unwrap() - 0.75).abs() < 1e-10);
    assert!((evaluator.eval(&basis, &alpha, &[0.75]).unwrap() - 0.75).abs() < 1e-10);
}

#[test]
fn check_eval_between_nodes()
{
    let (storage, alpha) = parabola_storage();
    let evaluator = BasisEvaluation(&storage);
    let basis = GridBasis::linear();
    // halfway between the nodes at 0.25 and 0.5
    assert!((evaluator.eval(&basis, &alpha, &[0.375]).unwrap() - 0.875).abs() < 1e-10);
    assert!(evaluator.eval(&basis, &alpha, &[0.0]).unwrap().abs() < 1e-10);
}

#[test]
fn check_coefficient_count_mismatch()
{
    let (storage, _) = parabola_storage();
    let evaluator = BasisEvaluation(&storage);
    let result = evaluator.eval(&GridBasis::linear(), &[1.0, 0.25], &[0.5]);
    assert_eq!(result.unwrap_err(), GridError::CoefficientCountMismatch);
}

#[test]
fn check_eval_batch()
{
    let (storage, alpha) = parabola_storage();
    let evaluator = BasisEvaluation(&storage);
    let values = evaluator.eval_batch(&GridBasis::linear(), &alpha, &[vec![0.25], vec![0.375], vec![0.5]]).unwrap();
    assert_eq!(values.len(), 3);
    assert!((values[0] - 0.75).abs() < 1e-10);
    assert!((values[1] - 0.875).abs() < 1e-10);
    assert!((values[2] - 1.0).abs() < 1e-10);
}
