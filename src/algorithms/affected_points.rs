use rayon::prelude::*;

use crate::{basis::base::Basis, errors::GridError, storage::GridStorage};

///
/// Query for the stored grid points whose basis function is nonzero at a
/// coordinate. Results pair the sequence index of each affected point with
/// the product of its per-dimension basis values, in insertion order.
///
pub struct AffectedPoints<'a>(pub &'a GridStorage);

impl AffectedPoints<'_>
{
    pub fn query<BASIS: Basis>(&self, basis: &BASIS, point: &[f64]) -> Result<Vec<(usize, f64)>, GridError>
    {
        let storage = self.0;
        if point.len() != storage.num_dimensions()
        {
            return Err(GridError::DimensionMismatch);
        }
        let unit_coord;
        let point = if let Some(bbox) = storage.bounding_box()
        {
            if !bbox.contains(point)
            {
                return Err(GridError::OutOfDomain);
            }
            unit_coord = bbox.to_unit_coordinate(point);
            unit_coord.as_slice()
        }
        else
        {
            point
        };
        let mut result = Vec::new();
        'points: for (seq, grid_point) in storage.iter().enumerate()
        {
            let mut value = 1.0;
            for (dim, &x) in point.iter().enumerate()
            {
                let level = grid_point.level[dim];
                let index = grid_point.index[dim];
                if !basis.in_support(level, index, x)
                {
                    continue 'points;
                }
                value *= basis.eval(level, index, x);
            }
            if value != 0.0
            {
                result.push((seq, value));
            }
        }
        Ok(result)
    }

    ///
    /// Runs `query` for each coordinate vector, fanning the work out over
    /// the rayon thread pool. Results are returned in input order.
    ///
    pub fn query_batch<BASIS: Basis + Sync>(&self, basis: &BASIS, points: &[Vec<f64>]) -> Result<Vec<Vec<(usize, f64)>>, GridError>
    {
        points.par_iter().map(|point|self.query(basis, point)).collect()
    }
}

#[cfg(test)]
use crate::{basis::base::GridBasis, storage::{BoundingBox, GridPoint}};

#[test]
fn check_affected_single_point()
{
    let mut storage = GridStorage::new(1);
    storage.insert_point(GridPoint::new(&[1], &[1], true));

    let affected = AffectedPoints(&storage).query(&GridBasis::linear(), &[0.25]).unwrap();
    assert_eq!(affected.len(), 1);
    assert_eq!(affected[0].0, 0);
    assert!((affected[0].1 - 0.5).abs() < 1e-10);
}

#[test]
fn check_affected_filters_by_support()
{
    let mut storage = GridStorage::new(1);
    storage.insert_point(GridPoint::new(&[1], &[1], false));
    storage.insert_point(GridPoint::new(&[2], &[1], true));
    storage.insert_point(GridPoint::new(&[2], &[3], true));

    let affected = AffectedPoints(&storage).query(&GridBasis::linear(), &[0.25]).unwrap();
    assert_eq!(affected.len(), 2);
    assert_eq!(affected[0].0, 0);
    assert!((affected[0].1 - 0.5).abs() < 1e-10);
    assert_eq!(affected[1].0, 1);
    assert!((affected[1].1 - 1.0).abs() < 1e-10);
}

#[test]
fn check_affected_multi_dimensional_product()
{
    let mut storage = GridStorage::new(2);
    storage.insert_point(GridPoint::new(&[1, 1], &[1, 1], false));
    storage.insert_point(GridPoint::new(&[2, 1], &[1, 1], true));

    let affected = AffectedPoints(&storage).query(&GridBasis::linear(), &[0.25, 0.25]).unwrap();
    assert_eq!(affected.len(), 2);
    assert!((affected[0].1 - 0.25).abs() < 1e-10);
    assert!((affected[1].1 - 0.5).abs() < 1e-10);
}

#[test]
fn check_affected_modified_linear()
{
    let mut storage = GridStorage::new(1);
    storage.insert_point(GridPoint::new(&[1], &[1], false));
    storage.insert_point(GridPoint::new(&[2], &[1], true));
    storage.insert_point(GridPoint::new(&[2], &[3], true));

    // the level one function is constant and the left edge function ramps
    // to two at the boundary, so both cover x = 0
    let affected = AffectedPoints(&storage).query(&GridBasis::modified_linear(), &[0.0]).unwrap();
    assert_eq!(affected.len(), 2);
    assert!((affected[0].1 - 1.0).abs() < 1e-10);
    assert!((affected[1].1 - 2.0).abs() < 1e-10);
}

#[test]
fn check_dimension_mismatch()
{
    let mut storage = GridStorage::new(2);
    storage.insert_point(GridPoint::new(&[1, 1], &[1, 1], true));

    let query = AffectedPoints(&storage);
    assert_eq!(query.query(&GridBasis::linear(), &[0.25]).unwrap_err(), GridError::DimensionMismatch);
    assert_eq!(query.query(&GridBasis::linear(), &[0.25, 0.5, 0.75]).unwrap_err(), GridError::DimensionMismatch);
}

#[test]
fn check_bounding_box_query()
{
    let mut storage = GridStorage::new(1);
    storage.insert_point(GridPoint::new(&[1], &[1], true));
    *storage.bounding_box_mut() = Some(BoundingBox::new(&[0.0], &[2.0]));

    let query = AffectedPoints(&storage);
    let affected = query.query(&GridBasis::linear(), &[0.5]).unwrap();
    assert!((affected[0].1 - 0.5).abs() < 1e-10);
    assert_eq!(query.query(&GridBasis::linear(), &[3.0]).unwrap_err(), GridError::OutOfDomain);
}

#[test]
fn check_query_batch()
{
    let mut storage = GridStorage::new(1);
    storage.insert_point(GridPoint::new(&[1], &[1], false));
    storage.insert_point(GridPoint::new(&[2], &[3], true));

    let batch = AffectedPoints(&storage).query_batch(&GridBasis::linear(), &[vec![0.25], vec![0.75]]).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].len(), 1);
    assert!((batch[0][0].1 - 0.5).abs() < 1e-10);
    assert_eq!(batch[1].len(), 2);
    assert!((batch[1][1].1 - 1.0).abs() < 1e-10);

    let bad = AffectedPoints(&storage).query_batch(&GridBasis::linear(), &[vec![0.25], vec![0.25, 0.5]]);
    assert_eq!(bad.unwrap_err(), GridError::DimensionMismatch);
}
