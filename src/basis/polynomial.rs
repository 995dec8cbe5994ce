use serde::{Deserialize, Serialize};

use crate::errors::GridError;
use super::base::{Basis, BasisFunction};
use super::lagrange::lagrange_factor;

///
/// Piecewise polynomial basis function: the Lagrange polynomial that is one
/// at the node and zero at the bounds of the nested dyadic intervals
/// enclosing the node's support, restricted to that support. The number of
/// interpolation zeros is `min(degree, level + 1)`, so coarse levels
/// truncate the degree at the domain boundary.
///
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct PolynomialBasis
{
    degree: usize,
}

impl PolynomialBasis
{
    pub fn new(degree: i32) -> Result<Self, GridError>
    {
        if degree < 2
        {
            return Err(GridError::InvalidDegree);
        }
        Ok(Self { degree: degree as usize })
    }

    ///
    /// Interpolation zeros for (`level`, `index`), nearest first: the two
    /// support bounds, then the new bound gained with each step up the
    /// chain of enclosing dyadic intervals.
    ///
    fn interpolation_zeros(&self, level: u32, index: u32) -> Vec<f64>
    {
        let count = self.degree.min(level as usize + 1);
        let h = 1.0 / (1_u64 << level) as f64;
        let mut left = (index - 1) as f64 * h;
        let mut zeros = Vec::with_capacity(count);
        zeros.push(left);
        if zeros.len() < count
        {
            zeros.push((index + 1) as f64 * h);
        }
        let mut current_level = level;
        let mut current_index = index;
        while zeros.len() < count && current_level > 1
        {
            current_index = (current_index >> 1) | 1;
            current_level -= 1;
            let parent_h = 1.0 / (1_u64 << current_level) as f64;
            let parent_left = (current_index - 1) as f64 * parent_h;
            if parent_left < left
            {
                zeros.push(parent_left);
                left = parent_left;
            }
            else
            {
                zeros.push((current_index + 1) as f64 * parent_h);
            }
        }
        zeros
    }
}

impl Basis for PolynomialBasis
{
    #[inline]
    fn eval(&self, level: u32, index: u32, x: f64) -> f64 {
        if !self.in_support(level, index, x)
        {
            return 0.0;
        }
        let zeros = self.interpolation_zeros(level, index);
        lagrange_factor(x, self.node(level, index), &zeros)
    }
    #[inline]
    fn node(&self, level: u32, index: u32) -> f64
    {
        index as f64 / (1_u64 << level) as f64
    }
    #[inline]
    fn in_support(&self, level: u32, index: u32, x: f64) -> bool
    {
        ((1_u64 << level) as f64 * x - index as f64).abs() < 1.0
    }
    fn degree(&self) -> usize {
        self.degree
    }
    fn basis_type(&self) -> BasisFunction {
        BasisFunction::Polynomial
    }
}

#[test]
fn check_invalid_degree()
{
    assert_eq!(PolynomialBasis::new(0).unwrap_err(), GridError::InvalidDegree);
    assert_eq!(PolynomialBasis::new(-3).unwrap_err(), GridError::InvalidDegree);
    assert_eq!(PolynomialBasis::new(2).unwrap().degree(), 2);
}

#[test]
fn check_quadratic_values()
{
    let basis = PolynomialBasis::new(2).unwrap();
    super::base::check_fixtures(&basis, &[
        (1, 1, 0.5, 1.0),
        (1, 1, 0.25, 0.75),
        (1, 1, 0.75, 0.75),
        (2, 1, 0.25, 1.0),
        (2, 1, 0.125, 0.75),
        (2, 1, 0.25 + 0.125, 0.75),
    ]);
}

#[test]
fn check_cubic_values()
{
    let basis = PolynomialBasis::new(3).unwrap();
    super::base::check_fixtures(&basis, &[
        (1, 1, 0.5, 1.0),
        (1, 1, 0.25, 0.75),
        (1, 1, 0.75, 0.75),

        (2, 1, 0.25, 1.0),
        (2, 1, 0.125, 0.875),
        (2, 1, 0.25 + 0.125, 0.625),

        (3, 1, 0.0625, 0.875),
        (3, 1, 0.125 + 0.0625, 0.625),

        (3, 3, 0.375 - 0.0625, 0.625),
        (3, 3, 0.375 + 0.0625, 0.875),
    ]);
}

#[test]
fn check_zero_outside_support()
{
    let basis = PolynomialBasis::new(3).unwrap();
    assert_eq!(basis.eval(2, 1, 0.5), 0.0);
    assert_eq!(basis.eval(2, 1, 0.75), 0.0);
    assert_eq!(basis.eval(3, 3, 0.125), 0.0);
    assert!(!basis.in_support(2, 1, 0.5));
    assert!(basis.in_support(2, 1, 0.375));
}

#[test]
fn check_interpolation_zeros()
{
    let basis = PolynomialBasis::new(4).unwrap();
    // support bounds first, then the widening enclosing intervals
    assert_eq!(basis.interpolation_zeros(3, 3), vec![0.25, 0.5, 0.0, 1.0]);
    assert_eq!(basis.interpolation_zeros(3, 1), vec![0.0, 0.25, 0.5, 1.0]);
    assert_eq!(basis.interpolation_zeros(1, 1), vec![0.0, 1.0]);
}
