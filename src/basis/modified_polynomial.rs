use serde::{Deserialize, Serialize};

use crate::errors::GridError;
use super::base::{Basis, BasisFunction};
use super::lagrange::lagrange_factor;

///
/// Boundary adapted polynomial basis function for grids without boundary
/// points: the Lagrange polynomial that is one at the node and zero at its
/// `min(degree, level - 1)` nearest hierarchical ancestors. Degree zero and
/// the single level one function degenerate to the constant one, and the
/// outermost functions extend across the whole half of the domain up to the
/// boundary, reaching two there in the degree one case.
///
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ModifiedPolynomialBasis
{
    degree: usize,
}

impl ModifiedPolynomialBasis
{
    pub fn new(degree: i32) -> Result<Self, GridError>
    {
        if degree < 0
        {
            return Err(GridError::InvalidDegree);
        }
        Ok(Self { degree: degree as usize })
    }

    ///
    /// Node coordinates of the ancestors of (`level`, `index`), nearest
    /// first: parent, grandparent, and so on up to level one.
    ///
    fn ancestor_zeros(&self, level: u32, index: u32) -> Vec<f64>
    {
        let count = self.degree.min(level.saturating_sub(1) as usize);
        let mut zeros = Vec::with_capacity(count);
        let mut current_level = level;
        let mut current_index = index;
        while zeros.len() < count
        {
            current_index = (current_index >> 1) | 1;
            current_level -= 1;
            zeros.push(current_index as f64 / (1_u64 << current_level) as f64);
        }
        zeros
    }
}

impl Basis for ModifiedPolynomialBasis
{
    #[inline]
    fn eval(&self, level: u32, index: u32, x: f64) -> f64 {
        if self.degree == 0 || level <= 1
        {
            return 1.0;
        }
        let zeros = self.ancestor_zeros(level, index);
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
        if self.degree == 0 || level <= 1
        {
            return true;
        }
        let h_inv = (1_u64 << level) as f64;
        if index == 1
        {
            x < 2.0 / h_inv
        }
        else if index == (1_u32 << level) - 1
        {
            x > 1.0 - 2.0 / h_inv
        }
        else
        {
            (h_inv * x - index as f64).abs() < 1.0
        }
    }
    fn degree(&self) -> usize {
        self.degree
    }
    fn basis_type(&self) -> BasisFunction {
        BasisFunction::ModifiedPolynomial
    }
}

#[test]
fn check_invalid_degree()
{
    assert_eq!(ModifiedPolynomialBasis::new(-1).unwrap_err(), GridError::InvalidDegree);
    assert_eq!(ModifiedPolynomialBasis::new(0).unwrap().degree(), 0);
}

#[test]
fn check_constant_values()
{
    let basis = ModifiedPolynomialBasis::new(0).unwrap();
    super::base::check_fixtures(&basis, &[
        (1, 1, 0.5, 1.0),
        (1, 1, 0.25, 1.0),
        (2, 1, 0.25, 1.0),
        (2, 1, 0.125, 1.0),
        (2, 3, 0.75, 1.0),
        (3, 1, 0.125, 1.0),
    ]);
}

#[test]
fn check_degree_one_values()
{
    let basis = ModifiedPolynomialBasis::new(1).unwrap();
    super::base::check_fixtures(&basis, &[
        (1, 1, 0.5, 1.0),
        (1, 1, 0.25, 1.0),

        (2, 1, 0.25, 1.0),
        (2, 1, 0.0, 2.0),
        (2, 1, 0.5, 0.0),

        (2, 3, 0.75, 1.0),
        (2, 3, 1.0, 2.0),
        (2, 3, 0.5, 0.0),

        (3, 1, 0.125, 1.0),
        (3, 1, 0.0, 2.0),
        (3, 1, 0.25, 0.0),

        (3, 3, 0.25 + 0.125, 1.0),
        (3, 3, 0.5, 2.0),
        (3, 3, 0.25, 0.0),
    ]);
}

#[test]
fn check_degree_two_values()
{
    let basis = ModifiedPolynomialBasis::new(2).unwrap();
    super::base::check_fixtures(&basis, &[
        (1, 1, 0.5, 1.0),
        (1, 1, 0.25, 1.0),

        (2, 1, 0.25, 1.0),
        (2, 1, 0.0, 2.0),
        (2, 1, 0.5, 0.0),

        (2, 3, 0.75, 1.0),
        (2, 3, 1.0, 2.0),
        (2, 3, 0.5, 0.0),

        (3, 1, 0.125, 1.0),
        (3, 1, 0.0, 2.0 + 2.0 / 3.0),
        (3, 1, 0.25, 0.0),

        (3, 3, 0.375, 1.0),
        (3, 3, 0.25, 0.0),
        (3, 3, 0.5, 0.0),
        (3, 3, (0.25 + 0.375) / 2.0, 0.75),
    ]);
}

#[test]
fn check_ancestor_zeros()
{
    let basis = ModifiedPolynomialBasis::new(3).unwrap();
    assert_eq!(basis.ancestor_zeros(3, 3), vec![0.25, 0.5]);
    assert_eq!(basis.ancestor_zeros(3, 5), vec![0.75, 0.5]);
    assert_eq!(basis.ancestor_zeros(2, 3), vec![0.5]);
    assert!(basis.ancestor_zeros(1, 1).is_empty());
}

#[test]
fn check_support_extends_to_boundary()
{
    let basis = ModifiedPolynomialBasis::new(2).unwrap();
    assert!(basis.in_support(3, 1, 0.0));
    assert!(!basis.in_support(3, 1, 0.25));
    assert!(basis.in_support(3, 7, 1.0));
    assert!(!basis.in_support(3, 3, 0.125));
    assert!(basis.in_support(1, 1, 0.9));
}
