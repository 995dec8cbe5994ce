use serde::{Deserialize, Serialize};

use crate::errors::GridError;
use super::{linear::LinearBasis, modified_linear::ModifiedLinearBasis, modified_polynomial::ModifiedPolynomialBasis, polynomial::PolynomialBasis};

pub trait Basis
{
    /// Value of the one dimensional basis function for (`level`, `index`) at `x`.
    fn eval(&self, level: u32, index: u32, x: f64) -> f64;
    /// Coordinate of the node the basis function is centered on.
    fn node(&self, level: u32, index: u32) -> f64;
    /// True if the basis function can be nonzero at `x`.
    fn in_support(&self, level: u32, index: u32, x: f64) -> bool;
    fn degree(&self) -> usize;
    fn basis_type(&self) -> BasisFunction;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BasisFunction
{
    Linear = 0,
    ModifiedLinear = 1,
    Polynomial = 2,
    ModifiedPolynomial = 3,
}

///
/// Closed set of the supported basis families, carrying the degree payload
/// for the polynomial variants. Dispatches `Basis` without trait objects.
///
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum GridBasis
{
    Linear(LinearBasis),
    ModifiedLinear(ModifiedLinearBasis),
    Polynomial(PolynomialBasis),
    ModifiedPolynomial(ModifiedPolynomialBasis),
}

impl GridBasis
{
    pub fn linear() -> Self
    {
        GridBasis::Linear(LinearBasis)
    }
    pub fn modified_linear() -> Self
    {
        GridBasis::ModifiedLinear(ModifiedLinearBasis)
    }
    pub fn polynomial(degree: i32) -> Result<Self, GridError>
    {
        Ok(GridBasis::Polynomial(PolynomialBasis::new(degree)?))
    }
    pub fn modified_polynomial(degree: i32) -> Result<Self, GridError>
    {
        Ok(GridBasis::ModifiedPolynomial(ModifiedPolynomialBasis::new(degree)?))
    }
}

impl Basis for GridBasis
{
    #[inline]
    fn eval(&self, level: u32, index: u32, x: f64) -> f64 {
        match self
        {
            GridBasis::Linear(basis) => basis.eval(level, index, x),
            GridBasis::ModifiedLinear(basis) => basis.eval(level, index, x),
            GridBasis::Polynomial(basis) => basis.eval(level, index, x),
            GridBasis::ModifiedPolynomial(basis) => basis.eval(level, index, x),
        }
    }

    #[inline]
    fn node(&self, level: u32, index: u32) -> f64
    {
        match self
        {
            GridBasis::Linear(basis) => basis.node(level, index),
            GridBasis::ModifiedLinear(basis) => basis.node(level, index),
            GridBasis::Polynomial(basis) => basis.node(level, index),
            GridBasis::ModifiedPolynomial(basis) => basis.node(level, index),
        }
    }

    #[inline]
    fn in_support(&self, level: u32, index: u32, x: f64) -> bool
    {
        match self
        {
            GridBasis::Linear(basis) => basis.in_support(level, index, x),
            GridBasis::ModifiedLinear(basis) => basis.in_support(level, index, x),
            GridBasis::Polynomial(basis) => basis.in_support(level, index, x),
            GridBasis::ModifiedPolynomial(basis) => basis.in_support(level, index, x),
        }
    }

    fn degree(&self) -> usize {
        match self
        {
            GridBasis::Linear(basis) => basis.degree(),
            GridBasis::ModifiedLinear(basis) => basis.degree(),
            GridBasis::Polynomial(basis) => basis.degree(),
            GridBasis::ModifiedPolynomial(basis) => basis.degree(),
        }
    }

    fn basis_type(&self) -> BasisFunction {
        match self
        {
            GridBasis::Linear(basis) => basis.basis_type(),
            GridBasis::ModifiedLinear(basis) => basis.basis_type(),
            GridBasis::Polynomial(basis) => basis.basis_type(),
            GridBasis::ModifiedPolynomial(basis) => basis.basis_type(),
        }
    }
}

#[cfg(test)]
pub(crate) fn check_fixtures<B: Basis>(basis: &B, points: &[(u32, u32, f64, f64)])
{
    for &(level, index, x, expected) in points
    {
        let value = basis.eval(level, index, x);
        assert!((value - expected).abs() < 1e-10, "{} != {} => ({}, {}) @ {}", value, expected, level, index, x);
    }
}

#[test]
fn check_dispatch()
{
    let basis = GridBasis::polynomial(3).unwrap();
    assert_eq!(basis.degree(), 3);
    assert_eq!(basis.basis_type(), BasisFunction::Polynomial);
    assert_eq!(basis.node(2, 3), 0.75);
    assert!((basis.eval(1, 1, 0.5) - 1.0).abs() < 1e-10);
    assert_eq!(GridBasis::linear().basis_type(), BasisFunction::Linear);
    assert_eq!(GridBasis::modified_linear().basis_type(), BasisFunction::ModifiedLinear);
    assert_eq!(GridBasis::modified_polynomial(0).unwrap().basis_type(), BasisFunction::ModifiedPolynomial);
}

#[test]
fn check_invalid_construction()
{
    assert_eq!(GridBasis::polynomial(0).unwrap_err(), GridError::InvalidDegree);
    assert_eq!(GridBasis::modified_polynomial(-1).unwrap_err(), GridError::InvalidDegree);
}
