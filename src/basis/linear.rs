use serde::{Deserialize, Serialize};

use super::base::{Basis, BasisFunction};

///
/// The standard hat function centered on `index / 2^level`. Level zero
/// carries the two boundary functions of grids with boundary points.
///
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct LinearBasis;

impl Basis for LinearBasis
{
    #[inline]
    fn eval(&self, level: u32, index: u32, x: f64) -> f64 {
        if level == 0
        {
            if index == 0
            {
                1.0 - x
            }
            else
            {
                x
            }
        }
        else
        {
            0.0_f64.max(1.0 - f64::abs((1 << level) as f64 * x - index as f64))
        }
    }
    #[inline]
    fn node(&self, level: u32, index: u32) -> f64
    {
        index as f64 / (1 << level) as f64
    }
    #[inline]
    fn in_support(&self, level: u32, index: u32, x: f64) -> bool
    {
        if level == 0
        {
            return true;
        }
        ((1 << level) as f64 * x - index as f64).abs() < 1.0
    }
    fn degree(&self) -> usize {
        1
    }
    fn basis_type(&self) -> BasisFunction {
        BasisFunction::Linear
    }
}

#[test]
fn check_linear_values()
{
    let basis = LinearBasis;
    super::base::check_fixtures(&basis, &[
        (1, 1, 0.5, 1.0),
        (1, 1, 0.25, 0.5),
        (2, 1, 0.25, 1.0),
        (2, 1, 0.125, 0.5),
    ]);
}

#[test]
fn check_linear_support()
{
    let basis = LinearBasis;
    // peak of one at the node, zero at and beyond the support bounds
    assert_eq!(basis.eval(3, 5, basis.node(3, 5)), 1.0);
    assert_eq!(basis.eval(3, 5, 0.5), 0.0);
    assert_eq!(basis.eval(3, 5, 0.75), 0.0);
    assert_eq!(basis.eval(3, 5, 0.1), 0.0);
    assert!(basis.in_support(3, 5, 0.6));
    assert!(!basis.in_support(3, 5, 0.5));
    assert!(!basis.in_support(3, 5, 0.8));
}

#[test]
fn check_linear_boundary_level()
{
    let basis = LinearBasis;
    assert_eq!(basis.eval(0, 0, 0.25), 0.75);
    assert_eq!(basis.eval(0, 1, 0.25), 0.25);
    assert!(basis.in_support(0, 0, 0.99));
}

#[test]
fn check_linear_purity()
{
    let basis = LinearBasis;
    let first = basis.eval(4, 7, 0.417);
    for _ in 0..10
    {
        assert_eq!(basis.eval(4, 7, 0.417), first);
    }
}
