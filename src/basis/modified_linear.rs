use serde::{Deserialize, Serialize};

use super::base::{Basis, BasisFunction};

///
/// Boundary adapted hat function for grids without boundary points. The
/// single level one function is constant, and the outermost functions on
/// finer levels ramp linearly to a value of two at the domain edge.
///
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModifiedLinearBasis;

impl Basis for ModifiedLinearBasis
{
    #[inline]
    fn eval(&self, level: u32, index: u32, x: f64) -> f64 {
        if level <= 1
        {
            return 1.0;
        }
        let h_inv = (1_u64 << level) as f64;
        if index == 1
        {
            if x <= 2.0 / h_inv
            {
                2.0 - h_inv * x
            }
            else
            {
                0.0
            }
        }
        else if index == (1_u32 << level) - 1
        {
            if x >= 1.0 - 2.0 / h_inv
            {
                h_inv * x - index as f64 + 1.0
            }
            else
            {
                0.0
            }
        }
        else
        {
            0.0_f64.max(1.0 - f64::abs(h_inv * x - index as f64))
        }
    }
    #[inline]
    fn node(&self, level: u32, index: u32) -> f64
    {
        index as f64 / (1_u64 << level) as f64
    }
    #[inline]
    fn in_support(&self, level: u32, index: u32, x: f64) -> bool
    {
        if level <= 1
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
        1
    }
    fn basis_type(&self) -> BasisFunction {
        BasisFunction::ModifiedLinear
    }
}

#[test]
fn check_modified_linear_values()
{
    let basis = ModifiedLinearBasis;
    super::base::check_fixtures(&basis, &[
        (1, 1, 0.5, 1.0),
        (1, 1, 0.25, 1.0),

        (2, 1, 0.25, 1.0),
        (2, 1, 0.125, 1.5),
        (2, 1, 0.375, 0.5),

        (2, 3, 0.75, 1.0),
        (2, 3, 0.75 + 0.125, 1.5),
        (2, 3, 0.75 - 0.125, 0.5),

        (3, 3, 0.375 + 0.0625, 0.5),
    ]);
}

#[test]
fn check_modified_linear_boundary_ramp()
{
    let basis = ModifiedLinearBasis;
    // the outermost functions reach a value of two at the domain edge
    assert_eq!(basis.eval(2, 1, 0.0), 2.0);
    assert_eq!(basis.eval(2, 3, 1.0), 2.0);
    assert_eq!(basis.eval(3, 1, 0.0), 2.0);
    // and vanish past their inner zero crossing
    assert_eq!(basis.eval(2, 1, 0.5), 0.0);
    assert_eq!(basis.eval(2, 1, 0.75), 0.0);
    assert_eq!(basis.eval(3, 7, 0.5), 0.0);
}

#[test]
fn check_modified_linear_support()
{
    let basis = ModifiedLinearBasis;
    // level one covers the whole unit interval
    assert!(basis.in_support(1, 1, 0.0));
    assert!(basis.in_support(1, 1, 1.0));
    // edge functions extend to the boundary, interior functions do not
    assert!(basis.in_support(3, 1, 0.0));
    assert!(!basis.in_support(3, 1, 0.25));
    assert!(basis.in_support(3, 7, 1.0));
    assert!(!basis.in_support(3, 3, 0.125));
    assert!(basis.in_support(3, 3, 0.375));
}
