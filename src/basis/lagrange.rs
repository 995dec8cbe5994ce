///
/// Product form of the Lagrange polynomial that is one at `center` and zero
/// at each entry of `zeros`, evaluated at `x`.
///
#[inline]
pub fn lagrange_factor(x: f64, center: f64, zeros: &[f64]) -> f64
{
    let mut result = 1.0;
    for &zero in zeros
    {
        result *= (x - zero) / (center - zero);
    }
    result
}

#[test]
fn check_lagrange_factor()
{
    // quadratic through (0, 0), (0.5, 1), (1, 0)
    let zeros = [0.0, 1.0];
    assert!((lagrange_factor(0.5, 0.5, &zeros) - 1.0).abs() < 1e-14);
    assert!((lagrange_factor(0.25, 0.5, &zeros) - 0.75).abs() < 1e-14);
    assert!(lagrange_factor(0.0, 0.5, &zeros).abs() < 1e-14);
    // empty zero set degenerates to the constant one
    assert_eq!(lagrange_factor(0.3, 0.5, &[]), 1.0);
}
