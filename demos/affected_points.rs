use sgbasis::algorithms::{affected_points::AffectedPoints, basis_evaluation::BasisEvaluation};
use sgbasis::basis::base::GridBasis;
use sgbasis::errors::GridError;
use sgbasis::storage::{GridPoint, GridStorage};

fn main() -> Result<(), GridError>
{
    // one dimensional grid on levels one and two
    let mut storage = GridStorage::new(1);
    storage.insert_point(GridPoint::new(&[1], &[1], false));
    storage.insert_point(GridPoint::new(&[2], &[1], true));
    storage.insert_point(GridPoint::new(&[2], &[3], true));

    let basis = GridBasis::polynomial(2)?;
    let x = [0.3];
    for (seq, value) in AffectedPoints(&storage).query(&basis, &x)?
    {
        println!("point {} contributes {}", seq, value);
    }

    // hierarchical surpluses of f(x) = 4x(1-x) for the linear basis
    let alpha = [1.0, 0.25, 0.25];
    let value = BasisEvaluation(&storage).eval(&GridBasis::linear(), &alpha, &x)?;
    println!("interpolated value at {} = {}", x[0], value);
    Ok(())
}
