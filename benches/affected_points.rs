use criterion::{criterion_group, criterion_main, Criterion};
use sgbasis::{algorithms::affected_points::AffectedPoints, basis::base::GridBasis, storage::{GridPoint, GridStorage}};

///
/// Three dimensional storage holding every point with a level sum of at
/// most five, the point set a regular sparse grid of that depth would hold.
///
fn build_storage() -> GridStorage
{
    let mut storage = GridStorage::new(3);
    let max_level_sum: u32 = 5;
    for l0 in 1..=max_level_sum - 2
    {
        for l1 in 1..=max_level_sum - l0 - 1
        {
            for l2 in 1..=max_level_sum - l0 - l1
            {
                for i0 in (1..1_u32 << l0).step_by(2)
                {
                    for i1 in (1..1_u32 << l1).step_by(2)
                    {
                        for i2 in (1..1_u32 << l2).step_by(2)
                        {
                            storage.insert_point(GridPoint::new(&[l0, l1, l2], &[i0, i1, i2], false));
                        }
                    }
                }
            }
        }
    }
    storage
}

fn run_query(c: &mut Criterion)
{
    let storage = build_storage();
    let basis = GridBasis::linear();
    c.bench_function("affected_points_query", |b|b.iter(||
    {
        AffectedPoints(&storage).query(&basis, &[0.3, 0.1, 0.7]).unwrap()
    }));
}

fn run_query_batch(c: &mut Criterion)
{
    let storage = build_storage();
    let basis = GridBasis::modified_linear();
    let points = vec![vec![0.3, 0.1, 0.7]; 1000];
    c.bench_function("affected_points_query_batch", |b|b.iter(||
    {
        AffectedPoints(&storage).query_batch(&basis, &points).unwrap()
    }));
}

criterion_group!(benches, run_query, run_query_batch);
criterion_main!(benches);
