pub mod affected_points;
pub mod basis_evaluation;
