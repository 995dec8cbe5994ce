//! Hierarchical basis functions over dyadic sparse grids, along with the
//! affected-grid-point query used to evaluate hierarchical expansions.

pub mod algorithms;
pub mod basis;
pub mod errors;
pub mod storage;
