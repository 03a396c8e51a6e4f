pub mod error;
pub mod graphs;
pub mod heuristics;
pub mod search;
pub mod utility;
