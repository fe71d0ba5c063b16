pub mod convergence;
pub mod selection;
pub mod series;
