pub mod convergence;
pub mod extract;
pub mod harvest;
pub mod proqm;
