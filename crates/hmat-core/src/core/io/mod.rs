pub mod pdb;
pub mod pir;
pub mod score_file;
pub mod series;
pub mod span;
pub mod traits;
