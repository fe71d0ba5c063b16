pub mod analysis;
pub mod io;
pub mod report;
