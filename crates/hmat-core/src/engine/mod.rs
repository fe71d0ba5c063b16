pub mod config;
pub mod error;
pub mod external;
pub mod output;
pub mod progress;
