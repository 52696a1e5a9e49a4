pub mod candidate;
pub mod config;

pub use candidate::*;
pub use config::*;
