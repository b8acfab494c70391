//! contains utils used in loading gene files and parameters

pub mod files;
pub mod parameters;

pub use files::*;
pub use parameters::*;
