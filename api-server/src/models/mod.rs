//! Data models

pub mod invoice;
pub mod prediction;

pub use invoice::*;
pub use prediction::*;
