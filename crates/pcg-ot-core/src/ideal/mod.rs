//! Ideal functionalities.

pub mod cot;
pub mod spcot;
pub mod vole;
