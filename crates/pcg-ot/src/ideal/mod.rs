//! Ideal functionalities behind the async bootstrap traits.

pub mod cot;
pub mod vole;
