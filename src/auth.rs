//! Session credential and refresh outcome models.

pub mod refresh;
pub mod token;

pub use refresh::*;
pub use token::*;
