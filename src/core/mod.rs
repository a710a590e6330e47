//! Core types, constants, and error taxonomy (always included).

pub mod constants;
mod error;
mod traits;
mod types;

pub use constants::*;
pub use error::*;
pub use traits::*;
pub use types::*;
