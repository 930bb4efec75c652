//! Input/output helpers.
//!
//! - corpus loading from the working directory (`load`)
//! - final-series exports (CSV/JSON) (`export`)

pub mod export;
pub mod load;

pub use export::*;
pub use load::*;
