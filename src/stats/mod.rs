//! Statistics over the sorted position series.
//!
//! - trailing-window z-scores (`rolling`)
//! - trailing calendar-month selection (`window`)

pub mod rolling;
pub mod window;

pub use rolling::*;
pub use window::*;
