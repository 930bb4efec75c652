//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration (`RunConfig`)
//! - per-year fetch outcomes (`ArchiveOutcome`)
//! - the dated position series (`PositionRow`)
//! - the final scored output (`ScoredPoint`, `ScoredSeries`)

pub mod types;

pub use types::*;
