//! Data acquisition: archive retrieval, resolution, and the on-disk store.
//!
//! - per-year archive download + inner-file resolution (`fetch`)
//! - the year-keyed working directory (`store`)

pub mod fetch;
pub mod store;

pub use fetch::*;
pub use store::*;
