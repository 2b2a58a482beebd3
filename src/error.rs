//! Error handling for codec and pipeline operations
//!
//! The error type lives in [`crate::common`] next to the types it reports on
//! and is re-exported here.

pub use crate::common::CompressError;
pub use crate::common::Result;
