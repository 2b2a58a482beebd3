//! Reversible preprocessing transforms
//!
//! The block Burrows-Wheeler transform clusters bytes that share a context,
//! and move-to-front turns those clusters into runs of small ranks. Both are
//! applied before the final coder and inverted after it.

pub mod bwt;
pub mod mtf;
pub mod radix;

pub use bwt::BwtConfig;
pub use mtf::MtfAlphabet;
