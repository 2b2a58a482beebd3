//! classic-compress - classic lossless byte-stream compression
//!
//! This crate implements three final coders (run-length encoding, Huffman
//! coding and LZW) and two optional preprocessing stages (a block
//! Burrows-Wheeler transform and a move-to-front transform). Every stage tags
//! its output with a magic prefix, so an encoded stream describes how it was
//! produced and can be decoded without side information.
//!
//! # Features
//!
//! - RLE with 7-bit run and literal counts
//! - Huffman coding with a stored 256-entry frequency table
//! - LZW with variable-width codes and a bounded dictionary
//! - Block BWT (512-byte blocks) with radix-sorted rotations
//! - MTF over a 256-symbol alphabet
//! - Algorithm and stage detection from magic tags
//!
//! # Example
//!
//! ```
//! use classic_compress::{compress, decompress, Algorithm, DecodeOptions, PipelineOptions};
//!
//! let data = b"banana bandana banana bandana";
//! let options = PipelineOptions::new().with_bwt(true).with_mtf(true);
//!
//! let compressed = compress(data, Algorithm::Huffman, options)?;
//! assert!(compressed.starts_with(b"HUFFMAN_"));
//!
//! // Stages are detected from the tags when nothing is declared
//! let restored = decompress(&compressed, None, DecodeOptions::default())?;
//! assert_eq!(restored, data);
//! # Ok::<(), classic_compress::CompressError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod bitstream;
pub mod common;
pub mod error;
pub mod huffman;
pub mod lzw;
pub mod pipeline;
pub mod rle;
pub mod transform;

// Re-export commonly used types
pub use common::{
    Algorithm, CompressError, CompressionStats, DecodeOptions, PipelineOptions, Result, Stage,
    BWT_BLOCK_SIZE, LZW_MAX_DICT_SIZE,
};
pub use lzw::LzwConfig;
pub use pipeline::{compress_named, compress_with_stats, decompress_named, inspect, FrameInfo};
pub use rle::RleConfig;
pub use transform::BwtConfig;

// Convenience functions

/// Compress data through the optional BWT and MTF stages and a final coder
///
/// # Arguments
/// * `data` - The data to compress
/// * `algorithm` - Final coder (RLE, Huffman or LZW)
/// * `options` - Preprocessing stages to apply
///
/// # Returns
/// The tagged encoded stream
pub fn compress(data: &[u8], algorithm: Algorithm, options: PipelineOptions) -> Result<Vec<u8>> {
    pipeline::compress(data, algorithm, options)
}

/// Decompress a tagged stream
///
/// # Arguments
/// * `data` - The encoded stream
/// * `algorithm` - Expected final coder, or `None` to detect it
/// * `options` - Declared stages; a [`PipelineOptions`] declares both flags
///
/// # Returns
/// A vector containing the original bytes
///
/// Raw input that itself begins with `MTF_` or `BWT_` does not survive a
/// round trip; see [`pipeline::decompress`].
pub fn decompress(
    data: &[u8],
    algorithm: Option<Algorithm>,
    options: impl Into<DecodeOptions>,
) -> Result<Vec<u8>> {
    pipeline::decompress(data, algorithm, options)
}
