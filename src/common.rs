//! Common types and constants shared by every codec
//!
//! This module defines the algorithm selector, the pipeline options, the
//! magic tags that make an encoded stream self-describing, and the error type
//! returned throughout the crate.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Final coder applied by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Run-length encoding
    Rle,
    /// Frequency-table Huffman coding
    Huffman,
    /// Lempel-Ziv-Welch dictionary coding
    Lzw,
}

impl Algorithm {
    /// Every supported algorithm, in tag-sniffing order
    pub const ALL: [Algorithm; 3] = [Algorithm::Rle, Algorithm::Huffman, Algorithm::Lzw];

    /// Magic tag that prefixes a payload produced by this algorithm
    pub fn magic(&self) -> &'static [u8] {
        match self {
            Algorithm::Rle => RLE_MAGIC,
            Algorithm::Huffman => HUFFMAN_MAGIC,
            Algorithm::Lzw => LZW_MAGIC,
        }
    }

    /// Detect the algorithm from the outermost magic tag of `data`
    pub fn sniff(data: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| data.starts_with(algorithm.magic()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Rle => "RLE",
            Algorithm::Huffman => "HUFFMAN",
            Algorithm::Lzw => "LZW",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = CompressError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rle" => Ok(Algorithm::Rle),
            "huffman" => Ok(Algorithm::Huffman),
            "lzw" => Ok(Algorithm::Lzw),
            _ => Err(CompressError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Preprocessing stages applied before the final coder
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Apply the block Burrows-Wheeler transform
    pub bwt: bool,
    /// Apply the move-to-front transform
    pub mtf: bool,
}

impl PipelineOptions {
    /// Options with no preprocessing stage
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the BWT stage
    pub fn with_bwt(mut self, bwt: bool) -> Self {
        self.bwt = bwt;
        self
    }

    /// Enable or disable the MTF stage
    pub fn with_mtf(mut self, mtf: bool) -> Self {
        self.mtf = mtf;
        self
    }
}

/// Stage flags declared by a caller when decoding
///
/// `None` means "not declared": the stage is inverted if and only if its
/// magic tag is present. `Some(flag)` must agree with the tag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Declared BWT stage
    pub bwt: Option<bool>,
    /// Declared MTF stage
    pub mtf: Option<bool>,
}

impl From<PipelineOptions> for DecodeOptions {
    fn from(options: PipelineOptions) -> Self {
        Self {
            bwt: Some(options.bwt),
            mtf: Some(options.mtf),
        }
    }
}

/// Preprocessing stage, used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Burrows-Wheeler transform
    Bwt,
    /// Move-to-front transform
    Mtf,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Bwt => f.write_str("BWT"),
            Stage::Mtf => f.write_str("MTF"),
        }
    }
}

/// Error type for codec and pipeline operations
#[derive(Debug, Error)]
pub enum CompressError {
    /// A read would cross the end of the bit stream
    #[error("Unexpected end of stream: requested {requested} bits, {remaining} remaining")]
    UnexpectedEof {
        /// Bits requested by the read
        requested: usize,
        /// Bits left in the stream
        remaining: usize,
    },

    /// A required magic tag is absent
    #[error("Data does not start with required {expected} header")]
    MissingMagic {
        /// Printable form of the missing tag
        expected: String,
    },

    /// Declared algorithm conflicts with the sniffed tag
    #[error("Algorithm mismatch: data indicates {detected}, but {declared} was specified")]
    AlgorithmMismatch {
        /// Algorithm named by the caller
        declared: Algorithm,
        /// Algorithm found in the data
        detected: Algorithm,
    },

    /// No algorithm declared and none detected
    #[error("Unknown compression format")]
    UnknownFormat,

    /// Declared stage flag conflicts with the presence of its tag
    #[error("{stage} flag is {declared}, but the data {}", mismatch_detail(.declared))]
    OptionMismatch {
        /// Stage concerned
        stage: Stage,
        /// Flag value declared by the caller
        declared: bool,
    },

    /// Algorithm name could not be parsed
    #[error("Unknown compression algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Frequency table entry out of sequence
    #[error("Incorrect Huffman frequency table: expected symbol {expected}, found {found}")]
    InvalidHuffmanHeader {
        /// Symbol expected at this position
        expected: u8,
        /// Symbol actually read
        found: u8,
    },

    /// RLE control byte of zero
    #[error("Invalid RLE control byte: {0}")]
    InvalidControlByte(u8),

    /// RLE control byte announces more bytes than remain
    #[error("RLE sequence needs {needed} bytes, only {remaining} remain")]
    TruncatedRun {
        /// Bytes announced by the control byte
        needed: usize,
        /// Bytes left in the input
        remaining: usize,
    },

    /// LZW code outside the dictionary
    #[error("Invalid LZW index {index} for dictionary of {dictionary_len} phrases")]
    InvalidLzwIndex {
        /// Decoded code
        index: usize,
        /// Dictionary length at the time of decoding
        dictionary_len: usize,
    },

    /// BWT payload does not split into whole blocks
    #[error("BWT data length {length} is not a multiple of block unit {unit}")]
    InvalidBlockLength {
        /// Payload length after the header
        length: usize,
        /// Block size plus index size
        unit: usize,
    },

    /// Rotation index does not fit inside its block
    #[error("BWT rotation index {index} out of range for block of {block_size} bytes")]
    InvalidBwtIndex {
        /// Recorded rotation index
        index: usize,
        /// Block size
        block_size: usize,
    },

    /// Non-zero bits left after the last LZW code
    #[error("Unable to decode the end of the LZW stream")]
    TrailingBits,

    /// Huffman tree construction failure
    #[error("Invalid Huffman node: {0}")]
    InvalidNode(String),

    /// Codec configuration out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn mismatch_detail(declared: &bool) -> &'static str {
    if *declared {
        "lacks its header"
    } else {
        "indicates it was applied"
    }
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CompressError>;

/// Tag of a BWT-wrapped segment
pub const BWT_MAGIC: &[u8] = b"BWT_";

/// Tag of an MTF-wrapped segment
pub const MTF_MAGIC: &[u8] = b"MTF_";

/// Tag of an RLE payload
pub const RLE_MAGIC: &[u8] = b"RLE_";

/// Tag of a Huffman payload
pub const HUFFMAN_MAGIC: &[u8] = b"HUFFMAN_";

/// Tag of an LZW payload
pub const LZW_MAGIC: &[u8] = b"LZW_";

/// Separator following the BWT padding field
pub const BWT_PADDING_SEPARATOR: u8 = b'_';

/// Block size shared by BWT encoder and decoder
pub const BWT_BLOCK_SIZE: usize = 512;

/// LZW dictionary ceiling (16-bit code space)
pub const LZW_MAX_DICT_SIZE: usize = 1 << 16;

/// Shortest run RLE encodes as a repeat
pub const RLE_MIN_RUN: u8 = 3;

/// Longest run or literal stretch a single RLE control byte covers
pub const RLE_MAX_RUN: usize = 127;

/// Size summary of a compression call
#[derive(Debug, Default, Clone)]
pub struct CompressionStats {
    /// Uncompressed size
    pub input_bytes: u64,
    /// Encoded size
    pub output_bytes: u64,
    /// `output_bytes / input_bytes`, zero for empty input
    pub compression_ratio: f64,
}

impl CompressionStats {
    /// Build the summary from the two buffer lengths
    pub fn new(input_bytes: usize, output_bytes: usize) -> Self {
        let compression_ratio = if input_bytes == 0 {
            0.0
        } else {
            output_bytes as f64 / input_bytes as f64
        };
        Self {
            input_bytes: input_bytes as u64,
            output_bytes: output_bytes as u64,
            compression_ratio,
        }
    }
}
