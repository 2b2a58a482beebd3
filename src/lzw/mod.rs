//! Lempel-Ziv-Welch coding with growing code width
//!
//! Codes are written MSB-first with no header. The n-th code (counting from
//! zero) is `bit_length(min(255 + n, max_dict_size - 1))` bits wide: 8 bits
//! for the first code, then one bit more each time the dictionary crosses a
//! power of two. While the dictionary grows this equals
//! `bit_length(phrases - 2)` on the encoder side and `bit_length(len)` on the
//! decoder side. Decoding stops when fewer bits than the current width
//! remain, and those leftover bits must be zero.

mod dictionary;
mod trie;

pub use dictionary::LzwDictionary;
pub use trie::LzwTrie;

use crate::bitstream::{bit_length, BitReader, BitWriter};
use crate::common::LZW_MAX_DICT_SIZE;
use crate::{CompressError, Result};

/// Dictionary sizing shared by encoder and decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Dictionary ceiling; at most `max_dict_size - 1` phrases are ever assigned
    pub max_dict_size: usize,
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self {
            max_dict_size: LZW_MAX_DICT_SIZE,
        }
    }
}

impl LzwConfig {
    /// Largest accepted ceiling (24-bit codes)
    pub const MAX: usize = 1 << 24;

    /// Create a configuration with a custom dictionary ceiling
    pub fn new(max_dict_size: usize) -> Result<Self> {
        if !(257..=Self::MAX).contains(&max_dict_size) {
            return Err(CompressError::InvalidConfig(format!(
                "LZW dictionary size must be in 257..={}, got {max_dict_size}",
                Self::MAX
            )));
        }
        Ok(Self { max_dict_size })
    }

    /// Widest code the configuration can produce
    pub fn max_code_width(&self) -> u32 {
        bit_length(self.max_dict_size - 1)
    }

    /// Width of the code following `emitted` earlier codes
    pub fn code_width(&self, emitted: usize) -> u32 {
        bit_length((255 + emitted).min(self.max_dict_size - 1))
    }
}

/// Encode with the default 65536-entry ceiling
pub fn encode(data: &[u8]) -> Vec<u8> {
    encode_with(data, &LzwConfig::default())
}

/// Encode `data` as a packed sequence of variable-width codes
pub fn encode_with(data: &[u8], config: &LzwConfig) -> Vec<u8> {
    let mut trie = LzwTrie::new(config.max_dict_size);
    let mut writer = BitWriter::with_capacity(data.len());
    let mut codes = 0usize;

    for &byte in data {
        if let Some(index) = trie.next(byte) {
            writer.write_value(index as u64, config.code_width(codes));
            codes += 1;
        }
    }

    if let Some(index) = trie.pending() {
        writer.write_value(index as u64, config.code_width(codes));
        codes += 1;
    }

    log::trace!(
        "LZW: {} bytes into {} codes, {} phrases",
        data.len(),
        codes,
        trie.phrases()
    );
    writer.into_bytes()
}

/// Decode with the default 65536-entry ceiling
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    decode_with(data, &LzwConfig::default())
}

/// Decode a code stream produced by [`encode_with`] with the same configuration
pub fn decode_with(data: &[u8], config: &LzwConfig) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data);
    let mut dictionary = LzwDictionary::new(config.max_dict_size);
    let mut out = Vec::with_capacity(data.len() * 2);
    let mut codes = 0;
    let mut width = config.code_width(codes);

    while reader.remaining_bits() >= width as usize {
        let index = reader.read_value(width)? as usize;
        out.extend_from_slice(dictionary.next(index)?);
        codes += 1;
        width = config.code_width(codes);
    }

    if reader.read_all_bits().into_iter().any(|bit| bit) {
        return Err(CompressError::TrailingBits);
    }
    Ok(out)
}
