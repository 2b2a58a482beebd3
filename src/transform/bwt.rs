//! Block Burrows-Wheeler transform
//!
//! Input is cut into fixed-size blocks, the last one zero-padded. Each block
//! is replaced by the last column of its sorted rotation matrix followed by
//! the row index of the original block, stored big-endian in the fewest bytes
//! able to hold the block size.
//!
//! Payload layout (magic tag excluded):
//!
//! ```text
//! [padding: index_size bytes BE] ['_']   only when padding > 0
//! { last column: block_size bytes } { rotation index: index_size bytes BE } ...
//! ```

use super::radix;
use crate::bitstream::{bit_length, bytes_for_bits};
use crate::common::{BWT_BLOCK_SIZE, BWT_PADDING_SEPARATOR};
use crate::{CompressError, Result};

/// Block geometry shared by encoder and decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BwtConfig {
    /// Bytes per block
    pub block_size: usize,
}

impl Default for BwtConfig {
    fn default() -> Self {
        Self {
            block_size: BWT_BLOCK_SIZE,
        }
    }
}

impl BwtConfig {
    /// Create a configuration with a custom block size
    pub fn new(block_size: usize) -> Result<Self> {
        if block_size < 2 {
            return Err(CompressError::InvalidConfig(format!(
                "BWT block size must be at least 2, got {block_size}"
            )));
        }
        Ok(Self { block_size })
    }

    /// Bytes used for a rotation index or the padding field
    pub fn index_size(&self) -> usize {
        bytes_for_bits(bit_length(self.block_size))
    }

    /// Encoded size of one block
    pub fn unit_size(&self) -> usize {
        self.block_size + self.index_size()
    }

    /// Size of the padding header when present
    pub fn padding_header_size(&self) -> usize {
        self.index_size() + 1
    }
}

fn write_be(out: &mut Vec<u8>, value: usize, width: usize) {
    for shift in (0..width).rev() {
        out.push((value >> (shift * 8)) as u8);
    }
}

fn read_be(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .fold(0usize, |acc, &byte| (acc << 8) | byte as usize)
}

/// Transform one block, returning its last column and the original rotation's row
pub fn transform_block(block: &[u8]) -> (Vec<u8>, usize) {
    let n = block.len();
    if n == 0 {
        return (Vec::new(), 0);
    }

    let rotations: Vec<usize> = (0..n).collect();
    let sorted = radix::sort_order(&rotations, |&offset, position| {
        (position < n).then(|| block[(offset + position) % n])
    });

    let mut index = 0;
    let mut last_column = Vec::with_capacity(n);
    for (row, &rotation) in sorted.iter().enumerate() {
        if rotation == 0 {
            index = row;
        }
        last_column.push(block[(rotation + n - 1) % n]);
    }
    (last_column, index)
}

/// Rebuild a block from its last column and rotation row via LF mapping
pub fn inverse_block(last_column: &[u8], index: usize) -> Result<Vec<u8>> {
    let n = last_column.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if index >= n {
        return Err(CompressError::InvalidBwtIndex {
            index,
            block_size: n,
        });
    }

    // Stable sort of positions by symbol gives the first column; its inverse is the LF map
    let positions: Vec<usize> = (0..n).collect();
    let first_column = radix::sort_order(&positions, |&position, digit| {
        (digit == 0).then(|| last_column[position])
    });
    let mut rank = vec![0usize; n];
    for (row, &position) in first_column.iter().enumerate() {
        rank[position] = row;
    }

    let mut block = vec![0u8; n];
    let mut row = index;
    for slot in block.iter_mut().rev() {
        *slot = last_column[row];
        row = rank[row];
    }
    Ok(block)
}

/// Apply the transform to `data` using the default block size
pub fn forward(data: &[u8]) -> Vec<u8> {
    forward_with(data, &BwtConfig::default())
}

/// Apply the transform to `data`, emitting the padding header and every block
pub fn forward_with(data: &[u8], config: &BwtConfig) -> Vec<u8> {
    let block_size = config.block_size;
    let index_size = config.index_size();
    let remainder = data.len() % block_size;
    let padding = if remainder == 0 {
        0
    } else {
        block_size - remainder
    };
    let blocks = data.len().div_ceil(block_size);

    let mut out = Vec::with_capacity(config.padding_header_size() + blocks * config.unit_size());
    if padding > 0 {
        write_be(&mut out, padding, index_size);
        out.push(BWT_PADDING_SEPARATOR);
    }

    let mut padded = data.to_vec();
    padded.resize(data.len() + padding, 0);
    for block in padded.chunks(block_size) {
        let (last_column, index) = transform_block(block);
        out.extend_from_slice(&last_column);
        write_be(&mut out, index, index_size);
    }

    log::trace!(
        "BWT: {} bytes in {} blocks, {} bytes of padding",
        data.len(),
        blocks,
        padding
    );
    out
}

/// Split off the padding header, if the payload carries one
fn split_padding<'a>(payload: &'a [u8], config: &BwtConfig) -> (usize, &'a [u8]) {
    let index_size = config.index_size();
    let header_size = config.padding_header_size();
    if payload.len() % config.unit_size() != header_size {
        return (0, payload);
    }
    let padding = read_be(&payload[..index_size]);
    if (1..config.block_size).contains(&padding) && payload[index_size] == BWT_PADDING_SEPARATOR {
        (padding, &payload[header_size..])
    } else {
        (0, payload)
    }
}

/// Invert [`forward`]
pub fn inverse(payload: &[u8]) -> Result<Vec<u8>> {
    inverse_with(payload, &BwtConfig::default())
}

/// Invert [`forward_with`], stripping the recorded padding from the end
pub fn inverse_with(payload: &[u8], config: &BwtConfig) -> Result<Vec<u8>> {
    let block_size = config.block_size;
    let unit = config.unit_size();
    let (padding, blocks) = split_padding(payload, config);

    if blocks.len() % unit != 0 {
        return Err(CompressError::InvalidBlockLength {
            length: blocks.len(),
            unit,
        });
    }

    let mut out = Vec::with_capacity(blocks.len() / unit * block_size);
    for encoded in blocks.chunks(unit) {
        let (last_column, index) = encoded.split_at(block_size);
        out.extend_from_slice(&inverse_block(last_column, read_be(index))?);
    }

    if padding > out.len() {
        return Err(CompressError::InvalidBlockLength {
            length: blocks.len(),
            unit,
        });
    }
    out.truncate(out.len() - padding);
    Ok(out)
}
