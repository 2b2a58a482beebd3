//! Huffman coding with an explicit frequency-table header
//!
//! Payload layout (magic tag excluded):
//!
//! ```text
//! 256 x { symbol: u8, frequency: u32 BE }   symbols in ascending order
//! original length: u32 BE
//! code bits, MSB-first, final byte zero-padded
//! ```

mod tree;

pub use tree::{CodeTable, HuffmanNode, HuffmanTree, NodeId};

use crate::bitstream::{BitReader, BitWriter};
use crate::{CompressError, Result};

/// Size of one frequency table entry on the wire
pub const ENTRY_SIZE: usize = 5;

/// Size of the header preceding the code bits
pub const HEADER_SIZE: usize = 256 * ENTRY_SIZE + 4;

/// Occurrence count of every byte value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl FrequencyTable {
    /// Count the bytes of `data`
    pub fn from_data(data: &[u8]) -> Result<Self> {
        if u32::try_from(data.len()).is_err() {
            return Err(CompressError::InvalidConfig(format!(
                "input of {} bytes exceeds the 32-bit Huffman length field",
                data.len()
            )));
        }
        let mut table = Self::default();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        Ok(table)
    }

    /// Build a table from explicit counts
    pub fn from_counts(counts: [u32; 256]) -> Self {
        Self { counts }
    }

    /// Counts indexed by byte value
    pub fn counts(&self) -> &[u32; 256] {
        &self.counts
    }

    /// Count for `symbol`
    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    fn write(&self, writer: &mut BitWriter) {
        for (symbol, count) in (0..=255u8).zip(self.counts) {
            writer.write_byte(symbol);
            writer.write_bytes(&count.to_be_bytes());
        }
    }

    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let mut counts = [0u32; 256];
        for (expected, count) in (0..=255u8).zip(counts.iter_mut()) {
            let found = reader.read_byte()?;
            if found != expected {
                return Err(CompressError::InvalidHuffmanHeader { expected, found });
            }
            *count = reader.read_u32_be()?;
        }
        Ok(Self { counts })
    }
}

/// Encode `data` as header plus packed codes
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    let frequencies = FrequencyTable::from_data(data)?;
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let codes = tree.code_table();

    let mut writer = BitWriter::with_capacity(HEADER_SIZE + data.len());
    frequencies.write(&mut writer);
    // from_data already bounded the length
    writer.write_bytes(&(data.len() as u32).to_be_bytes());
    for &byte in data {
        writer.write_bits(codes.code(byte));
    }

    log::trace!(
        "Huffman: {} symbols into {} code bits",
        data.len(),
        writer.bit_len() - HEADER_SIZE * 8
    );
    Ok(writer.into_bytes())
}

/// Decode a payload produced by [`encode`]
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data);
    let frequencies = FrequencyTable::read(&mut reader)?;
    let length = reader.read_u32_be()? as usize;
    let tree = HuffmanTree::from_frequencies(&frequencies)?;

    // Every symbol costs at least one bit
    let mut out = Vec::with_capacity(length.min(reader.remaining_bits()));
    for _ in 0..length {
        let mut at = tree.root();
        loop {
            at = tree.step(at, reader.read_bit()?);
            if let HuffmanNode::Leaf { symbol, .. } = *tree.node(at) {
                out.push(symbol);
                break;
            }
        }
    }

    Ok(out)
}
