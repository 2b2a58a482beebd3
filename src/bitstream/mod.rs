//! Bit-level I/O over in-memory byte buffers
//!
//! Bits are packed most-significant first within each byte. The writer grows
//! its buffer lazily and zero-pads the trailing partial byte; the reader
//! refuses any read that would cross the end of the buffer before consuming
//! anything.

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

/// Number of bits needed to represent `value` (zero for zero)
pub const fn bit_length(value: usize) -> u32 {
    usize::BITS - value.leading_zeros()
}

/// Number of whole bytes needed to hold `bits` bits
pub const fn bytes_for_bits(bits: u32) -> usize {
    bits.div_ceil(8) as usize
}
