//! BitReader - bounds-checked MSB-first bit source

use crate::{CompressError, Result};

/// Reads bits and bytes from a borrowed buffer
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    byte_offset: usize,
    /// Position of the next bit inside the current byte, always in `0..8`
    bit_offset: u8,
    total_bits: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_offset: 0,
            bit_offset: 0,
            total_bits: data.len() * 8,
        }
    }

    /// Bits consumed so far
    pub fn position(&self) -> usize {
        self.byte_offset * 8 + self.bit_offset as usize
    }

    /// Bits left before the end of the stream
    pub fn remaining_bits(&self) -> usize {
        self.total_bits - self.position()
    }

    /// True once every bit has been consumed
    pub fn is_at_end(&self) -> bool {
        self.remaining_bits() == 0
    }

    fn ensure(&self, requested: usize) -> Result<()> {
        let remaining = self.remaining_bits();
        if requested > remaining {
            return Err(CompressError::UnexpectedEof {
                requested,
                remaining,
            });
        }
        Ok(())
    }

    fn take_bit(&mut self) -> bool {
        let bit = (self.data[self.byte_offset] >> (7 - self.bit_offset)) & 1 == 1;
        self.bit_offset += 1;
        if self.bit_offset == 8 {
            self.bit_offset = 0;
            self.byte_offset += 1;
        }
        bit
    }

    fn take_byte(&mut self) -> u8 {
        let high = self.data[self.byte_offset];
        self.byte_offset += 1;
        if self.bit_offset == 0 {
            return high;
        }
        let low = self.data[self.byte_offset];
        (high << self.bit_offset) | (low >> (8 - self.bit_offset))
    }

    /// Read one bit
    pub fn read_bit(&mut self) -> Result<bool> {
        self.ensure(1)?;
        Ok(self.take_bit())
    }

    /// Read eight bits as a byte
    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure(8)?;
        Ok(self.take_byte())
    }

    /// Read `count` bits
    pub fn read_bits(&mut self, count: usize) -> Result<Vec<bool>> {
        self.ensure(count)?;
        Ok((0..count).map(|_| self.take_bit()).collect())
    }

    /// Read `count` bytes
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.ensure(count.saturating_mul(8))?;
        Ok((0..count).map(|_| self.take_byte()).collect())
    }

    /// Read a `width`-bit unsigned value, most significant bit first
    pub fn read_value(&mut self, width: u32) -> Result<u64> {
        debug_assert!(width <= 64);
        self.ensure(width as usize)?;
        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 1) | self.take_bit() as u64;
        }
        Ok(value)
    }

    /// Read a big-endian `u32` spanning four bytes
    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.ensure(32)?;
        let bytes = [
            self.take_byte(),
            self.take_byte(),
            self.take_byte(),
            self.take_byte(),
        ];
        Ok(u32::from_be_bytes(bytes))
    }

    /// Drain every remaining bit
    pub fn read_all_bits(&mut self) -> Vec<bool> {
        let remaining = self.remaining_bits();
        (0..remaining).map(|_| self.take_bit()).collect()
    }
}
