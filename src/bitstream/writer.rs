//! BitWriter - growable MSB-first bit sink

/// Appends bits and bytes to an owned buffer
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    buffer: Vec<u8>,
    /// Position of the next bit inside the last byte, always in `0..8`
    bit_offset: u8,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `bytes` bytes
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(bytes),
            bit_offset: 0,
        }
    }

    /// Append a single bit
    pub fn write_bit(&mut self, bit: bool) {
        if self.bit_offset == 0 {
            self.buffer.push(0);
        }
        if bit {
            if let Some(last) = self.buffer.last_mut() {
                *last |= 0x80 >> self.bit_offset;
            }
        }
        self.bit_offset = (self.bit_offset + 1) & 7;
    }

    /// Append eight bits, splitting the byte across two buffer bytes when unaligned
    pub fn write_byte(&mut self, value: u8) {
        if self.bit_offset == 0 {
            self.buffer.push(value);
            return;
        }
        if let Some(last) = self.buffer.last_mut() {
            *last |= value >> self.bit_offset;
        }
        self.buffer.push(value << (8 - self.bit_offset));
    }

    /// Append a sequence of bits
    pub fn write_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.write_bit(bit);
        }
    }

    /// Append a sequence of bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.bit_offset == 0 {
            self.buffer.extend_from_slice(bytes);
            return;
        }
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Append the low `width` bits of `value`, most significant first
    pub fn write_value(&mut self, value: u64, width: u32) {
        debug_assert!(width <= 64);
        for shift in (0..width).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    /// Number of bits written so far
    pub fn bit_len(&self) -> usize {
        if self.bit_offset == 0 {
            self.buffer.len() * 8
        } else {
            (self.buffer.len() - 1) * 8 + self.bit_offset as usize
        }
    }

    /// Finish writing; the trailing partial byte is zero-padded
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}
