//! Move-to-front transform over the 256-symbol byte alphabet

/// Working alphabet order shared by one encode or decode pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MtfAlphabet {
    symbols: [u8; 256],
}

impl Default for MtfAlphabet {
    fn default() -> Self {
        Self::new()
    }
}

impl MtfAlphabet {
    /// Alphabet in canonical order 0, 1, ..., 255
    pub fn new() -> Self {
        let mut symbols = [0u8; 256];
        for (slot, symbol) in symbols.iter_mut().zip(0..=255u8) {
            *slot = symbol;
        }
        Self { symbols }
    }

    /// Restore canonical order
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current symbol order
    pub fn symbols(&self) -> &[u8; 256] {
        &self.symbols
    }

    fn move_to_front(&mut self, rank: usize) {
        let symbol = self.symbols[rank];
        self.symbols.copy_within(0..rank, 1);
        self.symbols[0] = symbol;
    }

    /// Emit the rank of `symbol` and move it to the front
    pub fn encode_symbol(&mut self, symbol: u8) -> u8 {
        // Every byte value is present, so the search always succeeds
        let rank = self
            .symbols
            .iter()
            .position(|&s| s == symbol)
            .unwrap_or_default();
        self.move_to_front(rank);
        rank as u8
    }

    /// Emit the symbol at `rank` and move it to the front
    pub fn decode_rank(&mut self, rank: u8) -> u8 {
        let symbol = self.symbols[rank as usize];
        self.move_to_front(rank as usize);
        symbol
    }
}

/// Rank-encode `data`, evolving `alphabet`
pub fn encode(data: &[u8], alphabet: &mut MtfAlphabet) -> Vec<u8> {
    data.iter().map(|&byte| alphabet.encode_symbol(byte)).collect()
}

/// Invert [`encode`], evolving `alphabet`
pub fn decode(ranks: &[u8], alphabet: &mut MtfAlphabet) -> Vec<u8> {
    ranks.iter().map(|&rank| alphabet.decode_rank(rank)).collect()
}

/// Rank-encode `data` from a fresh alphabet
pub fn transform(data: &[u8]) -> Vec<u8> {
    encode(data, &mut MtfAlphabet::new())
}

/// Invert [`transform`] from a fresh alphabet
pub fn inverse_transform(ranks: &[u8]) -> Vec<u8> {
    decode(ranks, &mut MtfAlphabet::new())
}
