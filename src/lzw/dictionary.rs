//! Decoder-side phrase table

use crate::{CompressError, Result};

/// Append-only list of phrases, indices 0..=255 pre-populated
#[derive(Debug)]
pub struct LzwDictionary {
    phrases: Vec<Vec<u8>>,
    previous: Option<Vec<u8>>,
    max_dict_size: usize,
}

impl LzwDictionary {
    /// Dictionary holding the 256 single-byte phrases
    pub fn new(max_dict_size: usize) -> Self {
        let mut phrases = Vec::with_capacity(max_dict_size.min(1 << 16));
        phrases.extend((0..=255u8).map(|byte| vec![byte]));
        Self {
            phrases,
            previous: None,
            max_dict_size,
        }
    }

    /// Number of stored phrases
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Never true: single-byte phrases are always present
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// True once no further phrase can be appended
    pub fn is_full(&self) -> bool {
        self.phrases.len() + 1 >= self.max_dict_size
    }

    /// Resolve a decoded index to its phrase and record the pending extension
    pub fn next(&mut self, index: usize) -> Result<&[u8]> {
        let phrase = match (self.phrases.get(index), &self.previous) {
            (Some(stored), _) => stored.clone(),
            // Code for the phrase being defined right now: previous + its own first byte
            (None, Some(previous)) if index == self.phrases.len() => {
                let mut phrase = previous.clone();
                phrase.push(previous[0]);
                phrase
            }
            _ => {
                return Err(CompressError::InvalidLzwIndex {
                    index,
                    dictionary_len: self.phrases.len(),
                })
            }
        };

        if let Some(mut extension) = self.previous.take() {
            if !self.is_full() {
                extension.push(phrase[0]);
                self.phrases.push(extension);
            }
        }

        Ok(self.previous.insert(phrase).as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bytes_preloaded() {
        let mut dictionary = LzwDictionary::new(1 << 16);
        assert_eq!(dictionary.len(), 256);
        assert_eq!(dictionary.next(b'x' as usize).unwrap(), b"x");
        // First code adds nothing; the second adds "x" + first byte
        assert_eq!(dictionary.len(), 256);
        assert_eq!(dictionary.next(b'y' as usize).unwrap(), b"y");
        assert_eq!(dictionary.len(), 257);
        assert_eq!(dictionary.next(256).unwrap(), b"xy");
    }

    #[test]
    fn test_self_referential_code() {
        let mut dictionary = LzwDictionary::new(1 << 16);
        dictionary.next(b'a' as usize).unwrap();
        assert_eq!(dictionary.next(256).unwrap(), b"aa");
        assert_eq!(dictionary.len(), 257);
    }

    #[test]
    fn test_invalid_indices() {
        let mut dictionary = LzwDictionary::new(1 << 16);
        assert!(matches!(
            dictionary.next(256),
            Err(CompressError::InvalidLzwIndex {
                index: 256,
                dictionary_len: 256
            })
        ));
        dictionary.next(0).unwrap();
        assert!(dictionary.next(300).is_err());
    }
}
