//! Byte-oriented run-length encoding
//!
//! The stream is a sequence of units, each led by a control byte:
//!
//! - `129..=255`: repeat the next byte `control - 128` times
//! - `1..=127`: copy the next `control` bytes verbatim
//! - `0` and `128` never appear; `0` is rejected on decode

use crate::common::{RLE_MAX_RUN, RLE_MIN_RUN};
use crate::{CompressError, Result};

/// Offset added to a run length to mark a repeat unit
const RUN_FLAG: u8 = 128;

/// Encoder tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleConfig {
    /// Shortest run written as a repeat unit
    pub min_run: u8,
}

impl Default for RleConfig {
    fn default() -> Self {
        Self {
            min_run: RLE_MIN_RUN,
        }
    }
}

impl RleConfig {
    /// Create a configuration with a custom minimum run length
    pub fn new(min_run: u8) -> Result<Self> {
        if min_run == 0 || min_run as usize > RLE_MAX_RUN {
            return Err(CompressError::InvalidConfig(format!(
                "RLE minimum run must be in 1..={RLE_MAX_RUN}, got {min_run}"
            )));
        }
        Ok(Self { min_run })
    }
}

struct RunWriter<'a> {
    data: &'a [u8],
    out: Vec<u8>,
}

impl RunWriter<'_> {
    fn literals(&mut self, begin: usize, end: usize) {
        if end > begin {
            self.out.push((end - begin) as u8);
            self.out.extend_from_slice(&self.data[begin..end]);
        }
    }

    fn repeat(&mut self, begin: usize, end: usize) {
        if end > begin {
            self.out.push(RUN_FLAG + (end - begin) as u8);
            self.out.push(self.data[begin]);
        }
    }

    /// Flush `begin..end`, the trailing `run` bytes of which form a repeat
    fn flush(&mut self, begin: usize, end: usize, run: usize) {
        self.literals(begin, end - run);
        self.repeat(end - run, end);
    }
}

/// Encode with the default minimum run of 3
pub fn encode(data: &[u8]) -> Vec<u8> {
    encode_with(data, &RleConfig::default())
}

/// Encode `data` into control/data units
pub fn encode_with(data: &[u8], config: &RleConfig) -> Vec<u8> {
    let Some(&first) = data.first() else {
        return Vec::new();
    };
    let min_run = config.min_run as usize;
    let qualifying = |run: usize| if run >= min_run { run } else { 0 };

    let mut writer = RunWriter {
        data,
        out: Vec::with_capacity(data.len() + data.len() / RLE_MAX_RUN + 2),
    };
    // Start of the pending segment and length of the run ending just before `pos`
    let mut begin = 0;
    let mut run = 1;
    let mut previous = first;

    for (pos, &byte) in data.iter().enumerate().skip(1) {
        let flush = if run == RLE_MAX_RUN || pos - begin == RLE_MAX_RUN {
            true
        } else if byte == previous {
            run += 1;
            false
        } else if run >= min_run {
            true
        } else {
            run = 1;
            false
        };

        if flush {
            writer.flush(begin, pos, qualifying(run));
            run = 1;
            begin = pos;
        }
        previous = byte;
    }
    writer.flush(begin, data.len(), qualifying(run));

    writer.out
}

/// Decode a control/data unit stream
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() * 2);
    let mut pos = 0;

    while pos < data.len() {
        let control = data[pos];
        pos += 1;
        let remaining = data.len() - pos;

        match control {
            0 | RUN_FLAG => return Err(CompressError::InvalidControlByte(control)),
            1..=127 => {
                let count = control as usize;
                if count > remaining {
                    return Err(CompressError::TruncatedRun {
                        needed: count,
                        remaining,
                    });
                }
                out.extend_from_slice(&data[pos..pos + count]);
                pos += count;
            }
            _ => {
                let Some(&byte) = data.get(pos) else {
                    return Err(CompressError::TruncatedRun {
                        needed: 1,
                        remaining,
                    });
                };
                out.resize(out.len() + (control - RUN_FLAG) as usize, byte);
                pos += 1;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_and_literals() {
        assert_eq!(
            encode(b"aaaaabbccccccc"),
            vec![133, b'a', 2, b'b', b'b', 135, b'c']
        );
        assert_eq!(encode(b"aaaaabbbccccccc"), vec![133, b'a', 131, b'b', 135, b'c']);
        assert_eq!(encode(b"abcc"), vec![4, b'a', b'b', b'c', b'c']);
        assert_eq!(encode(b"abccc"), vec![2, b'a', b'b', 131, b'c']);
    }

    #[test]
    fn test_run_limits() {
        assert_eq!(encode(&[b'x'; 127]), vec![255, b'x']);
        assert_eq!(encode(&[b'x'; 128]), vec![255, b'x', 1, b'x']);
        assert_eq!(encode(&[b'x'; 254]), vec![255, b'x', 255, b'x']);
    }

    #[test]
    fn test_literal_limit() {
        let data: Vec<u8> = (0..300).map(|i| (i % 251) as u8).collect();
        let encoded = encode(&data);
        assert_eq!(encoded[0], 127);
        assert_eq!(encoded[128], 127);
        assert_eq!(encoded[256], 46);
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_never_emits_zero_control() {
        let data: Vec<u8> = (0..2000).map(|i| ((i / 3) % 5) as u8).collect();
        let encoded = encode(&data);
        let mut pos = 0;
        while pos < encoded.len() {
            let control = encoded[pos];
            assert!(control != 0 && control != 128);
            pos += if control > 128 { 2 } else { control as usize + 1 };
        }
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_min_run_config() {
        let config = RleConfig::new(2).unwrap();
        assert_eq!(encode_with(b"aab", &config), vec![130, b'a', 1, b'b']);
        assert!(RleConfig::new(0).is_err());
        assert!(RleConfig::new(128).is_err());
    }

    #[test]
    fn test_empty_and_single() {
        assert!(encode(b"").is_empty());
        assert!(decode(b"").unwrap().is_empty());
        assert_eq!(encode(b"z"), vec![1, b'z']);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode(&[0, 1]),
            Err(CompressError::InvalidControlByte(0))
        ));
        assert!(matches!(
            decode(&[3, b'a', b'b']),
            Err(CompressError::TruncatedRun {
                needed: 3,
                remaining: 2
            })
        ));
        assert!(matches!(
            decode(&[130]),
            Err(CompressError::TruncatedRun { .. })
        ));
    }
}
