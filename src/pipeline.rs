//! Stage composition and framing
//!
//! Encoding applies, in order, the optional BWT stage, the optional MTF stage
//! and exactly one final coder. Each stage prefixes its output with a magic
//! tag, so the outermost tag names the final coder:
//!
//! ```text
//! RLE_ | HUFFMAN_ | LZW_  ( MTF_ ( BWT_ [padding '_'] blocks ) )
//! ```
//!
//! Decoding inverts the final coder, then inspects the result for `MTF_` and
//! `BWT_` tags in turn. Declared algorithm and stage flags are cross-checked
//! against the tags; any disagreement is an error rather than a guess.

use crate::common::{
    Algorithm, CompressionStats, DecodeOptions, PipelineOptions, Stage, BWT_MAGIC, MTF_MAGIC,
};
use crate::transform::{bwt, mtf};
use crate::{huffman, lzw, rle, CompressError, Result};

fn tagged(magic: &[u8], body: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(magic.len() + body.len());
    out.extend_from_slice(magic);
    out.extend(body);
    out
}

fn printable(magic: &[u8]) -> String {
    String::from_utf8_lossy(magic).into_owned()
}

/// Compress `data` with the selected preprocessing stages and final coder
pub fn compress(data: &[u8], algorithm: Algorithm, options: PipelineOptions) -> Result<Vec<u8>> {
    let mut stage = data.to_vec();

    if options.bwt {
        stage = tagged(BWT_MAGIC, bwt::forward(&stage));
        log::debug!("BWT stage: {} -> {} bytes", data.len(), stage.len());
    }

    if options.mtf {
        stage = tagged(MTF_MAGIC, mtf::transform(&stage));
        log::debug!("MTF stage: {} bytes", stage.len());
    }

    let body = match algorithm {
        Algorithm::Rle => rle::encode(&stage),
        Algorithm::Huffman => huffman::encode(&stage)?,
        Algorithm::Lzw => lzw::encode(&stage),
    };
    let out = tagged(algorithm.magic(), body);

    log::debug!(
        "{algorithm} stage: {} -> {} bytes (bwt: {}, mtf: {})",
        stage.len(),
        out.len(),
        options.bwt,
        options.mtf
    );
    Ok(out)
}

/// Compress and report the size summary
pub fn compress_with_stats(
    data: &[u8],
    algorithm: Algorithm,
    options: PipelineOptions,
) -> Result<(Vec<u8>, CompressionStats)> {
    let out = compress(data, algorithm, options)?;
    let stats = CompressionStats::new(data.len(), out.len());
    Ok((out, stats))
}

/// Pick the final coder from the declared name and the outermost tag
fn resolve_algorithm(data: &[u8], declared: Option<Algorithm>) -> Result<Algorithm> {
    match (declared, Algorithm::sniff(data)) {
        (Some(declared), Some(detected)) if declared != detected => {
            Err(CompressError::AlgorithmMismatch { declared, detected })
        }
        (Some(declared), None) => Err(CompressError::MissingMagic {
            expected: printable(declared.magic()),
        }),
        (_, Some(detected)) => Ok(detected),
        (None, None) => Err(CompressError::UnknownFormat),
    }
}

/// Decide whether a stage must be inverted
fn resolve_stage(stage: Stage, declared: Option<bool>, present: bool) -> Result<bool> {
    match (declared, present) {
        (Some(declared), present) if declared != present => {
            Err(CompressError::OptionMismatch { stage, declared })
        }
        _ => Ok(present),
    }
}

fn decode_final(data: &[u8], algorithm: Algorithm) -> Result<Vec<u8>> {
    let payload = &data[algorithm.magic().len()..];
    match algorithm {
        Algorithm::Rle => rle::decode(payload),
        Algorithm::Huffman => huffman::decode(payload),
        Algorithm::Lzw => lzw::decode(payload),
    }
}

/// Decompress a stream produced by [`compress`]
///
/// `algorithm = None` sniffs the final coder from the outermost tag.
///
/// Stage tags are not escaped. If the input to [`compress`] itself began
/// with `MTF_` or `BWT_` and that stage was not applied, decoding with the
/// flag declared `false` fails with [`CompressError::OptionMismatch`], and
/// decoding with the flag undeclared inverts a stage that was never applied
/// and returns the wrong bytes.
pub fn decompress(
    data: &[u8],
    algorithm: Option<Algorithm>,
    options: impl Into<DecodeOptions>,
) -> Result<Vec<u8>> {
    let options = options.into();
    let algorithm = resolve_algorithm(data, algorithm)?;
    let mut stage = decode_final(data, algorithm)?;
    log::debug!("{algorithm} stage: {} -> {} bytes", data.len(), stage.len());

    if resolve_stage(Stage::Mtf, options.mtf, stage.starts_with(MTF_MAGIC))? {
        stage = mtf::inverse_transform(&stage[MTF_MAGIC.len()..]);
        log::debug!("MTF stage inverted: {} bytes", stage.len());
    }

    if resolve_stage(Stage::Bwt, options.bwt, stage.starts_with(BWT_MAGIC))? {
        stage = bwt::inverse(&stage[BWT_MAGIC.len()..])?;
        log::debug!("BWT stage inverted: {} bytes", stage.len());
    }

    Ok(stage)
}

/// [`compress`] with a case-insensitive algorithm name
pub fn compress_named(data: &[u8], algorithm: &str, options: PipelineOptions) -> Result<Vec<u8>> {
    compress(data, algorithm.parse()?, options)
}

/// [`decompress`] with an optional case-insensitive algorithm name
pub fn decompress_named(
    data: &[u8],
    algorithm: Option<&str>,
    options: impl Into<DecodeOptions>,
) -> Result<Vec<u8>> {
    let algorithm = algorithm.map(str::parse).transpose()?;
    decompress(data, algorithm, options)
}

/// Stages found in an encoded stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    /// Final coder named by the outermost tag
    pub algorithm: Algorithm,
    /// MTF stage present
    pub mtf: bool,
    /// BWT stage present
    pub bwt: bool,
    /// Size of the stream after inverting the final coder
    pub inner_bytes: usize,
}

/// Identify the stages of an encoded stream
///
/// The final coder is inverted (and MTF, if present) to look for the inner
/// tags; the BWT stage itself is not inverted.
pub fn inspect(data: &[u8]) -> Result<FrameInfo> {
    let algorithm = resolve_algorithm(data, None)?;
    let inner = decode_final(data, algorithm)?;
    let inner_bytes = inner.len();

    let mtf = inner.starts_with(MTF_MAGIC);
    let bwt = if mtf {
        let mut alphabet = mtf::MtfAlphabet::new();
        let head = &inner[MTF_MAGIC.len()..];
        let head = &head[..head.len().min(BWT_MAGIC.len())];
        mtf::decode(head, &mut alphabet).starts_with(BWT_MAGIC)
    } else {
        inner.starts_with(BWT_MAGIC)
    };

    Ok(FrameInfo {
        algorithm,
        mtf,
        bwt,
        inner_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"It was the best of times, it was the worst of times.";

    fn all_options() -> [PipelineOptions; 4] {
        [
            PipelineOptions::new(),
            PipelineOptions::new().with_mtf(true),
            PipelineOptions::new().with_bwt(true),
            PipelineOptions::new().with_bwt(true).with_mtf(true),
        ]
    }

    #[test]
    fn test_round_trip_every_combination() {
        for algorithm in Algorithm::ALL {
            for options in all_options() {
                let encoded = compress(SAMPLE, algorithm, options).unwrap();
                assert!(encoded.starts_with(algorithm.magic()));
                assert_eq!(decompress(&encoded, Some(algorithm), options).unwrap(), SAMPLE);
                assert_eq!(
                    decompress(&encoded, None, DecodeOptions::default()).unwrap(),
                    SAMPLE
                );
            }
        }
    }

    #[test]
    fn test_rle_example() {
        let encoded = compress(b"aaaaabbccccccc", Algorithm::Rle, PipelineOptions::new()).unwrap();
        assert_eq!(encoded, b"RLE_\x85a\x02bb\x87c".to_vec());
    }

    #[test]
    fn test_algorithm_mismatch() {
        let encoded = compress(SAMPLE, Algorithm::Rle, PipelineOptions::new()).unwrap();
        assert!(matches!(
            decompress(&encoded, Some(Algorithm::Lzw), PipelineOptions::new()),
            Err(CompressError::AlgorithmMismatch {
                declared: Algorithm::Lzw,
                detected: Algorithm::Rle
            })
        ));
    }

    #[test]
    fn test_missing_and_unknown_magic() {
        assert!(matches!(
            decompress(b"\x01a", Some(Algorithm::Rle), PipelineOptions::new()),
            Err(CompressError::MissingMagic { .. })
        ));
        assert!(matches!(
            decompress(b"garbage", None, DecodeOptions::default()),
            Err(CompressError::UnknownFormat)
        ));
    }

    #[test]
    fn test_stage_flag_mismatch() {
        let plain = compress(SAMPLE, Algorithm::Huffman, PipelineOptions::new()).unwrap();
        assert!(matches!(
            decompress(&plain, None, PipelineOptions::new().with_bwt(true)),
            Err(CompressError::OptionMismatch {
                stage: Stage::Bwt,
                declared: true
            })
        ));
        assert!(matches!(
            decompress(&plain, None, PipelineOptions::new().with_mtf(true)),
            Err(CompressError::OptionMismatch {
                stage: Stage::Mtf,
                declared: true
            })
        ));

        let with_mtf =
            compress(SAMPLE, Algorithm::Lzw, PipelineOptions::new().with_mtf(true)).unwrap();
        assert!(matches!(
            decompress(&with_mtf, None, PipelineOptions::new()),
            Err(CompressError::OptionMismatch {
                stage: Stage::Mtf,
                declared: false
            })
        ));
    }

    #[test]
    fn test_raw_input_with_stage_tag() {
        let data = b"MTF_abc";
        let encoded = compress(data, Algorithm::Rle, PipelineOptions::new()).unwrap();

        assert!(matches!(
            decompress(&encoded, None, PipelineOptions::new()),
            Err(CompressError::OptionMismatch {
                stage: Stage::Mtf,
                declared: false
            })
        ));
        // The tag is taken at face value when nothing is declared
        let decoded = decompress(&encoded, None, DecodeOptions::default()).unwrap();
        assert_ne!(decoded, data.to_vec());
        assert_eq!(decoded, mtf::inverse_transform(b"abc"));
    }

    #[test]
    fn test_named_entry_points() {
        let encoded = compress_named(SAMPLE, "huffman", PipelineOptions::new()).unwrap();
        assert!(encoded.starts_with(b"HUFFMAN_"));
        assert_eq!(
            decompress_named(&encoded, Some("HUFFMAN"), PipelineOptions::new()).unwrap(),
            SAMPLE
        );
        assert!(matches!(
            compress_named(SAMPLE, "zip", PipelineOptions::new()),
            Err(CompressError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_stats() {
        let data = vec![b'z'; 1000];
        let (encoded, stats) =
            compress_with_stats(&data, Algorithm::Rle, PipelineOptions::new()).unwrap();
        assert_eq!(stats.input_bytes, 1000);
        assert_eq!(stats.output_bytes, encoded.len() as u64);
        assert!(stats.compression_ratio < 0.1);
    }

    #[test]
    fn test_inspect() {
        for options in all_options() {
            let encoded = compress(SAMPLE, Algorithm::Lzw, options).unwrap();
            let info = inspect(&encoded).unwrap();
            assert_eq!(info.algorithm, Algorithm::Lzw);
            assert_eq!(info.mtf, options.mtf);
            assert_eq!(info.bwt, options.bwt);
        }
    }
}
