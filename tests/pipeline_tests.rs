//! End-to-end tests for the compression pipeline
//!
//! Every final coder is combined with every preprocessing choice and run over
//! inputs of different shapes.

use classic_compress::{
    compress, compress_named, compress_with_stats, decompress, decompress_named, inspect,
    Algorithm, CompressError, DecodeOptions, PipelineOptions, Stage,
};

fn option_grid() -> Vec<PipelineOptions> {
    let mut grid = Vec::new();
    for bwt in [false, true] {
        for mtf in [false, true] {
            grid.push(PipelineOptions::new().with_bwt(bwt).with_mtf(mtf));
        }
    }
    grid
}

fn round_trip_all(data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    for algorithm in Algorithm::ALL {
        for options in option_grid() {
            let compressed = compress(data, algorithm, options)?;
            let declared = decompress(&compressed, Some(algorithm), options)?;
            assert_eq!(declared, data, "{algorithm} {options:?} (declared)");
            let detected = decompress(&compressed, None, DecodeOptions::default())?;
            assert_eq!(detected, data, "{algorithm} {options:?} (detected)");
        }
    }
    Ok(())
}

#[test]
fn test_text_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let text = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis \
nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";
    round_trip_all(text)
}

#[test]
fn test_binary_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = (0..3000u32).map(|i| (i * 7 + i / 13) as u8).collect();
    round_trip_all(&data)
}

#[test]
fn test_edge_cases() -> Result<(), Box<dyn std::error::Error>> {
    // Empty input
    round_trip_all(b"")?;

    // Single byte
    round_trip_all(b"A")?;

    // Exactly one BWT block, and one byte over
    round_trip_all(&[b'x'; 512])?;
    round_trip_all(&[b'x'; 513])?;

    // Every byte value
    let all_bytes: Vec<u8> = (0..=255u8).collect();
    round_trip_all(&all_bytes)?;

    // Input that looks like a tag
    round_trip_all(b"RLE_HUFFMAN_LZW_")?;

    Ok(())
}

#[test]
fn test_repetitive_data() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"ABCD".repeat(2500);

    for algorithm in [Algorithm::Huffman, Algorithm::Lzw] {
        let compressed = compress(&data, algorithm, PipelineOptions::new())?;
        assert!(
            compressed.len() < data.len() / 2,
            "{algorithm} did not compress: {} -> {}",
            data.len(),
            compressed.len()
        );
        assert_eq!(decompress(&compressed, Some(algorithm), PipelineOptions::new())?, data);
    }

    // Long runs favour RLE
    let runs = vec![0u8; 10_000];
    let compressed = compress(&runs, Algorithm::Rle, PipelineOptions::new())?;
    assert!(compressed.len() < 200);

    Ok(())
}

#[test]
fn test_bwt_and_mtf_help_rle() -> Result<(), Box<dyn std::error::Error>> {
    let text = b"she sells sea shells by the sea shore ".repeat(12);

    let plain = compress(&text, Algorithm::Rle, PipelineOptions::new())?;
    let transformed = compress(
        &text,
        Algorithm::Rle,
        PipelineOptions::new().with_bwt(true).with_mtf(true),
    )?;
    assert!(transformed.len() < plain.len());

    Ok(())
}

#[test]
fn test_declaration_errors() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"declarations must agree with the tags";
    let compressed = compress(data, Algorithm::Huffman, PipelineOptions::new().with_mtf(true))?;

    assert!(matches!(
        decompress(&compressed, Some(Algorithm::Rle), DecodeOptions::default()),
        Err(CompressError::AlgorithmMismatch {
            declared: Algorithm::Rle,
            detected: Algorithm::Huffman
        })
    ));

    assert!(matches!(
        decompress(&compressed, None, PipelineOptions::new()),
        Err(CompressError::OptionMismatch {
            stage: Stage::Mtf,
            declared: false
        })
    ));

    assert!(matches!(
        decompress(
            &compressed,
            None,
            DecodeOptions {
                bwt: Some(true),
                mtf: None
            }
        ),
        Err(CompressError::OptionMismatch {
            stage: Stage::Bwt,
            declared: true
        })
    ));

    // Stripping the outer tag leaves nothing to detect
    assert!(matches!(
        decompress(&compressed[8..], None, DecodeOptions::default()),
        Err(CompressError::UnknownFormat)
    ));
    assert!(matches!(
        decompress(&compressed[8..], Some(Algorithm::Huffman), DecodeOptions::default()),
        Err(CompressError::MissingMagic { .. })
    ));

    Ok(())
}

#[test]
fn test_named_algorithms() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"names are case-insensitive";
    for name in ["rle", "Huffman", "LZW"] {
        let compressed = compress_named(data, name, PipelineOptions::new())?;
        let restored = decompress_named(&compressed, Some(name), DecodeOptions::default())?;
        assert_eq!(restored, data);
    }

    assert!(matches!(
        decompress_named(b"RLE_", Some("bzip2"), DecodeOptions::default()),
        Err(CompressError::UnknownAlgorithm(name)) if name == "bzip2"
    ));

    Ok(())
}

#[test]
fn test_stats_and_inspect() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"statistics ".repeat(100);
    let options = PipelineOptions::new().with_bwt(true);
    let (compressed, stats) = compress_with_stats(&data, Algorithm::Lzw, options)?;

    assert_eq!(stats.input_bytes, data.len() as u64);
    assert_eq!(stats.output_bytes, compressed.len() as u64);
    assert!(stats.compression_ratio > 0.0 && stats.compression_ratio < 1.0);

    let info = inspect(&compressed)?;
    assert_eq!(info.algorithm, Algorithm::Lzw);
    assert!(info.bwt);
    assert!(!info.mtf);

    Ok(())
}
