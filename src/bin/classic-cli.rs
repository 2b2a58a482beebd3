//! classic-cli - Command-line interface for classic-compress
//!
//! Compresses and decompresses files with RLE, Huffman or LZW, optionally
//! preceded by the BWT and MTF stages.

use clap::{Parser, Subcommand, ValueEnum};
use classic_compress::{
    compress_with_stats, decompress, inspect, Algorithm, DecodeOptions, PipelineOptions,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

/// Inputs above this size get a progress bar
const PROGRESS_THRESHOLD: usize = 1024 * 1024;

#[derive(Parser)]
#[command(name = "classic-cli")]
#[command(about = "A CLI tool for RLE, Huffman and LZW compression with BWT/MTF preprocessing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Final coder
        #[arg(short, long, value_enum, default_value_t = CliAlgorithm::Huffman)]
        algorithm: CliAlgorithm,

        /// Apply the Burrows-Wheeler transform first
        #[arg(long)]
        bwt: bool,

        /// Apply the move-to-front transform before the final coder
        #[arg(long)]
        mtf: bool,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a file
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Expected final coder (detected from the header when omitted)
        #[arg(short, long, value_enum)]
        algorithm: Option<CliAlgorithm>,

        /// Declare whether the BWT stage was applied
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        bwt: Option<bool>,

        /// Declare whether the MTF stage was applied
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        mtf: Option<bool>,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliAlgorithm {
    /// Run-length encoding
    Rle,
    /// Huffman coding - Default
    Huffman,
    /// Lempel-Ziv-Welch
    Lzw,
}

impl From<CliAlgorithm> for Algorithm {
    fn from(algorithm: CliAlgorithm) -> Self {
        match algorithm {
            CliAlgorithm::Rle => Algorithm::Rle,
            CliAlgorithm::Huffman => Algorithm::Huffman,
            CliAlgorithm::Lzw => Algorithm::Lzw,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            algorithm,
            bwt,
            mtf,
            force,
        } => compress_file(
            &input,
            &output,
            algorithm.into(),
            PipelineOptions::new().with_bwt(bwt).with_mtf(mtf),
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Decompress {
            input,
            output,
            algorithm,
            bwt,
            mtf,
            force,
        } => decompress_file(
            &input,
            &output,
            algorithm.map(Algorithm::from),
            DecodeOptions { bwt, mtf },
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn check_paths(input: &Path, output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    Ok(())
}

fn read_input(path: &Path) -> classic_compress::Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

fn write_output(path: &Path, data: &[u8]) -> classic_compress::Result<()> {
    Ok(fs::write(path, data)?)
}

fn progress_bar(
    size: usize,
    quiet: bool,
    message: &'static str,
) -> Result<Option<ProgressBar>, Box<dyn std::error::Error>> {
    if quiet || size <= PROGRESS_THRESHOLD {
        return Ok(None);
    }

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb.inc(1);
    Ok(Some(pb))
}

fn compress_file(
    input: &Path,
    output: &Path,
    algorithm: Algorithm,
    options: PipelineOptions,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!(
            "Algorithm: {}, BWT: {}, MTF: {}",
            algorithm, options.bwt, options.mtf
        );
    }

    let start_time = Instant::now();

    let input_data = read_input(input)?;
    let input_size = input_data.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet, "Compressing...")?;

    let (compressed_data, stats) = compress_with_stats(&input_data, algorithm, options)
        .map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    write_output(output, &compressed_data)?;

    let compression_time = start_time.elapsed();
    let compression_ratio = stats.compression_ratio * 100.0;

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", stats.input_bytes);
        println!("  Output: {} bytes", stats.output_bytes);
        println!("  Ratio:  {:.1}%", compression_ratio);
        println!("  Time:   {:.2?}", compression_time);

        if compression_ratio > 100.0 {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    algorithm: Option<Algorithm>,
    options: DecodeOptions,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    let compressed_data = read_input(input)?;
    let input_size = compressed_data.len();

    if verbose {
        println!("Compressed size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet, "Decompressing...")?;

    let decompressed_data = decompress(&compressed_data, algorithm, options)
        .map_err(|e| format!("Decompression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    write_output(output, &decompressed_data)?;

    let decompression_time = start_time.elapsed();
    let output_size = decompressed_data.len();

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        if output_size > 0 {
            let compression_ratio = (input_size as f64 / output_size as f64) * 100.0;
            println!("  Ratio:  {:.1}%", compression_ratio);
        }
        println!("  Time:   {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = read_input(input)?;
    let file_size = data.len();

    println!("Compressed File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);

    if verbose {
        let head = &data[..data.len().min(8)];
        let hex: Vec<String> = head.iter().map(|b| format!("{:02x}", b)).collect();
        println!("  Header bytes: {}", hex.join(" "));
    }

    let info = match inspect(&data) {
        Ok(info) => info,
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted file");
            if verbose {
                println!("  Error: {}", e);
            }
            return Ok(());
        }
    };

    println!("  Algorithm: {}", info.algorithm);
    println!("  MTF stage: {}", if info.mtf { "yes" } else { "no" });
    println!("  BWT stage: {}", if info.bwt { "yes" } else { "no" });

    match decompress(&data, Some(info.algorithm), DecodeOptions::default()) {
        Ok(decompressed) => {
            let decompressed_size = decompressed.len();
            println!("  Decompressed Size: {} bytes", decompressed_size);
            if decompressed_size > 0 {
                let compression_ratio = (file_size as f64 / decompressed_size as f64) * 100.0;
                println!("  Compression Ratio: {:.1}%", compression_ratio);
            }
            println!("  Status: ✓ Valid file");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
