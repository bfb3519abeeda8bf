use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use oc8_codec::CompressorKind;
use oc8_frame::{DEFAULT_MAX_PAYLOAD, DEFAULT_MAX_SCAN_OFFSET};
use oc8_raster::{ChannelMode, PngCompression, DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MAX_WIDTH};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a file into PNG artifacts.
    Encode(EncodeArgs),
    /// Recover a file from PNG artifacts.
    Decode(DecodeArgs),
    /// Describe artifacts and check for a canonical frame header.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Channel layout as spelled on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Opaque3,
    Alpha4,
}

impl From<ModeArg> for ChannelMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Opaque3 => ChannelMode::Opaque3,
            ModeArg::Alpha4 => ChannelMode::AlphaStripped4,
        }
    }
}

/// Payload compressor as spelled on the command line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CompressorArg {
    #[default]
    Brotli,
    Zstd,
}

impl From<CompressorArg> for CompressorKind {
    fn from(arg: CompressorArg) -> Self {
        match arg {
            CompressorArg::Brotli => CompressorKind::Brotli,
            CompressorArg::Zstd => CompressorKind::Zstd,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum PngCompressionArg {
    #[default]
    Fast,
    Balanced,
    Best,
}

impl From<PngCompressionArg> for PngCompression {
    fn from(level: PngCompressionArg) -> Self {
        match level {
            PngCompressionArg::Fast => PngCompression::Fast,
            PngCompressionArg::Balanced => PngCompression::Balanced,
            PngCompressionArg::Best => PngCompression::Best,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// File to encode.
    pub input: PathBuf,
    /// Output prefix; parts are written as `<prefix>_partNN.png`.
    pub output_prefix: PathBuf,
    /// Maximum data bytes per image.
    #[arg(long, default_value_t = DEFAULT_MAX_IMAGE_BYTES)]
    pub max_image_bytes: usize,
    /// Payload compressor.
    #[arg(long, value_enum, default_value_t = CompressorArg::Brotli)]
    pub compressor: CompressorArg,
    /// Compression quality; brotli 0-11 (default 11), zstd 1-22 (default 19).
    #[arg(long, short = 'q')]
    pub quality: Option<i32>,
    /// Maximum image width in pixels.
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH)]
    pub max_width: u32,
    /// Write RGBA images with an opaque alpha channel.
    #[arg(long)]
    pub alpha: bool,
    /// PNG deflate effort.
    #[arg(long, value_enum, default_value_t = PngCompressionArg::Fast)]
    pub png_compression: PngCompressionArg,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Glob matching the artifacts, e.g. 'out/report_part*.png'.
    pub artifact_glob: String,
    /// Path to write the recovered file to.
    pub output: PathBuf,
    /// Payload compressor the artifacts were written with.
    #[arg(long, value_enum, default_value_t = CompressorArg::Brotli)]
    pub compressor: CompressorArg,
    /// Only accept the canonical layout; no reordering or offset scan.
    #[arg(long)]
    pub strict: bool,
    /// Highest header offset the scan will try.
    #[arg(long, default_value_t = DEFAULT_MAX_SCAN_OFFSET, env = "OC8_MAX_SCAN_OFFSET")]
    pub max_scan_offset: usize,
    /// Largest payload length accepted from a header.
    #[arg(long, default_value_t = DEFAULT_MAX_PAYLOAD)]
    pub max_payload: usize,
    /// Channel modes to try, in order (comma-separated).
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [ModeArg::Opaque3, ModeArg::Alpha4])]
    pub modes: Vec<ModeArg>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Glob matching the artifacts.
    pub artifact_glob: String,
    /// Number of leading sample bytes to show per artifact.
    #[arg(long, default_value_t = 16)]
    pub preview: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
