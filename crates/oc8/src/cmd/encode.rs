use oc8_codec::{encode_file, Compressor, CompressorKind, EncodeConfig};
use oc8_raster::{ChannelMode, RasterConfig};
use serde::Serialize;

use crate::cmd::EncodeArgs;
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{print_json, print_raw_lines, table, OutputFormat};

#[derive(Serialize)]
struct PartOutput {
    index: usize,
    path: String,
    width: u32,
    height: u32,
    png_bytes: usize,
}

#[derive(Serialize)]
struct EncodeOutput {
    input: String,
    input_bytes: usize,
    compressed_bytes: usize,
    frame_bytes: usize,
    compressor: &'static str,
    quality: i32,
    mode: &'static str,
    parts: Vec<PartOutput>,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = config_from_args(&args);
    let written = encode_file(&args.input, &args.output_prefix, &config)
        .map_err(|err| codec_error("encode failed", err))?;

    let parts = written
        .encoded
        .artifacts
        .iter()
        .zip(&written.paths)
        .map(|(artifact, path)| PartOutput {
            index: artifact.index,
            path: path.display().to_string(),
            width: artifact.width,
            height: artifact.height,
            png_bytes: artifact.png.len(),
        })
        .collect();

    let out = EncodeOutput {
        input: args.input.display().to_string(),
        input_bytes: written.encoded.input_len,
        compressed_bytes: written.encoded.compressed_len,
        frame_bytes: written.encoded.frame_len,
        compressor: config.compressor.as_str(),
        quality: config.quality,
        mode: config.raster.mode.as_str(),
        parts,
    };
    print_encode(&out, format);
    Ok(SUCCESS)
}

fn config_from_args(args: &EncodeArgs) -> EncodeConfig {
    let compressor = CompressorKind::from(args.compressor);
    EncodeConfig {
        compressor,
        quality: args.quality.unwrap_or_else(|| compressor.default_quality()),
        raster: RasterConfig {
            max_image_bytes: args.max_image_bytes,
            max_width: args.max_width,
            mode: if args.alpha {
                ChannelMode::AlphaStripped4
            } else {
                ChannelMode::Opaque3
            },
            compression: args.png_compression.into(),
        },
    }
}

fn print_encode(out: &EncodeOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut parts = table(["PART", "PATH", "SIZE", "PNG BYTES"]);
            for part in &out.parts {
                parts.add_row(vec![
                    part.index.to_string(),
                    part.path.clone(),
                    format!("{}x{}", part.width, part.height),
                    part.png_bytes.to_string(),
                ]);
            }
            println!("{parts}");
            println!(
                "{} bytes -> {} compressed, {} part(s), mode {}",
                out.input_bytes,
                out.compressed_bytes,
                out.parts.len(),
                out.mode
            );
        }
        OutputFormat::Pretty => {
            println!("Encoded {}:", out.input);
            println!("  Input:      {} bytes", out.input_bytes);
            println!(
                "  Compressed: {} bytes ({} q{})",
                out.compressed_bytes, out.compressor, out.quality
            );
            println!("  Frame:      {} bytes", out.frame_bytes);
            println!("  Mode:       {}", out.mode);
            for part in &out.parts {
                println!(
                    "  Part {:02}:    {} ({}x{}, {} bytes)",
                    part.index, part.path, part.width, part.height, part.png_bytes
                );
            }
        }
        OutputFormat::Raw => print_raw_lines(out.parts.iter().map(|p| p.path.as_str())),
    }
}
