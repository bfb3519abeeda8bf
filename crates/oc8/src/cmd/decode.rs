use oc8_codec::{decode_glob, DecodeConfig};
use oc8_frame::FrameConfig;
use serde::Serialize;

use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{print_json, print_raw_lines, table, OutputFormat};

#[derive(Serialize)]
struct DecodeOutput {
    output: String,
    bytes: usize,
    order: &'static str,
    mode: &'static str,
    offset: usize,
    endianness: &'static str,
    canonical: bool,
    payload_length: u32,
    stream_bytes: usize,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = config_from_args(&args);
    let decoded = decode_glob(&args.artifact_glob, &args.output, &config)
        .map_err(|err| codec_error("decode failed", err))?;

    let candidate = decoded.candidate;
    let out = DecodeOutput {
        output: args.output.display().to_string(),
        bytes: decoded.data.len(),
        order: candidate.order.as_str(),
        mode: candidate.mode.as_str(),
        offset: candidate.offset,
        endianness: candidate.endianness.as_str(),
        canonical: candidate.is_canonical(),
        payload_length: decoded.header.payload_length,
        stream_bytes: decoded.stream_len,
    };
    print_decode(&out, format);
    Ok(SUCCESS)
}

fn config_from_args(args: &DecodeArgs) -> DecodeConfig {
    DecodeConfig {
        compressor: args.compressor.into(),
        frame: FrameConfig {
            max_payload_size: args.max_payload,
            max_scan_offset: args.max_scan_offset,
        },
        modes: args.modes.iter().copied().map(Into::into).collect(),
        strict: args.strict,
        ..DecodeConfig::default()
    }
}

fn print_decode(out: &DecodeOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut t = table(["OUTPUT", "BYTES", "ORDER", "MODE", "OFFSET", "ENDIAN"]);
            t.add_row(vec![
                out.output.clone(),
                out.bytes.to_string(),
                out.order.to_string(),
                out.mode.to_string(),
                out.offset.to_string(),
                out.endianness.to_string(),
            ]);
            println!("{t}");
        }
        OutputFormat::Pretty => {
            println!("Decoded {} ({} bytes)", out.output, out.bytes);
            println!(
                "  Candidate: order={} mode={} offset={} endianness={}{}",
                out.order,
                out.mode,
                out.offset,
                out.endianness,
                if out.canonical { "" } else { " (non-canonical)" }
            );
            println!("  Payload:   {} bytes", out.payload_length);
            println!("  Stream:    {} bytes", out.stream_bytes);
        }
        OutputFormat::Raw => print_raw_lines([out.output.as_str()]),
    }
}
