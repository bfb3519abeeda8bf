use oc8_codec::{build_stream, CodecError, StreamOrder};
use oc8_frame::{parse_frame_at, Endianness, FrameHeader, DEFAULT_MAX_PAYLOAD};
use oc8_raster::{read_artifact, resolve_glob, ChannelMode, RasterImage};
use serde::Serialize;

use crate::cmd::InspectArgs;
use crate::exit::{codec_error, raster_error, CliResult, SUCCESS};
use crate::output::{hex_preview, print_json, print_raw_lines, table, OutputFormat};

#[derive(Serialize)]
struct ArtifactOutput {
    path: String,
    width: u32,
    height: u32,
    channels: u8,
    sample_bytes: usize,
    head: String,
}

#[derive(Serialize)]
struct HeaderCheck {
    stream_bytes: usize,
    total_length: Option<u32>,
    payload_length: Option<u32>,
    flags: Option<u8>,
    /// "valid" when the canonical frame checks out, else the rejection reason.
    status: String,
}

#[derive(Serialize)]
struct InspectOutput {
    pattern: String,
    artifacts: Vec<ArtifactOutput>,
    canonical_header: HeaderCheck,
}

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let paths = resolve_glob(&args.artifact_glob)
        .map_err(|err| raster_error("inspect failed", err))?;
    if paths.is_empty() {
        return Err(codec_error(
            "inspect failed",
            CodecError::NoArtifacts(args.artifact_glob),
        ));
    }

    let mut images = Vec::with_capacity(paths.len());
    let mut artifacts = Vec::with_capacity(paths.len());
    for path in &paths {
        let image = read_artifact(path).map_err(|err| raster_error("inspect failed", err))?;
        artifacts.push(ArtifactOutput {
            path: path.display().to_string(),
            width: image.width,
            height: image.height,
            channels: image.channels,
            sample_bytes: image.samples.len(),
            head: hex_preview(&image.samples, args.preview),
        });
        images.push(image);
    }

    let out = InspectOutput {
        pattern: args.artifact_glob,
        artifacts,
        canonical_header: check_header(&images),
    };
    print_inspect(&out, format);
    Ok(SUCCESS)
}

/// Check the as-given opaque3 stream for a frame at offset 0, big-endian.
fn check_header(images: &[RasterImage]) -> HeaderCheck {
    let stream = build_stream(images, StreamOrder::AsGiven, ChannelMode::Opaque3);
    let header = FrameHeader::read(&stream, 0, Endianness::Big).ok();
    let status = match parse_frame_at(&stream, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD) {
        Ok(_) => "valid".to_string(),
        Err(err) => err.to_string(),
    };
    HeaderCheck {
        stream_bytes: stream.len(),
        total_length: header.map(|h| h.total_length),
        payload_length: header.map(|h| h.payload_length),
        flags: header.map(|h| h.flags),
        status,
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn print_inspect(out: &InspectOutput, format: OutputFormat) {
    let check = &out.canonical_header;
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut t = table(["PATH", "SIZE", "CHANNELS", "BYTES", "HEAD"]);
            for a in &out.artifacts {
                t.add_row(vec![
                    a.path.clone(),
                    format!("{}x{}", a.width, a.height),
                    a.channels.to_string(),
                    a.sample_bytes.to_string(),
                    a.head.clone(),
                ]);
            }
            println!("{t}");
            println!(
                "canonical header: total={} payload={} flags={} -> {}",
                opt(check.total_length),
                opt(check.payload_length),
                opt(check.flags),
                check.status
            );
        }
        OutputFormat::Pretty => {
            println!("Artifacts matching {}:", out.pattern);
            for a in &out.artifacts {
                println!(
                    "  {} {}x{}x{} ({} bytes) {}",
                    a.path, a.width, a.height, a.channels, a.sample_bytes, a.head
                );
            }
            println!("Canonical header ({} stream bytes):", check.stream_bytes);
            println!("  Total length:   {}", opt(check.total_length));
            println!("  Payload length: {}", opt(check.payload_length));
            println!("  Flags:          {}", opt(check.flags));
            println!("  Status:         {}", check.status);
        }
        OutputFormat::Raw => print_raw_lines([check.status.as_str()]),
    }
}
