use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("oc8 {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: oc8");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("OC8_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "compressor: {} (quality {}), also {}",
        oc8_codec::CompressorKind::Brotli,
        oc8_codec::DEFAULT_QUALITY,
        oc8_codec::CompressorKind::Zstd
    );
    println!(
        "frame: {}-byte header, crc-8 poly {:#04x}",
        oc8_frame::HEADER_SIZE,
        oc8_frame::DEFAULT_POLYNOMIAL
    );

    Ok(SUCCESS)
}
