use std::fmt;
use std::io;

use oc8_codec::CodecError;
use oc8_frame::FrameError;
use oc8_raster::RasterError;

// Exit codes follow sysexits where one fits.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const NO_INPUT: i32 = 66;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => NO_INPUT,
        io::ErrorKind::AlreadyExists | io::ErrorKind::IsADirectory => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::PayloadTooLarge { .. } => CliError::new(USAGE, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn raster_error(context: &str, err: RasterError) -> CliError {
    match err {
        RasterError::Io { path, source } => {
            io_error(&format!("{context}: {}", path.display()), source)
        }
        RasterError::Pattern(_) => CliError::new(USAGE, format!("{context}: {err}")),
        RasterError::TooLarge(_) => CliError::new(USAGE, format!("{context}: {err}")),
        RasterError::Artifact { .. }
        | RasterError::PngDecode(_)
        | RasterError::UnsupportedBitDepth(_)
        | RasterError::InvalidDimensions { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    match err {
        CodecError::Frame(err) => frame_error(context, err),
        CodecError::Raster(err) => raster_error(context, err),
        CodecError::Io { path, source } => {
            io_error(&format!("{context}: {}", path.display()), source)
        }
        CodecError::InvalidConfig(_) => CliError::new(USAGE, format!("{context}: {err}")),
        CodecError::NoArtifacts(_) | CodecError::EmptyInput => {
            CliError::new(NO_INPUT, format!("{context}: {err}"))
        }
        CodecError::Exhausted(_) | CodecError::Decompress(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}
