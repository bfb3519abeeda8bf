//! Filesystem entry points: read an input, write parts, resolve artifact globs.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use oc8_raster::{artifact_path, read_artifacts, resolve_glob, write_artifact};
use tracing::{debug, info};

use crate::config::{DecodeConfig, EncodeConfig};
use crate::decoder::{Decoded, Decoder};
use crate::encoder::{Encoded, Encoder};
use crate::error::{CodecError, Result};

/// Summary of an [`encode_file`] run.
#[derive(Debug, Clone)]
pub struct EncodedFiles {
    pub encoded: Encoded,
    /// Written artifact paths, in sequence order.
    pub paths: Vec<PathBuf>,
}

/// Encode the file at `input` and write `<prefix>_partNN.png` for each part.
pub fn encode_file(input: &Path, prefix: &Path, config: &EncodeConfig) -> Result<EncodedFiles> {
    let data = fs::read(input).map_err(|source| CodecError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    debug!(path = %input.display(), bytes = data.len(), "read input");

    let encoded = Encoder::new(config.clone()).encode(&data)?;
    let mut paths = Vec::with_capacity(encoded.artifacts.len());
    for artifact in &encoded.artifacts {
        let path = artifact_path(prefix, artifact.index);
        write_artifact(&path, &artifact.png)?;
        paths.push(path);
    }

    info!(
        input = %input.display(),
        parts = paths.len(),
        "encoded file"
    );
    Ok(EncodedFiles { encoded, paths })
}

/// Decode the artifacts at `paths` and write the recovered bytes to `output`.
///
/// Nothing is written unless decoding succeeds.
pub fn decode_files<P: AsRef<Path>>(
    paths: &[P],
    output: &Path,
    config: &DecodeConfig,
) -> Result<Decoded> {
    if paths.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    let images = read_artifacts(paths)?;
    let decoded = Decoder::new(config.clone()).decode(&images)?;
    write_output(output, &decoded.data)?;
    info!(
        output = %output.display(),
        bytes = decoded.data.len(),
        "decoded file"
    );
    Ok(decoded)
}

/// Resolve `pattern` and decode the matching artifacts into `output`.
pub fn decode_glob(pattern: &str, output: &Path, config: &DecodeConfig) -> Result<Decoded> {
    let paths = resolve_glob(pattern)?;
    if paths.is_empty() {
        return Err(CodecError::NoArtifacts(pattern.to_string()));
    }
    decode_files(&paths, output, config)
}

/// Write through a sibling temp file so a failed write never leaves a partial output.
fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| CodecError::Io { path, source }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, data).map_err(io_err(&tmp))?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(CodecError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
