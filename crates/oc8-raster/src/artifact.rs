use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::decode_png;
use crate::error::{RasterError, Result};
use crate::image::RasterImage;

/// File extension of written artifacts.
pub const ARTIFACT_EXTENSION: &str = "png";

/// Suffix appended to an output prefix for part `index`: `_partNN.png`.
pub fn artifact_suffix(index: usize) -> String {
    format!("_part{index:02}.{ARTIFACT_EXTENSION}")
}

/// Path of part `index` for `prefix`, e.g. `out/report` -> `out/report_part03.png`.
pub fn artifact_path(prefix: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(artifact_suffix(index));
    PathBuf::from(name)
}

/// Write `bytes` to `path`, creating parent directories as needed.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RasterError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| RasterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote artifact");
    Ok(())
}

/// Expand a glob into regular files, in part order.
///
/// Files named `<base>_partN.<ext>` sort by base, then by the numeric `N`, so
/// `_part100` follows `_part99`. Other names sort lexically. The order is only
/// a hint; decoders also try the reverse.
pub fn resolve_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry.map_err(|err| RasterError::Io {
            path: err.path().to_path_buf(),
            source: err.into_error(),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by_cached_key(|path| part_sort_key(path));
    debug!(pattern, matched = paths.len(), "resolved artifact glob");
    Ok(paths)
}

/// Split `<dir>/<base>_partN.<ext>` into `(<dir>/<base>, N)`.
fn split_part_index(path: &Path) -> Option<(PathBuf, u64)> {
    let stem = path.file_stem()?.to_str()?;
    let at = stem.rfind("_part")?;
    let digits = &stem[at + "_part".len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse().ok()?;
    Some((path.with_file_name(&stem[..at]), index))
}

fn part_sort_key(path: &Path) -> (PathBuf, Option<u64>, PathBuf) {
    match split_part_index(path) {
        Some((base, index)) => (base, Some(index), path.to_path_buf()),
        None => (path.to_path_buf(), None, path.to_path_buf()),
    }
}

/// Read and decode one PNG artifact.
pub fn read_artifact(path: &Path) -> Result<RasterImage> {
    let bytes = fs::read(path).map_err(|source| RasterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decode_png(&bytes).map_err(|err| RasterError::Artifact {
        path: path.to_path_buf(),
        source: Box::new(err),
    })?;
    debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        channels = image.channels,
        "loaded artifact"
    );
    Ok(image)
}

/// Read and decode artifacts, preserving the given order.
pub fn read_artifacts<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RasterImage>> {
    paths.iter().map(|p| read_artifact(p.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_png, PngCompression};

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "oc8-raster-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir
    }

    #[test]
    fn names_are_zero_padded() {
        assert_eq!(artifact_suffix(0), "_part00.png");
        assert_eq!(artifact_suffix(7), "_part07.png");
        assert_eq!(artifact_suffix(123), "_part123.png");
        assert_eq!(
            artifact_path(Path::new("out/report"), 3),
            PathBuf::from("out/report_part03.png")
        );
    }

    #[test]
    fn write_glob_read_roundtrip() {
        let dir = unique_temp_dir("roundtrip");
        let prefix = dir.join("nested").join("blob");
        let image = RasterImage::new(2, 2, 3, (0..12).collect()).unwrap();
        let png = encode_png(&image, PngCompression::Fast).unwrap();

        for index in [1usize, 0] {
            write_artifact(&artifact_path(&prefix, index), &png).unwrap();
        }
        fs::write(dir.join("nested").join("notes.txt"), b"ignored").unwrap();

        let pattern = format!("{}/nested/blob_part*.png", dir.display());
        let paths = resolve_glob(&pattern).unwrap();
        assert_eq!(
            paths,
            vec![artifact_path(&prefix, 0), artifact_path(&prefix, 1)]
        );

        let images = read_artifacts(&paths).unwrap();
        assert_eq!(images, vec![image.clone(), image]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn parts_sort_by_number_not_text() {
        let dir = unique_temp_dir("numeric");
        let prefix = dir.join("big");
        for index in [100usize, 11, 2, 10, 1, 0, 101, 99] {
            fs::write(artifact_path(&prefix, index), b"x").unwrap();
        }

        let pattern = format!("{}/big_part*.png", dir.display());
        let paths = resolve_glob(&pattern).unwrap();
        let expected: Vec<_> = [0usize, 1, 2, 10, 11, 99, 100, 101]
            .iter()
            .map(|&i| artifact_path(&prefix, i))
            .collect();
        assert_eq!(paths, expected);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn part_index_parsing() {
        assert_eq!(
            split_part_index(Path::new("out/doc_part007.png")),
            Some((PathBuf::from("out/doc"), 7))
        );
        assert_eq!(
            split_part_index(Path::new("a_part1_part12.png")),
            Some((PathBuf::from("a_part1"), 12))
        );
        assert_eq!(split_part_index(Path::new("doc_part.png")), None);
        assert_eq!(split_part_index(Path::new("doc_partx1.png")), None);
        assert_eq!(split_part_index(Path::new("plain.png")), None);
    }

    #[test]
    fn unnumbered_names_keep_lexical_order() {
        let mut paths = vec![
            PathBuf::from("b.png"),
            PathBuf::from("a_part10.png"),
            PathBuf::from("a.png"),
            PathBuf::from("a_part9.png"),
        ];
        paths.sort_by_cached_key(|path| part_sort_key(path));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a_part9.png"),
                PathBuf::from("a_part10.png"),
                PathBuf::from("a.png"),
                PathBuf::from("b.png"),
            ]
        );
    }

    #[test]
    fn no_match_is_empty() {
        let dir = unique_temp_dir("empty");
        let pattern = format!("{}/*.png", dir.display());
        assert!(resolve_glob(&pattern).unwrap().is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(matches!(resolve_glob("[oops"), Err(RasterError::Pattern(_))));
    }

    #[test]
    fn unreadable_artifact_names_the_path() {
        let dir = unique_temp_dir("corrupt");
        let path = dir.join("bad_part00.png");
        fs::write(&path, b"not an image").unwrap();

        let err = read_artifact(&path).unwrap_err();
        assert!(matches!(err, RasterError::Artifact { .. }));
        assert!(err.to_string().contains("bad_part00.png"));

        let _ = fs::remove_dir_all(&dir);
    }
}
