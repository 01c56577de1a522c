// File-level helpers around the in-memory codec.
//
// Provides `shrink_file()` and `unshrink_file()`: read the whole input, run
// the transform, write the result through a `BufWriter`. Optionally computes
// SHA-256 checksums of both sides (feature-gated behind `file-io`).

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::codec::{self, TransformStats};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Direction of the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Shrink,
    Unshrink,
}

impl Mode {
    /// Run this direction of the transform over an in-memory buffer.
    pub fn apply(self, input: &[u8]) -> Result<(Vec<u8>, TransformStats), Error> {
        match self {
            Self::Shrink => Ok(codec::shrink_with_stats(input)),
            Self::Unshrink => codec::unshrink_with_stats(input),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shrink => "shrink",
            Self::Unshrink => "unshrink",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shrink" => Ok(Self::Shrink),
            "unshrink" => Ok(Self::Unshrink),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `shrink_file()` / `unshrink_file()`.
#[derive(Debug, Clone)]
pub struct FileStats {
    pub mode: Mode,
    /// Sizes seen by the codec.
    pub transform: TransformStats,
    /// SHA-256 of the input file (if `file-io` feature is enabled).
    pub input_sha256: Option<[u8; 32]>,
    /// SHA-256 of the written output (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file operations.
#[derive(Debug)]
pub enum IoError {
    /// I/O error (file open, read, write).
    Io(io::Error),
    /// The input could not be decoded.
    Transform(Error),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Transform(e) => write!(f, "decode error: {e}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Transform(e) => Some(e),
        }
    }
}

impl From<io::Error> for IoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<Error> for IoError {
    fn from(e: Error) -> Self {
        Self::Transform(e)
    }
}

// ---------------------------------------------------------------------------
// File transforms
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

/// Shrink `input_path` into `output_path`.
pub fn shrink_file(input_path: &Path, output_path: &Path) -> Result<FileStats, IoError> {
    transform_file(Mode::Shrink, input_path, output_path)
}

/// Unshrink `input_path` into `output_path`.
///
/// Nothing is written if the input fails to decode.
pub fn unshrink_file(input_path: &Path, output_path: &Path) -> Result<FileStats, IoError> {
    transform_file(Mode::Unshrink, input_path, output_path)
}

/// Read `input_path` fully, apply `mode`, and write the result.
pub fn transform_file(
    mode: Mode,
    input_path: &Path,
    output_path: &Path,
) -> Result<FileStats, IoError> {
    let input = std::fs::read(input_path)?;
    let (output, transform) = mode.apply(&input)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
    writer.write_all(&output)?;
    writer.flush()?;

    log::info!(
        "{mode}: {} ({} bytes) -> {} ({} bytes)",
        input_path.display(),
        transform.input_size,
        output_path.display(),
        transform.output_size
    );

    Ok(FileStats {
        mode,
        transform,
        input_sha256: sha256(&input),
        output_sha256: sha256(&output),
    })
}

/// SHA-256 of `data`, or `None` without the `file-io` feature.
pub fn sha256(data: &[u8]) -> Option<[u8; 32]> {
    #[cfg(feature = "file-io")]
    {
        Some(sha2::Sha256::digest(data).into())
    }
    #[cfg(not(feature = "file-io"))]
    {
        let _ = data;
        None
    }
}

/// Lowercase hex rendering of a digest.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
