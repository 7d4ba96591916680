//! Whole-file compress/decompress on top of the in-memory codec.
//!
//! The input is read fully, transformed, and only then is the output file
//! created, so a codec error never leaves a partial output behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::HuffmanError;

/// Extension given to compressed output.
pub const COMPRESSED_EXTENSION: &str = "bin";
/// Extension given to decompressed output.
pub const DECOMPRESSED_EXTENSION: &str = "txt";

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] HuffmanError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Compress,
    Decompress,
}

/// Sizes observed by one transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformReport {
    pub input_len: usize,
    pub output_len: usize,
}

impl TransformReport {
    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 1.0;
        }
        self.output_len as f64 / self.input_len as f64
    }
}

/// Default output location: the input's stem with the direction's
/// extension, in the input's directory.
pub fn output_path_for(input: &Path, direction: Direction) -> PathBuf {
    let ext = match direction {
        Direction::Compress => COMPRESSED_EXTENSION,
        Direction::Decompress => DECOMPRESSED_EXTENSION,
    };
    input.with_extension(ext)
}

pub fn compress_file(input: &Path, output: &Path) -> Result<TransformReport, TransformError> {
    transform(input, output, Direction::Compress)
}

pub fn decompress_file(input: &Path, output: &Path) -> Result<TransformReport, TransformError> {
    transform(input, output, Direction::Decompress)
}

fn transform(
    input: &Path,
    output: &Path,
    direction: Direction,
) -> Result<TransformReport, TransformError> {
    let data = fs::read(input).map_err(|source| TransformError::Io {
        path: input.to_path_buf(),
        source,
    })?;

    let result = match direction {
        Direction::Compress => crate::encode(&data)?,
        Direction::Decompress => crate::decode(&data)?,
    };

    fs::write(output, &result).map_err(|source| TransformError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    let report = TransformReport {
        input_len: data.len(),
        output_len: result.len(),
    };
    info!(
        ?direction,
        input = %input.display(),
        output = %output.display(),
        input_len = report.input_len,
        output_len = report.output_len,
        "transformed file"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("notes/report.txt"), Direction::Compress),
            PathBuf::from("notes/report.bin")
        );
        assert_eq!(
            output_path_for(Path::new("report.bin"), Direction::Decompress),
            PathBuf::from("report.txt")
        );
        assert_eq!(
            output_path_for(Path::new("README"), Direction::Compress),
            PathBuf::from("README.bin")
        );
    }

    #[test]
    fn test_ratio() {
        let report = TransformReport {
            input_len: 200,
            output_len: 50,
        };
        assert!((report.ratio() - 0.25).abs() < f64::EPSILON);
        let empty = TransformReport {
            input_len: 0,
            output_len: 5,
        };
        assert_eq!(empty.ratio(), 1.0);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let err = compress_file(
            Path::new("/nonexistent/huffzip/input.txt"),
            Path::new("/nonexistent/huffzip/output.bin"),
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::Io { .. }));
    }
}
