//! Asset loading errors.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("OBJ parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("failed to decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("OBJ contained no triangles")]
    Empty,
}

impl AssetError {
    pub(crate) fn parse(line_no: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line: line_no + 1,
            message: message.into(),
        }
    }

    /// `true` when the underlying file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

pub type AssetResult<T> = Result<T, AssetError>;
