use std::path::PathBuf;
use thiserror::Error;

pub type SvplotResult<T> = std::result::Result<T, SvplotError>;

#[derive(Debug, Error)]
pub enum SvplotError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("Malformed input at {}:{line}: {message}", path.display())]
    MalformedInput {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error(
        "Duplicate chromosome '{name}' at {}:{line} (first seen on line {first_line})",
        path.display()
    )]
    DuplicateChromosome {
        path: PathBuf,
        line: usize,
        name: String,
        first_line: usize,
    },
    #[error("No chromosomes found in length file: {}", path.display())]
    EmptyRegistry { path: PathBuf },
    #[error("Unsupported SV type: {value}")]
    UnsupportedSvType { value: String },
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
}

impl SvplotError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn malformed(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

#[macro_export]
macro_rules! svplot_error {
    ($($arg:tt)*) => {
        $crate::error::SvplotError::message(format!($($arg)*))
    };
}
