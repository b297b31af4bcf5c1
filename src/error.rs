use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Image(image::ImageError),
    MissingArgument(&'static str),
    InvalidOutputSize(u32),
    InvalidPath(String),
    ImageNotFound(PathBuf),
    ReadCsv {
        path: PathBuf,
        source: std::io::Error,
    },
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Image(err) => write!(f, "Image processing error: {}", err),
            Error::MissingArgument(name) => write!(f, "Missing required argument --{}", name),
            Error::InvalidPath(msg) => write!(f, "Invalid path: {}", msg),
            Error::InvalidOutputSize(size) => write!(
                f,
                "Output size {} must be between 1 and {}",
                size,
                crate::crop::MAX_SIDE
            ),
            Error::ImageNotFound(path) => write!(f, "Image not found: {}", path.display()),
            Error::ReadCsv { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            Error::OutputDir { path, source } => {
                write!(f, "Failed to create output directory {}: {}", path.display(), source)
            }
            Error::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Image(err) => Some(err),
            Error::ReadCsv { source, .. } => Some(source),
            Error::OutputDir { source, .. } => Some(source),
            Error::Write { source, .. } => Some(source),
            Error::MissingArgument(_) => None,
            Error::InvalidPath(_) => None,
            Error::InvalidOutputSize(_) => None,
            Error::ImageNotFound(_) => None,
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A coordinate row that was skipped. Never fatal to a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RowError {
    /// The row did not hold exactly four fields.
    FieldCount { line: usize, got: usize },
    /// One of the four fields is not a finite number.
    NotNumeric { line: usize, field: String },
    /// The two corners collapse to a rectangle without pixels.
    EmptyRegion { line: usize },
    /// A side is longer than a GIF can store.
    TooLarge { line: usize, width: u64, height: u64 },
}

impl RowError {
    /// Zero-based row index the error refers to.
    pub fn line(&self) -> usize {
        match self {
            RowError::FieldCount { line, .. }
            | RowError::NotNumeric { line, .. }
            | RowError::EmptyRegion { line }
            | RowError::TooLarge { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::FieldCount { line, got } => {
                write!(f, "Error on line {}. Expected 4 points, got {}", line, got)
            }
            RowError::NotNumeric { line, field } => {
                write!(f, "Error on line {}. Could not read '{}' as a number", line, field)
            }
            RowError::EmptyRegion { line } => {
                write!(f, "Error on line {}. Rectangle has no area", line)
            }
            RowError::TooLarge { line, width, height } => write!(
                f,
                "Error on line {}. Rectangle {}x{} exceeds the {} pixel limit per side",
                line,
                width,
                height,
                crate::crop::MAX_SIDE
            ),
        }
    }
}

impl std::error::Error for RowError {}
