//! Error type shared by the codec and the integrator.

use std::path::PathBuf;

use thiserror::Error;

/// Irradiance baker error type
#[derive(Error, Debug)]
pub enum IrradianceError {
    /// A file could not be opened, read, created or written.
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The HDR header or pixel stream is malformed, truncated or inconsistent
    /// with the declared dimensions.
    #[error("Malformed HDR data in {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },
    /// Zero dimensions, a buffer whose length is not `3 * width * height`,
    /// or an unusable worker count.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type IrradianceResult<T> = Result<T, IrradianceError>;

impl IrradianceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
