//! Global error handling for repo-export
//!
//! Errors in this type are fatal for a run. Per-file read failures never
//! reach it: the dumper turns them into placeholder text instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Directory traversal errors
    #[error("Traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to create or write the output document
    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Creates an ExportError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ExportError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait attaching the output path to write failures
pub trait OutputContext<T> {
    fn for_output(self, path: &std::path::Path) -> Result<T>;
}

impl<T> OutputContext<T> for std::result::Result<T, io::Error> {
    fn for_output(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| ExportError::Output {
            path: path.to_path_buf(),
            source,
        })
    }
}

// Lets tests and io-based callers use `?` on export results
impl From<ExportError> for io::Error {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(n: i32) -> Result<i32> {
        crate::ensure!(n > 0, Config, "expected a positive value, got {}", n);
        Ok(n)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);
        let err = check_positive(-1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: expected a positive value, got -1"
        );
    }

    #[test]
    fn test_output_context() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = res.for_output(std::path::Path::new("out.txt")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to write out.txt"));
    }
}
