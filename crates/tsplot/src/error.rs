//! Library error types using thiserror.

use plotters::drawing::DrawingAreaErrorKind;
use plotters_bitmap::BitMapBackendError;

/// Library-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum TsPlotError {
    /// Invalid or missing sample input.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Malformed frequency specification.
    #[error("Invalid frequency: {0}")]
    Frequency(String),

    /// Unknown colormap name.
    #[error("Unknown colormap: {0}")]
    Colormap(String),

    /// Plotting backend failure.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TsPlotError {
    /// Creates an input error from any message.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    /// Creates a frequency error from any message.
    pub fn frequency(message: impl Into<String>) -> Self {
        Self::Frequency(message.into())
    }

    /// Creates an unknown-colormap error.
    pub fn colormap(name: impl Into<String>) -> Self {
        Self::Colormap(name.into())
    }

    /// Creates a render error from any message.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }
}

impl From<DrawingAreaErrorKind<BitMapBackendError>> for TsPlotError {
    fn from(err: DrawingAreaErrorKind<BitMapBackendError>) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result type for the library.
pub type Result<T> = std::result::Result<T, TsPlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TsPlotError::input("must provide at least one of x or y values");
        assert_eq!(
            err.to_string(),
            "Invalid input: must provide at least one of x or y values"
        );

        let err = TsPlotError::colormap("nope");
        assert_eq!(err.to_string(), "Unknown colormap: nope");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TsPlotError = io.into();
        assert!(matches!(err, TsPlotError::Io(_)));
    }
}
