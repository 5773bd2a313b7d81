use std::fmt;

/// Contract violations reported by the analysis functions.
///
/// Degenerate but valid inputs (constant series, too few points for a single lag,
/// a zero warming denominator) resolve to sentinel values instead.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A parameter outside its domain, e.g. a non-positive CO2 concentration.
    InvalidInput(String),
    /// Two series that must be aligned have different lengths.
    LengthMismatch { left: usize, right: usize },
    /// Fewer points than the computation needs.
    InsufficientData { required: usize, actual: usize },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::LengthMismatch { left, right } => {
                write!(f, "Series lengths differ: {} vs {}", left, right)
            }
            AnalysisError::InsufficientData { required, actual } => write!(
                f,
                "Insufficient data: need at least {} points, got {}",
                required, actual
            ),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Type alias for Results using AnalysisError
pub type Result<T> = std::result::Result<T, AnalysisError>;
