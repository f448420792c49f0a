//! Error types for ferro-locedit
//!
//! Only contract violations and provider failures surface as errors.
//! Outcomes such as a location being cut away entirely, or a policy that
//! cannot be evaluated for lack of sequence context, are reported through
//! return values instead.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Contract errors (E1xxx)
    /// Range with `from > to`
    InvalidRange = 1001,
    /// Structurally invalid location
    InvalidLocation = 1002,
    /// Shifted coordinate past the end of the coordinate space
    CoordinateOverflow = 1003,

    // Sequence context errors (E2xxx)
    /// Sequence unknown to the provider
    SequenceNotFound = 2001,
    /// Residues could not be fetched
    ResiduesNotAvailable = 2002,

    // Translation errors (E3xxx)
    /// Genetic code id without a table
    UnknownGeneticCode = 3001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRange => "invalid coordinate range",
            ErrorCode::InvalidLocation => "invalid location",
            ErrorCode::CoordinateOverflow => "coordinate overflow",
            ErrorCode::SequenceNotFound => "sequence not available",
            ErrorCode::ResiduesNotAvailable => "residues not available",
            ErrorCode::UnknownGeneticCode => "unknown genetic code",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-locedit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocEditError {
    /// A range whose start lies after its end
    #[error("Invalid range: from {from} is greater than to {to}")]
    InvalidRange { from: u64, to: u64 },

    /// A location that violates a structural invariant
    #[error("Invalid location: {msg}")]
    InvalidLocation { msg: String },

    /// Moving a coordinate by `shift` would pass `u64::MAX`
    #[error("Coordinate overflow: {position} cannot move by {shift}")]
    CoordinateOverflow { position: u64, shift: u64 },

    /// The sequence context has no record of this sequence
    #[error("Sequence not found: {id}")]
    SequenceNotFound { id: String },

    /// Residues for a region could not be produced
    #[error("Residues not available for {id}:{start}-{end}")]
    ResiduesNotAvailable { id: String, start: u64, end: u64 },

    /// Genetic code id with no known codon table
    #[error("Unknown genetic code: {code}")]
    UnknownGeneticCode { code: u8 },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl LocEditError {
    /// Create an invalid-location error
    pub fn invalid_location(msg: impl Into<String>) -> Self {
        LocEditError::InvalidLocation { msg: msg.into() }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            LocEditError::InvalidRange { .. } => ErrorCode::InvalidRange,
            LocEditError::InvalidLocation { .. } => ErrorCode::InvalidLocation,
            LocEditError::CoordinateOverflow { .. } => ErrorCode::CoordinateOverflow,
            LocEditError::SequenceNotFound { .. } => ErrorCode::SequenceNotFound,
            LocEditError::ResiduesNotAvailable { .. } => ErrorCode::ResiduesNotAvailable,
            LocEditError::UnknownGeneticCode { .. } => ErrorCode::UnknownGeneticCode,
            LocEditError::Io { .. } => ErrorCode::IoError,
            LocEditError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Whether this error comes from missing sequence context rather than bad input
    pub fn is_context_error(&self) -> bool {
        matches!(
            self,
            LocEditError::SequenceNotFound { .. } | LocEditError::ResiduesNotAvailable { .. }
        )
    }
}

impl From<std::io::Error> for LocEditError {
    fn from(err: std::io::Error) -> Self {
        LocEditError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LocEditError {
    fn from(err: serde_json::Error) -> Self {
        LocEditError::Json {
            msg: err.to_string(),
        }
    }
}
