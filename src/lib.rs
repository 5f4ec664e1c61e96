//! d22 Processor Library
//!
//! A Rust library for decoding the d22 line-oriented telemetry format emitted
//! by offshore platform instrumentation, and for reducing decades of such
//! files into cleaned, uniformly sampled time series.
//!
//! This library provides tools for:
//! - Streaming d22 files (plain or gzip) line by line with one-step pushback
//! - Parsing package/block framing with recovery from corrupt transmissions
//! - Interpreting raw data blocks into named physical quantities
//! - Gathering per-selector observations across many files
//! - Aligning irregular observations onto a fixed timestamp grid
//! - Robust (Hampel) outlier rejection and bounded gap interpolation
//! - Stitching and detrending candidate sensor signals across operator
//!   defined time segments
//!
//! Persistence, directory traversal and plotting are external collaborators;
//! the library's outputs are in-memory series plus modification masks.

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aligner;
        pub mod block_interpreters;
        pub mod cleaning;
        pub mod d22_parser;
        pub mod extractor;
        pub mod inventory;
        pub mod line_source;
        pub mod reconciliation;
    }
}

// Re-export commonly used types
pub use app::models::{DataSpec, InterpretedBlock, Package, ParsedD22, RawBlock, TimeGrid};
pub use config::{CleaningConfig, DetrendTable, StitchOptions, StitchTable};

/// Result type alias for d22 processing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for d22 processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Unrecognized protocol version tag in a package header
    #[error("unrecognized format tag in file '{file}': '{tag}'")]
    FormatTag { file: String, tag: String },

    /// End of input reached while a package was still open
    #[error(
        "unexpected end of file '{file}' at line {line}: a data package was opened but never closed"
    )]
    UnexpectedEof { file: String, line: usize },

    /// Line-source pushback misuse (double pushback, or pushback before any pull)
    #[error("pushback usage error: {message}")]
    PushbackUsage { message: String },

    /// Parser driven past a terminal state
    #[error("parser state error: {message}")]
    ParserState { message: String },

    /// Configuration table failed validation
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Data selectors with mismatched source folders in one batch
    #[error("selector mismatch: {message}")]
    SpecMismatch { message: String },

    /// Data validation error
    #[error("data validation error: {message}")]
    DataValidation { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a format-tag error
    pub fn format_tag(file: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::FormatTag {
            file: file.into(),
            tag: tag.into(),
        }
    }

    /// Create an unexpected-EOF framing error
    pub fn unexpected_eof(file: impl Into<String>, line: usize) -> Self {
        Self::UnexpectedEof {
            file: file.into(),
            line,
        }
    }

    /// Create a pushback usage error
    pub fn pushback_usage(message: impl Into<String>) -> Self {
        Self::PushbackUsage {
            message: message.into(),
        }
    }

    /// Create a parser state error
    pub fn parser_state(message: impl Into<String>) -> Self {
        Self::ParserState {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a selector mismatch error
    pub fn spec_mismatch(message: impl Into<String>) -> Self {
        Self::SpecMismatch {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }
}
