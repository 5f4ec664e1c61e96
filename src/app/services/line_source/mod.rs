//! Line-oriented file source for d22 telemetry streams
//!
//! Decodes a plain or gzip-compressed file into a sequence of Latin-1 text
//! lines with exactly one step of pushback, and keeps a bounded trailing
//! window of recent lines for parser diagnostics.

pub mod source;

#[cfg(test)]
pub mod tests;

pub use source::LineSource;
