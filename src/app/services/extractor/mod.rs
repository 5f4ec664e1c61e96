//! Spec-based data extraction
//!
//! Walks a sequence of d22 files for one source location, runs the protocol
//! parser and block interpreters on each, and accumulates (timestamp, value)
//! observations for every selector of interest. One file's unrecoverable
//! parse failure never aborts the batch.

pub mod extractor;

#[cfg(test)]
pub mod tests;

pub use extractor::{DataExtractor, GatherStats, GatheredData};
