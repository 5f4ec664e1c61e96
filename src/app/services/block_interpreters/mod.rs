//! Block interpreter registry
//!
//! Turns raw numeric blocks into named physical quantities. Decoders are
//! dispatched on the 2-character block-type code; unknown codes are recorded
//! once per distinct code and otherwise skipped. Sentinel fault codes are
//! substituted with NaN on every decoded field, so they never travel further
//! down the pipeline.

pub mod decoders;
pub mod registry;

#[cfg(test)]
pub mod tests;

pub use registry::{BlockDecoder, InterpreterRegistry};
