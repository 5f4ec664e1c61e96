//! d22 protocol parser
//!
//! A four-state machine over the line source that recognizes package and
//! block framing and builds the station → timestamp → block nested result.
//! The wire format has no formal grammar and real archives contain corrupt
//! and truncated transmissions; the parser recovers from everything it can
//! and reserves hard failures for conditions that make the rest of the file
//! meaningless (unknown protocol version, end of input inside an open
//! package).
//!
//! Components:
//! - [`parser`] - the state machine itself
//! - [`stats`] - per-file parse statistics and the combined parse result

pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use parser::{D22Parser, ParserState};
pub use stats::{ParseResult, ParseStats};
