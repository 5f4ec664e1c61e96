//! Decoder registry keyed by block-type code

use std::collections::{BTreeSet, HashMap};

use tracing::info;

use super::decoders;
use crate::app::models::{InterpretedBlock, RawBlock};

/// A type-specific block decoder
pub type BlockDecoder = fn(&RawBlock) -> InterpretedBlock;

/// Registry mapping 2-character block-type codes to decoders.
///
/// Codes with no registered decoder are recorded once per distinct code
/// (not per occurrence) and otherwise skipped; they are never an error.
pub struct InterpreterRegistry {
    decoders: HashMap<&'static str, BlockDecoder>,
    unknown_codes: BTreeSet<String>,
}

impl Default for InterpreterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterRegistry {
    /// Registry with the standard decoders (WL, MD, MT) installed
    pub fn new() -> Self {
        let mut decoders: HashMap<&'static str, BlockDecoder> = HashMap::new();
        decoders.insert("WL", decoders::decode_wl as BlockDecoder);
        decoders.insert("MD", decoders::decode_md as BlockDecoder);
        decoders.insert("MT", decoders::decode_mt as BlockDecoder);
        Self {
            decoders,
            unknown_codes: BTreeSet::new(),
        }
    }

    /// Install or replace a decoder for a block-type code
    pub fn register(&mut self, code: &'static str, decoder: BlockDecoder) {
        self.decoders.insert(code, decoder);
    }

    /// Decode one raw block, dispatching on its 2-character type code.
    ///
    /// Returns `None` for unknown codes.
    pub fn decode(&mut self, raw: &RawBlock) -> Option<InterpretedBlock> {
        let code = raw.block_type();
        match self.decoders.get(code) {
            Some(decoder) => Some(decoder(raw)),
            None => {
                if self.unknown_codes.insert(code.to_string()) {
                    info!(code, "block type has no registered decoder");
                }
                None
            }
        }
    }

    /// Distinct block-type codes met without a registered decoder
    pub fn unknown_codes(&self) -> impl Iterator<Item = &str> {
        self.unknown_codes.iter().map(|s| s.as_str())
    }
}
