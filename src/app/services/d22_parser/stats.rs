//! Parse statistics and result structures

use crate::app::models::ParsedD22;

/// Statistics collected while parsing one d22 file.
///
/// Recoverable anomalies are counted here (and logged with context as they
/// happen); they never abort the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Packages registered in the result map
    pub packages: usize,

    /// Blocks registered across all packages
    pub blocks: usize,

    /// Packages re-announcing an already seen (station, timestamp); first wins
    pub duplicate_packages: usize,

    /// Block titles re-announced within one package; first wins
    pub duplicate_blocks: usize,

    /// Blocks truncated by an unparsable numeric entry
    pub partial_blocks: usize,

    /// Package-start markers met while a package was still open
    pub truncated_packages: usize,

    /// Lines inside a package matching no known pattern
    pub unrecognized_lines: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the file parsed without a single anomaly
    pub fn is_clean(&self) -> bool {
        self.duplicate_packages == 0
            && self.duplicate_blocks == 0
            && self.partial_blocks == 0
            && self.truncated_packages == 0
            && self.unrecognized_lines == 0
    }
}

/// Complete result of parsing one d22 file
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub data: ParsedD22,
    pub stats: ParseStats,
}
