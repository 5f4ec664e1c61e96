//! Data models for d22 processing
//!
//! Core data structures for representing decoded telemetry packages, raw and
//! interpreted data blocks, series selectors, and the shared timestamp grid
//! the downstream numeric pipeline works on.

use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Series Selector
// =============================================================================

/// Identity of one scalar time series of interest.
///
/// Selectors are value-equal and hashable on the full tuple and are used as
/// map keys through the whole pipeline: gathering, alignment and cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataSpec {
    /// Source folder the station's files live in (e.g. "/ekofisk/")
    pub folder: String,

    /// Station identifier as transmitted on the wire (e.g. "Ekofisk")
    pub station_id: String,

    /// Full block title (e.g. "WL1")
    pub block_id: String,

    /// Named field within the interpreted block
    pub field: String,
}

impl DataSpec {
    pub fn new(
        folder: impl Into<String>,
        station_id: impl Into<String>,
        block_id: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            folder: folder.into(),
            station_id: station_id.into(),
            block_id: block_id.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for DataSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "folder {} / id {} / block {} / {}",
            self.folder, self.station_id, self.block_id, self.field
        )
    }
}

// =============================================================================
// Raw and Interpreted Blocks
// =============================================================================

/// One raw data block as framed on the wire.
///
/// A block declared with entry count K carries K−1 numeric entry lines. When
/// a corrupt field truncated reading, `partial` is set and `values` holds the
/// invalid-field sentinel at the corrupt position; decoding of the remainder
/// of the block was abandoned.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    /// Full block title (e.g. "WL1")
    pub title: String,

    /// Number of numeric entries the title line declared (count − 1)
    pub declared_entries: usize,

    /// Decoded floating values, in wire order
    pub values: Vec<f64>,

    /// True when a corrupt field truncated reading of this block
    pub partial: bool,
}

impl RawBlock {
    /// The 2-character block-type code the interpreter registry dispatches on
    pub fn block_type(&self) -> &str {
        let end = self
            .title
            .char_indices()
            .nth(2)
            .map_or(self.title.len(), |(i, _)| i);
        &self.title[..end]
    }
}

/// A named-field mapping produced by a type-specific block decoder.
///
/// Fields hold physical quantities, with NaN as the missing-value marker.
/// Sentinel fault codes never appear here; decoders substitute them before
/// constructing the block.
#[derive(Debug, Clone, Default)]
pub struct InterpretedBlock {
    fields: BTreeMap<String, f64>,
}

impl InterpretedBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// =============================================================================
// Packages and Parse Output
// =============================================================================

/// One transmission unit: every block received from one station at one
/// timestamp. Identity is (station, timestamp), held by the enclosing map.
#[derive(Debug, Clone, Default)]
pub struct Package {
    /// Blocks keyed by full block title; first occurrence wins on duplicates
    pub blocks: BTreeMap<String, RawBlock>,
}

/// Full decoded content of one d22 file: station → timestamp → blocks.
///
/// Duplicate (station, timestamp) packages and duplicate block titles are
/// collapsed first-wins at parse time, so lookups here are unambiguous.
#[derive(Debug, Clone, Default)]
pub struct ParsedD22 {
    pub stations: BTreeMap<String, BTreeMap<DateTime<Utc>, Package>>,
}

impl ParsedD22 {
    /// Total number of packages across all stations
    pub fn package_count(&self) -> usize {
        self.stations.values().map(|t| t.len()).sum()
    }

    /// Look up one raw block
    pub fn block(&self, station: &str, timestamp: DateTime<Utc>, title: &str) -> Option<&RawBlock> {
        self.stations
            .get(station)?
            .get(&timestamp)?
            .blocks
            .get(title)
    }
}

// =============================================================================
// Timestamp Grid and Cleaned Series
// =============================================================================

/// Fixed-step reference timeline shared by all selectors processed together.
///
/// Covers `[start, end)` with a strictly positive step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
}

impl TimeGrid {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> Result<Self> {
        if start >= end {
            return Err(Error::data_validation(format!(
                "grid start {start} must precede end {end}"
            )));
        }
        if step <= Duration::zero() {
            return Err(Error::data_validation(
                "grid step must be strictly positive",
            ));
        }
        Ok(Self { start, end, step })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Nearest-neighbor matching tolerance: half a grid step
    pub fn tolerance(&self) -> Duration {
        self.step / 2
    }

    /// Number of grid points in `[start, end)`
    pub fn len(&self) -> usize {
        let span = (self.end - self.start).num_seconds();
        let step = self.step.num_seconds();
        (span as usize).div_ceil(step as usize)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of grid points covering `width` (at least one)
    pub fn points_per(&self, width: Duration) -> usize {
        let n = width.num_seconds() / self.step.num_seconds();
        (n.max(1)) as usize
    }

    /// All grid timestamps, in order
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        let mut out = Vec::with_capacity(self.len());
        let mut t = self.start;
        while t < self.end {
            out.push(t);
            t += self.step;
        }
        out
    }

    /// Index of the first grid point at or after `t`, or `len()` if past the end
    pub fn index_at_or_after(&self, t: DateTime<Utc>) -> usize {
        if t <= self.start {
            return 0;
        }
        let offset = (t - self.start).num_seconds();
        let step = self.step.num_seconds();
        let idx = (offset as usize).div_ceil(step as usize);
        idx.min(self.len())
    }
}

/// An aligned series after outlier rejection and gap interpolation, plus the
/// mask of samples the cleaning stage overwrote.
#[derive(Debug, Clone)]
pub struct CleanedSeries {
    pub values: Vec<f64>,
    pub modified: Vec<bool>,
}
