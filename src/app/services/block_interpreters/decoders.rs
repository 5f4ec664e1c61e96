//! Individual data block decoders
//!
//! Each decoder validates the raw-entry count it recognizes, maps positional
//! values to named fields and substitutes sentinel fault codes with NaN. A
//! structurally broken block decodes to its named fields all missing; decoders
//! never emit partial zero-filled data and never panic.

use tracing::{debug, error};

use crate::app::models::{InterpretedBlock, RawBlock};
use crate::constants::fault_codes;

/// Field names of the water-level block, wire order. The legacy 4-entry
/// record lacks the last two.
const WL_FIELDS: &[&str] = &[
    "average_air_gap",
    "average_water_level_ref_LAT",
    "minimum_air_gap",
    "maximum_air_gap",
    "min_water_level_ref_LAT",
    "max_water_level_ref_LAT",
];

const MD_FIELDS: &[&str] = &["magnetic_declination"];

const MT_FIELDS: &[&str] = &[
    "max_gust_last_period",
    "time_max_gust",
    "max_average_wind_speed_last_period",
    "time_max_average",
];

/// Replace a sentinel fault code by the missing-value marker
pub fn substitute_fault_code(value: f64) -> f64 {
    if fault_codes::ALL.contains(&value) {
        f64::NAN
    } else {
        value
    }
}

fn all_missing(fields: &[&str]) -> InterpretedBlock {
    let mut block = InterpretedBlock::new();
    for name in fields {
        block.insert(*name, f64::NAN);
    }
    block
}

/// Water-level block: extended 6-entry record or legacy 4-entry record
pub fn decode_wl(raw: &RawBlock) -> InterpretedBlock {
    match raw.values.len() {
        6 | 4 => {
            let mut block = InterpretedBlock::new();
            for (name, value) in WL_FIELDS.iter().zip(&raw.values) {
                block.insert(*name, substitute_fault_code(*value));
            }
            for name in &WL_FIELDS[raw.values.len()..] {
                block.insert(*name, f64::NAN);
            }
            block
        }
        n => {
            error!(
                title = %raw.title,
                entries = n,
                "WL block has unexpected shape; filling fields with missing"
            );
            all_missing(WL_FIELDS)
        }
    }
}

/// Magnetic declination block: a single entry
pub fn decode_md(raw: &RawBlock) -> InterpretedBlock {
    if raw.values.len() != 1 {
        error!(
            title = %raw.title,
            entries = raw.values.len(),
            "MD block has unexpected shape; filling fields with missing"
        );
        return all_missing(MD_FIELDS);
    }
    let mut block = InterpretedBlock::new();
    block.insert(MD_FIELDS[0], substitute_fault_code(raw.values[0]));
    block
}

/// Wind extremes block: speeds plus `H.M`-encoded times of occurrence
pub fn decode_mt(raw: &RawBlock) -> InterpretedBlock {
    if raw.values.len() != 4 {
        error!(
            title = %raw.title,
            entries = raw.values.len(),
            "MT block has unexpected shape; filling fields with missing"
        );
        return all_missing(MT_FIELDS);
    }
    let mut block = InterpretedBlock::new();
    block.insert(MT_FIELDS[0], substitute_fault_code(raw.values[0]));
    block.insert(MT_FIELDS[1], decode_clock(substitute_fault_code(raw.values[1])));
    block.insert(MT_FIELDS[2], substitute_fault_code(raw.values[2]));
    block.insert(MT_FIELDS[3], decode_clock(substitute_fault_code(raw.values[3])));
    block
}

/// Decode an `H.M` clock value (integer part hours, first decimal digit the
/// tens-of-minutes) to fractional hours; out-of-range encodings are missing.
fn decode_clock(value: f64) -> f64 {
    if value.is_nan() {
        return f64::NAN;
    }
    let hour = value.trunc();
    let minute = ((value - hour) * 10.0).trunc();
    if !(0.0..=23.0).contains(&hour) || !(0.0..=59.0).contains(&minute) {
        debug!(value, "clock value out of range; marking missing");
        return f64::NAN;
    }
    hour + minute / 60.0
}
