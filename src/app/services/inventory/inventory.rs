//! Per-station, per-block coverage summaries

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::app::services::d22_parser::D22Parser;
use crate::constants::DEFAULT_INVENTORY_GAP_MINUTES;
use crate::Result;

/// Coverage summary for one (station, block title) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    /// Distinct package timestamps carrying this block
    pub count: usize,

    /// Earliest observation
    pub first: DateTime<Utc>,

    /// Latest observation
    pub last: DateTime<Utc>,

    /// Intervals between consecutive observations further apart than the
    /// scan's gap threshold
    pub dropouts: Vec<(DateTime<Utc>, DateTime<Utc>)>,
}

/// Coverage inventory over a set of files
#[derive(Debug, Clone, Default)]
pub struct BlockInventory {
    /// (station, block title) → coverage summary
    pub summaries: BTreeMap<(String, String), BlockSummary>,

    /// Files parsed to completion
    pub files_processed: usize,

    /// Files skipped after an unrecoverable parse failure
    pub files_failed: usize,
}

impl BlockInventory {
    /// Scan with the default two-hour dropout threshold
    pub fn scan<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::scan_with_gap(files, Duration::minutes(DEFAULT_INVENTORY_GAP_MINUTES))
    }

    /// Scan every file, recording where each block's record has gaps wider
    /// than `max_gap`. Files that fail to parse are logged and skipped.
    pub fn scan_with_gap<I, P>(files: I, max_gap: Duration) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut timestamps: BTreeMap<(String, String), BTreeSet<DateTime<Utc>>> = BTreeMap::new();
        let mut inventory = Self::default();

        for file in files {
            let file = file.as_ref();
            match collect_timestamps(file, &mut timestamps) {
                Ok(()) => inventory.files_processed += 1,
                Err(error) => {
                    inventory.files_failed += 1;
                    warn!(
                        file = %file.display(),
                        %error,
                        "skipping file after unrecoverable parse failure"
                    );
                }
            }
        }

        for (key, observed) in timestamps {
            let mut dropouts = Vec::new();
            for pair in observed.iter().collect::<Vec<_>>().windows(2) {
                if *pair[1] - *pair[0] > max_gap {
                    dropouts.push((*pair[0], *pair[1]));
                }
            }
            let (Some(&first), Some(&last)) = (observed.iter().next(), observed.iter().next_back())
            else {
                continue;
            };
            inventory.summaries.insert(
                key,
                BlockSummary {
                    count: observed.len(),
                    first,
                    last,
                    dropouts,
                },
            );
        }

        info!(
            files_processed = inventory.files_processed,
            files_failed = inventory.files_failed,
            blocks = inventory.summaries.len(),
            "inventory scan complete"
        );

        inventory
    }

    /// Summary for one station/block pair, if it was seen at all
    pub fn summary(&self, station: &str, block: &str) -> Option<&BlockSummary> {
        self.summaries
            .get(&(station.to_string(), block.to_string()))
    }
}

fn collect_timestamps(
    file: &Path,
    timestamps: &mut BTreeMap<(String, String), BTreeSet<DateTime<Utc>>>,
) -> Result<()> {
    let parsed = D22Parser::new(file)?.parse()?;
    for (station, packages) in &parsed.data.stations {
        for (&timestamp, package) in packages {
            for title in package.blocks.keys() {
                timestamps
                    .entry((station.clone(), title.clone()))
                    .or_default()
                    .insert(timestamp);
            }
        }
    }
    Ok(())
}
