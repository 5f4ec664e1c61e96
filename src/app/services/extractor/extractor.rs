//! Batch gathering of per-selector observations across many files

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::app::models::DataSpec;
use crate::app::services::block_interpreters::InterpreterRegistry;
use crate::app::services::d22_parser::D22Parser;
use crate::{Error, Result};

/// Statistics for one gathering run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatherStats {
    /// Files parsed to completion
    pub files_processed: usize,

    /// Files skipped after an unrecoverable parse failure
    pub files_failed: usize,

    /// Observations appended across all selectors
    pub observations: usize,
}

/// Gathered observations: selector → ordered (timestamp, value) list
#[derive(Debug, Clone)]
pub struct GatheredData {
    pub series: HashMap<DataSpec, Vec<(DateTime<Utc>, f64)>>,
    pub stats: GatherStats,
}

/// Extracts the selectors' observations from a lazily produced file sequence.
///
/// All selectors of one extractor must share a source folder; merging
/// selectors across locations is a caller error caught at construction.
#[derive(Debug)]
pub struct DataExtractor {
    specs: Vec<DataSpec>,
}

impl DataExtractor {
    pub fn new(specs: Vec<DataSpec>) -> Result<Self> {
        let Some(first) = specs.first() else {
            return Err(Error::spec_mismatch("no selectors given"));
        };
        for spec in &specs {
            if spec.folder != first.folder {
                return Err(Error::spec_mismatch(format!(
                    "selector {spec} does not share folder {} with the rest of the batch",
                    first.folder
                )));
            }
        }
        Ok(Self { specs })
    }

    /// Parse every file and gather matching observations per selector.
    ///
    /// Files that fail with a framing or format error are logged and
    /// skipped; previously gathered results are unaffected.
    pub fn gather<I, P>(&self, files: I) -> GatheredData
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut series: HashMap<DataSpec, Vec<(DateTime<Utc>, f64)>> = self
            .specs
            .iter()
            .map(|spec| (spec.clone(), Vec::new()))
            .collect();
        let mut stats = GatherStats::default();

        for file in files {
            let file = file.as_ref();
            info!(file = %file.display(), "gathering from file");

            match self.gather_one_file(file, &mut series) {
                Ok(appended) => {
                    stats.files_processed += 1;
                    stats.observations += appended;
                }
                Err(error) => {
                    stats.files_failed += 1;
                    warn!(
                        file = %file.display(),
                        %error,
                        "skipping file after unrecoverable parse failure"
                    );
                }
            }
        }

        info!(
            files_processed = stats.files_processed,
            files_failed = stats.files_failed,
            observations = stats.observations,
            "gathering complete"
        );

        GatheredData { series, stats }
    }

    fn gather_one_file(
        &self,
        file: &Path,
        series: &mut HashMap<DataSpec, Vec<(DateTime<Utc>, f64)>>,
    ) -> Result<usize> {
        let parsed = D22Parser::new(file)?.parse()?;
        let mut registry = InterpreterRegistry::new();
        let mut appended = 0;

        for (station, timestamps) in &parsed.data.stations {
            for (&timestamp, package) in timestamps {
                for (title, raw) in &package.blocks {
                    let Some(interpreted) = registry.decode(raw) else {
                        continue;
                    };
                    for (field, value) in interpreted.iter() {
                        if let Some(spec) = self.find_spec(station, title, field)
                            && let Some(list) = series.get_mut(spec)
                        {
                            list.push((timestamp, value));
                            appended += 1;
                        }
                    }
                }
            }
        }

        Ok(appended)
    }

    fn find_spec(&self, station: &str, block: &str, field: &str) -> Option<&DataSpec> {
        self.specs.iter().find(|spec| {
            spec.station_id == station && spec.block_id == block && spec.field == field
        })
    }
}
