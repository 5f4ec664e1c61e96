//! Core d22 parser state machine
//!
//! States: `OutsidePackage` (scanning for a start marker), `InsideBlockSearch`
//! (inside an open package, looking for block titles or the end marker), and
//! the terminal `GracefulEnd` / `ErrorEnd`. Driving a finished parser is a
//! usage error.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info, warn};

use super::stats::{ParseResult, ParseStats};
use crate::app::models::{Package, ParsedD22, RawBlock};
use crate::app::services::line_source::LineSource;
use crate::constants::{
    ACCEPTED_FORMAT_TAGS, BLOCK_TITLE_LEAD, BLOCK_TITLE_SEPARATOR, INVALID_FIELD_SENTINEL,
    PACKAGE_END_MARKER, PACKAGE_START_MARKER,
};
use crate::{Error, Result};

/// Parser state, exposed for streaming/diagnostic callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Scanning forward for a package-start marker
    OutsidePackage,
    /// Inside an open package, looking for block titles or the end marker
    InsideBlockSearch,
    /// End of input reached cleanly, outside any package
    GracefulEnd,
    /// Terminal failure; the file's remaining content is meaningless
    ErrorEnd,
}

/// Position of the package currently being filled
struct PackageCursor {
    station: String,
    timestamp: DateTime<Utc>,
}

/// State-machine parser for one d22 file.
///
/// `parse` drives the machine to completion; `step` performs one transition
/// for streaming or diagnostic use.
pub struct D22Parser {
    source: LineSource,
    file: String,
    state: ParserState,
    data: ParsedD22,
    stats: ParseStats,
    cursor: Option<PackageCursor>,
}

impl D22Parser {
    /// Open a parser over a plain or gzip-compressed d22 file
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = path.as_ref().display().to_string();
        let source = LineSource::open(path)?;
        Ok(Self {
            source,
            file,
            state: ParserState::OutsidePackage,
            data: ParsedD22::default(),
            stats: ParseStats::new(),
            cursor: None,
        })
    }

    /// Parse the whole file
    pub fn parse(mut self) -> Result<ParseResult> {
        while self.state != ParserState::GracefulEnd {
            self.step()?;
        }
        info!(
            file = %self.file,
            packages = self.stats.packages,
            blocks = self.stats.blocks,
            "finished parsing"
        );
        Ok(ParseResult {
            data: self.data,
            stats: self.stats,
        })
    }

    /// Perform one more step of parsing
    pub fn step(&mut self) -> Result<()> {
        match self.state {
            ParserState::OutsidePackage => self.step_outside_package(),
            ParserState::InsideBlockSearch => self.step_inside_block_search(),
            ParserState::GracefulEnd | ParserState::ErrorEnd => Err(Error::parser_state(format!(
                "parser for '{}' already reached a terminal state",
                self.file
            ))),
        }
        .inspect_err(|_| {
            if self.state != ParserState::GracefulEnd {
                self.state = ParserState::ErrorEnd;
            }
        })
    }

    /// Current state, for streaming callers
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Scan for the next package start, then read and register its header
    fn step_outside_package(&mut self) -> Result<()> {
        loop {
            let Some(line) = self.source.next_line()? else {
                debug!(file = %self.file, "gracefully ending parse");
                self.state = ParserState::GracefulEnd;
                return Ok(());
            };

            if line == PACKAGE_START_MARKER {
                break;
            }
        }

        let format_tag = self.header_line()?;
        let station_line = self.header_line()?;
        let date_line = self.header_line()?;
        let time_line = self.header_line()?;

        if !ACCEPTED_FORMAT_TAGS
            .iter()
            .any(|tag| format_tag.starts_with(tag))
        {
            return Err(Error::format_tag(&self.file, format_tag));
        }

        let station = station_line.trim_end().to_string();
        let timestamp = self.parse_header_timestamp(&date_line, &time_line)?;

        debug!(file = %self.file, %station, %timestamp, "found start of package");

        let timestamps = self.data.stations.entry(station.clone()).or_default();
        if timestamps.contains_key(&timestamp) {
            self.stats.duplicate_packages += 1;
            warn!(
                file = %self.file,
                %station,
                %timestamp,
                "meeting this package timestamp again; keeping the first occurrence"
            );
            self.warn_with_context();
        } else {
            timestamps.insert(timestamp, Package::default());
            self.stats.packages += 1;
        }

        self.cursor = Some(PackageCursor { station, timestamp });
        self.state = ParserState::InsideBlockSearch;
        Ok(())
    }

    /// Handle one line while inside an open package
    fn step_inside_block_search(&mut self) -> Result<()> {
        let line = self.require_line()?;

        if line == PACKAGE_END_MARKER {
            debug!(file = %self.file, "found end of package");
            self.cursor = None;
            self.state = ParserState::OutsidePackage;
            return Ok(());
        }

        if line == PACKAGE_START_MARKER {
            // transmission was cut; abandon this package and reprocess the
            // marker as a fresh start
            self.stats.truncated_packages += 1;
            warn!(
                file = %self.file,
                "unexpected start of package inside an open package; transmission was probably cut"
            );
            self.warn_with_context();
            self.source.push_back()?;
            self.cursor = None;
            self.state = ParserState::OutsidePackage;
            return Ok(());
        }

        if let Some((title, entry_count)) = parse_block_title(&line) {
            return self.read_block(title, entry_count);
        }

        self.stats.unrecognized_lines += 1;
        warn!(
            file = %self.file,
            content = %line,
            "line is neither end of package, start of package, nor start of block; \
             the corruption may be a few lines up"
        );
        self.warn_with_context();
        Ok(())
    }

    /// Read the K−1 numeric entries of a block and register it
    fn read_block(&mut self, title: String, entry_count: usize) -> Result<()> {
        debug!(file = %self.file, %title, entry_count, "found start of block");

        let cursor = self
            .cursor
            .as_ref()
            .ok_or_else(|| Error::parser_state("block found with no open package"))?;
        let station = cursor.station.clone();
        let timestamp = cursor.timestamp;

        let duplicate = self
            .data
            .block(&station, timestamp, &title)
            .is_some();
        if duplicate {
            self.stats.duplicate_blocks += 1;
            warn!(
                file = %self.file,
                %station,
                %timestamp,
                %title,
                "block title already present in this package; ignoring this block"
            );
            self.warn_with_context();
        }

        let mut values = Vec::with_capacity(entry_count.saturating_sub(1));
        let mut partial = false;

        for _ in 0..entry_count.saturating_sub(1) {
            let entry = self.require_line()?;

            match entry.trim().parse::<f64>() {
                Ok(value) => values.push(value),
                Err(_) => {
                    warn!(
                        file = %self.file,
                        %title,
                        content = %entry,
                        "block entry cannot be converted to a number; truncating block"
                    );
                    self.warn_with_context();
                    values.push(INVALID_FIELD_SENTINEL);
                    partial = true;
                    // reconsider this line as a block/package marker
                    self.source.push_back()?;
                    break;
                }
            }
        }

        if partial {
            self.stats.partial_blocks += 1;
        }

        if !duplicate {
            let block = RawBlock {
                title: title.clone(),
                declared_entries: entry_count.saturating_sub(1),
                values,
                partial,
            };
            if let Some(package) = self
                .data
                .stations
                .get_mut(&station)
                .and_then(|t| t.get_mut(&timestamp))
            {
                package.blocks.insert(title, block);
                self.stats.blocks += 1;
            }
        }

        Ok(())
    }

    /// Pull a line that must exist: EOF here means the package was cut off
    fn require_line(&mut self) -> Result<String> {
        self.source
            .next_line()?
            .ok_or_else(|| Error::unexpected_eof(&self.file, self.source.line_number()))
    }

    /// Header lines are mandatory once the start marker has been seen
    fn header_line(&mut self) -> Result<String> {
        self.require_line()
    }

    /// Parse the fixed-column date (dd/mm/yyyy) and time (hh:mm) header lines
    fn parse_header_timestamp(&self, date_line: &str, time_line: &str) -> Result<DateTime<Utc>> {
        let day = fixed_columns(date_line, 0, 2)?;
        let month = fixed_columns(date_line, 3, 5)?;
        let year = fixed_columns(date_line, 6, 10)?;
        let hour = fixed_columns(time_line, 0, 2)?;
        let minute = fixed_columns(time_line, 3, 5)?;

        Utc.with_ymd_and_hms(year as i32, month, day, hour, minute, 0)
            .single()
            .ok_or_else(|| {
                Error::data_validation(format!(
                    "file '{}': header lines '{date_line}' / '{time_line}' do not form a valid UTC timestamp",
                    self.file
                ))
            })
    }

    fn warn_with_context(&self) {
        warn!(
            file = %self.file,
            line = self.source.line_number(),
            "previous read lines:"
        );
        for (ordinal, content) in self.source.context() {
            warn!(line = ordinal, content = %content, "context");
        }
    }
}

/// Recognize a block-title line: optional form feed, title, '-', entry count
fn parse_block_title(line: &str) -> Option<(String, usize)> {
    let body = line.strip_prefix(BLOCK_TITLE_LEAD).unwrap_or(line);
    let separator = body.find(BLOCK_TITLE_SEPARATOR)?;
    let title = body[..separator].to_string();
    let count: usize = body[separator + 1..].trim().parse().ok()?;
    if title.is_empty() {
        return None;
    }
    Some((title, count))
}

/// Parse a fixed-column unsigned integer out of a header line
fn fixed_columns(line: &str, start: usize, end: usize) -> Result<u32> {
    line.get(start..end)
        .and_then(|s| s.trim().parse::<u32>().ok())
        .ok_or_else(|| {
            Error::data_validation(format!(
                "cannot read columns {start}..{end} of header line '{line}' as an integer"
            ))
        })
}
