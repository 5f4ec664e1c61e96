//! Core line source implementation
//!
//! The d22 archive stores files either plain or gzip-compressed, in a
//! single-byte Latin-1 encoding. The source owns its file handle for the
//! lifetime of the stream and releases it on drop.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::trace;

use crate::constants::{CONTEXT_WINDOW_LINES, EMPTY_CONTEXT_LINE, GZIP_SUFFIX};
use crate::{Error, Result};

/// Lazy line sequence over one telemetry file, with one-step pushback.
///
/// `push_back` arms a replay of the most recently yielded line on the next
/// pull. The replay slot holds at most one line: requesting pushback twice
/// without an intervening pull, or before any line has been pulled, is a
/// usage error rather than silent stream corruption.
pub struct LineSource {
    path: PathBuf,
    reader: Box<dyn BufRead>,
    /// Most recently yielded line, replayed when `replay` is armed
    held: Option<String>,
    replay: bool,
    /// 1-based ordinal of the most recently read line; 0 before any pull
    line_number: usize,
    /// Bounded trailing window of (ordinal, line) for diagnostics
    context: VecDeque<(usize, String)>,
}

impl LineSource {
    /// Open a d22 file, transparently decompressing a recognized gzip suffix.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .map_err(|e| Error::io(format!("failed to open {}", path.display()), e))?;

        let is_gzip = path
            .to_string_lossy()
            .to_lowercase()
            .ends_with(GZIP_SUFFIX);

        let reader: Box<dyn BufRead> = if is_gzip {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        let mut context = VecDeque::with_capacity(CONTEXT_WINDOW_LINES);
        for _ in 0..CONTEXT_WINDOW_LINES {
            context.push_back((0, EMPTY_CONTEXT_LINE.to_string()));
        }

        Ok(Self {
            path,
            reader,
            held: None,
            replay: false,
            line_number: 0,
            context,
        })
    }

    /// Pull the next line, or the pushed-back line if a replay is armed.
    ///
    /// Line terminators (`\n`, `\r\n`) are stripped. Returns `None` at end
    /// of input.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        if self.replay {
            self.replay = false;
            return Ok(self.held.clone());
        }

        let mut raw = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut raw)
            .map_err(|e| Error::io(format!("failed reading {}", self.path.display()), e))?;

        if read == 0 {
            return Ok(None);
        }

        if raw.last() == Some(&b'\n') {
            raw.pop();
        }
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }

        // Latin-1 is a direct byte-to-code-point widening
        let line: String = raw.iter().map(|&b| b as char).collect();

        self.line_number += 1;
        trace!(line = self.line_number, content = %line, "read line");

        self.context.pop_front();
        self.context.push_back((self.line_number, line.clone()));

        self.held = Some(line.clone());
        Ok(Some(line))
    }

    /// Arm a replay of the most recently yielded line on the next pull.
    pub fn push_back(&mut self) -> Result<()> {
        if self.replay {
            return Err(Error::pushback_usage(
                "a pushback is already pending; cannot replay two lines back",
            ));
        }
        if self.held.is_none() {
            return Err(Error::pushback_usage(
                "no line has been pulled yet; nothing to replay",
            ));
        }
        self.replay = true;
        Ok(())
    }

    /// Ordinal of the most recently read line (1-based; 0 before any pull)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Trailing window of recently read lines with their ordinals
    pub fn context(&self) -> Vec<(usize, String)> {
        self.context.iter().cloned().collect()
    }

    /// Path of the underlying file, for diagnostics
    pub fn path(&self) -> &Path {
        &self.path
    }
}
