//! Test utilities and fixture builders for parser testing

use std::io::Write;

use tempfile::TempDir;

mod parser_tests;

/// Write d22 content to a temp file and return the handles
pub fn write_d22(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("fixture.d22");
    let mut file = std::fs::File::create(&path).expect("create fixture");
    file.write_all(content.as_bytes()).expect("write fixture");
    (dir, path)
}

/// Build one well-formed package with the given blocks.
///
/// Each block is (title, entry lines); the declared count on the title line
/// is entries + 1, matching the wire convention.
pub fn package(station: &str, date: &str, time: &str, blocks: &[(&str, &[&str])]) -> String {
    let mut out = String::new();
    out.push_str("!!!!\n");
    out.push_str("DF022\n");
    out.push_str(station);
    out.push('\n');
    out.push_str(date);
    out.push('\n');
    out.push_str(time);
    out.push('\n');
    for (title, entries) in blocks {
        out.push_str(&format!("\u{000C}{}-{}\n", title, entries.len() + 1));
        for entry in *entries {
            out.push_str(entry);
            out.push('\n');
        }
    }
    out.push_str("\u{000C}$$$$$$$\n");
    out
}
