//! Test utilities for line source testing

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;


/// Write raw bytes to a named file inside a fresh temp dir
pub fn write_fixture(name: &str, bytes: &[u8]) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture file");
    file.write_all(bytes).expect("write fixture");
    (dir, path)
}

/// Write gzip-compressed bytes to a named file inside a fresh temp dir
pub fn write_gz_fixture(name: &str, bytes: &[u8]) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    let file = std::fs::File::create(&path).expect("create fixture file");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(bytes).expect("write gz fixture");
    encoder.finish().expect("finish gz fixture");
    (dir, path)
}
