//! Tests for the d22 protocol state machine

use chrono::{TimeZone, Utc};

use super::{package, write_d22};
use crate::Error;
use crate::app::services::d22_parser::{D22Parser, ParserState};

const WL1_ENTRIES: &[&str] = &["56.97", "-56.97", "56.05", "57.86", "-57.86", "-56.05"];

#[test]
fn parses_well_formed_packages() {
    let content = package("Heimdal", "23/09/2013", "00:10", &[("WL1", WL1_ENTRIES)])
        + &package("Heimdal", "23/09/2013", "00:20", &[("MD1", &["2.00"])]);
    let (_dir, path) = write_d22(&content);

    let result = D22Parser::new(&path).unwrap().parse().unwrap();

    assert_eq!(result.data.package_count(), 2);
    assert_eq!(result.stats.packages, 2);
    assert_eq!(result.stats.blocks, 2);
    assert!(result.stats.is_clean());

    let ts = Utc.with_ymd_and_hms(2013, 9, 23, 0, 10, 0).unwrap();
    let block = result.data.block("Heimdal", ts, "WL1").unwrap();
    assert_eq!(block.declared_entries, 6);
    assert_eq!(
        block.values,
        vec![56.97, -56.97, 56.05, 57.86, -57.86, -56.05]
    );
    assert!(!block.partial);
    assert_eq!(block.block_type(), "WL");
}

#[test]
fn station_name_is_trimmed_of_trailing_whitespace() {
    let content = package("Heimdal \r", "23/09/2013", "00:10", &[("MD1", &["2.00"])]);
    let (_dir, path) = write_d22(&content);

    let result = D22Parser::new(&path).unwrap().parse().unwrap();
    assert!(result.data.stations.contains_key("Heimdal"));
}

#[test]
fn duplicate_package_keeps_first_occurrence() {
    let content = package("Heimdal", "23/09/2013", "00:10", &[("MD1", &["1.00"])])
        + &package("Heimdal", "23/09/2013", "00:10", &[("MD1", &["9.00"])]);
    let (_dir, path) = write_d22(&content);

    let result = D22Parser::new(&path).unwrap().parse().unwrap();

    assert_eq!(result.data.package_count(), 1);
    assert_eq!(result.stats.duplicate_packages, 1);

    let ts = Utc.with_ymd_and_hms(2013, 9, 23, 0, 10, 0).unwrap();
    let block = result.data.block("Heimdal", ts, "MD1").unwrap();
    assert_eq!(block.values, vec![1.00]);
}

#[test]
fn duplicate_package_merges_unseen_block_titles() {
    let content = package("Heimdal", "23/09/2013", "00:10", &[("MD1", &["1.00"])])
        + &package(
            "Heimdal",
            "23/09/2013",
            "00:10",
            &[("MD1", &["9.00"]), ("VG1", &["3.50"])],
        );
    let (_dir, path) = write_d22(&content);

    let result = D22Parser::new(&path).unwrap().parse().unwrap();

    assert_eq!(result.data.package_count(), 1);
    assert_eq!(result.stats.blocks, 2);

    let ts = Utc.with_ymd_and_hms(2013, 9, 23, 0, 10, 0).unwrap();
    // the re-announced title kept its first value, the new title was merged
    assert_eq!(
        result.data.block("Heimdal", ts, "MD1").unwrap().values,
        vec![1.00]
    );
    assert_eq!(
        result.data.block("Heimdal", ts, "VG1").unwrap().values,
        vec![3.50]
    );
}

#[test]
fn duplicate_block_is_ignored_but_consumed() {
    let content = package(
        "Heimdal",
        "23/09/2013",
        "00:10",
        &[("MD1", &["1.00"]), ("MD1", &["9.00"]), ("VG1", &["3.50"])],
    );
    let (_dir, path) = write_d22(&content);

    let result = D22Parser::new(&path).unwrap().parse().unwrap();

    assert_eq!(result.stats.duplicate_blocks, 1);
    assert_eq!(result.stats.blocks, 2);

    let ts = Utc.with_ymd_and_hms(2013, 9, 23, 0, 10, 0).unwrap();
    assert_eq!(
        result.data.block("Heimdal", ts, "MD1").unwrap().values,
        vec![1.00]
    );
    // stream position stayed correct: the following block still parsed
    assert_eq!(
        result.data.block("Heimdal", ts, "VG1").unwrap().values,
        vec![3.50]
    );
}

#[test]
fn corrupt_field_truncates_block_and_parsing_resumes() {
    let content = package(
        "Heimdal",
        "23/09/2013",
        "00:10",
        &[
            ("WL1", &["56.97", "-56.97", "&%garbage", "57.86", "-57.86", "-56.05"]),
            ("MD1", &["2.00"]),
        ],
    );
    let (_dir, path) = write_d22(&content);

    let result = D22Parser::new(&path).unwrap().parse().unwrap();

    assert_eq!(result.stats.partial_blocks, 1);

    let ts = Utc.with_ymd_and_hms(2013, 9, 23, 0, 10, 0).unwrap();
    let block = result.data.block("Heimdal", ts, "WL1").unwrap();
    assert!(block.partial);
    assert_eq!(
        block.values,
        vec![56.97, -56.97, crate::constants::INVALID_FIELD_SENTINEL]
    );

    // the corrupt line was pushed back and reprocessed; the following lines
    // were reconsidered until the next valid marker, so MD1 still decoded
    assert_eq!(
        result.data.block("Heimdal", ts, "MD1").unwrap().values,
        vec![2.00]
    );
    assert!(result.stats.unrecognized_lines > 0);
}

#[test]
fn truncated_transmission_recovers_on_new_start_marker() {
    // first package is cut mid-stream by a fresh start marker
    let cut_package = "!!!!\nDF022\nHeimdal\n23/09/2013\n00:10\n\u{000C}MD1-2\n1.00\n";
    let content =
        cut_package.to_string() + &package("Heimdal", "23/09/2013", "00:20", &[("MD1", &["2.00"])]);
    let (_dir, path) = write_d22(&content);

    let result = D22Parser::new(&path).unwrap().parse().unwrap();

    assert_eq!(result.stats.truncated_packages, 1);
    assert_eq!(result.data.package_count(), 2);

    let ts = Utc.with_ymd_and_hms(2013, 9, 23, 0, 20, 0).unwrap();
    assert_eq!(
        result.data.block("Heimdal", ts, "MD1").unwrap().values,
        vec![2.00]
    );
}

#[test]
fn unrecognized_line_is_logged_and_skipped() {
    let mut content = package("Heimdal", "23/09/2013", "00:10", &[("MD1", &["2.00"])]);
    // splice junk between block and end marker
    content = content.replace(
        "\u{000C}$$$$$$$",
        "spurious noise line\n\u{000C}$$$$$$$",
    );
    let (_dir, path) = write_d22(&content);

    let result = D22Parser::new(&path).unwrap().parse().unwrap();

    assert_eq!(result.stats.unrecognized_lines, 1);
    assert_eq!(result.data.package_count(), 1);
    assert_eq!(result.stats.blocks, 1);
}

#[test]
fn unknown_format_tag_fails_the_file() {
    let content = package("Heimdal", "23/09/2013", "00:10", &[("MD1", &["2.00"])])
        .replace("DF022", "XX999");
    let (_dir, path) = write_d22(&content);

    let err = D22Parser::new(&path).unwrap().parse().unwrap_err();
    assert!(matches!(err, Error::FormatTag { .. }));
}

#[test]
fn accepts_all_known_format_tags() {
    for tag in ["DF022", "DF-022 rest", "DF-015/01"] {
        let content =
            package("Heimdal", "23/09/2013", "00:10", &[("MD1", &["2.00"])]).replace("DF022", tag);
        let (_dir, path) = write_d22(&content);
        assert!(D22Parser::new(&path).unwrap().parse().is_ok(), "tag {tag}");
    }
}

#[test]
fn eof_inside_open_package_is_fatal() {
    let content = "!!!!\nDF022\nHeimdal\n23/09/2013\n00:10\n\u{000C}MD1-2\n1.00\n";
    let (_dir, path) = write_d22(content);

    let err = D22Parser::new(&path).unwrap().parse().unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
}

#[test]
fn empty_file_parses_gracefully() {
    let (_dir, path) = write_d22("");
    let result = D22Parser::new(&path).unwrap().parse().unwrap();
    assert_eq!(result.data.package_count(), 0);
    assert!(result.stats.is_clean());
}

#[test]
fn stepping_a_finished_parser_is_a_usage_error() {
    let (_dir, path) = write_d22("");
    let mut parser = D22Parser::new(&path).unwrap();

    parser.step().unwrap();
    assert_eq!(parser.state(), ParserState::GracefulEnd);

    let err = parser.step().unwrap_err();
    assert!(matches!(err, Error::ParserState { .. }));
    assert_eq!(parser.state(), ParserState::GracefulEnd);
}

#[test]
fn streaming_step_interface_walks_states() {
    let content = package("Heimdal", "23/09/2013", "00:10", &[("MD1", &["2.00"])]);
    let (_dir, path) = write_d22(&content);
    let mut parser = D22Parser::new(&path).unwrap();

    assert_eq!(parser.state(), ParserState::OutsidePackage);
    parser.step().unwrap();
    assert_eq!(parser.state(), ParserState::InsideBlockSearch);
    while parser.state() != ParserState::GracefulEnd {
        parser.step().unwrap();
    }
    assert_eq!(parser.stats().packages, 1);
}
