//! Tests for per-segment detrending

use super::{grid_time, ten_minute_grid};
use crate::app::services::reconciliation::detrend_segments;
use crate::config::DetrendTable;

#[test]
fn exact_linear_trends_are_removed_per_segment() {
    let grid = ten_minute_grid(20);
    let mut signal = Vec::with_capacity(20);
    for i in 0..10 {
        signal.push(2.0 + 0.5 * i as f64);
    }
    for i in 0..10 {
        signal.push(-1.0 + 0.2 * i as f64);
    }
    let table = DetrendTable {
        boundaries: vec![grid_time(0), grid_time(10), grid_time(20)],
    };

    let detrended = detrend_segments(&signal, &grid, &table).unwrap();

    for value in detrended {
        assert!(value.abs() < 1e-9);
    }
}

#[test]
fn constant_segment_is_centered_on_zero() {
    let grid = ten_minute_grid(10);
    let signal = vec![7.5; 10];
    let table = DetrendTable {
        boundaries: vec![grid_time(0), grid_time(10)],
    };

    let detrended = detrend_segments(&signal, &grid, &table).unwrap();

    for value in detrended {
        assert!(value.abs() < 1e-9);
    }
}

#[test]
fn missing_samples_stay_missing_and_do_not_skew_the_fit() {
    let grid = ten_minute_grid(12);
    let mut signal: Vec<f64> = (0..12).map(|i| 1.0 + 2.0 * i as f64).collect();
    signal[4] = f64::NAN;
    signal[5] = f64::NAN;
    let table = DetrendTable {
        boundaries: vec![grid_time(0), grid_time(12)],
    };

    let detrended = detrend_segments(&signal, &grid, &table).unwrap();

    assert!(detrended[4].is_nan());
    assert!(detrended[5].is_nan());
    for (i, value) in detrended.iter().enumerate() {
        if i != 4 && i != 5 {
            assert!(value.abs() < 1e-9);
        }
    }
}

#[test]
fn sparse_segment_is_left_unmodified() {
    let grid = ten_minute_grid(10);
    let mut signal = vec![f64::NAN; 10];
    // second segment has a single finite sample, not enough to fit a line
    signal[7] = 42.0;
    let table = DetrendTable {
        boundaries: vec![grid_time(0), grid_time(5), grid_time(10)],
    };

    let detrended = detrend_segments(&signal, &grid, &table).unwrap();

    assert_eq!(detrended[7], 42.0);
    for (i, value) in detrended.iter().enumerate() {
        if i != 7 {
            assert!(value.is_nan());
        }
    }
}

#[test]
fn mismatched_signal_length_is_rejected() {
    let grid = ten_minute_grid(10);
    let table = DetrendTable {
        boundaries: vec![grid_time(0), grid_time(10)],
    };
    assert!(detrend_segments(&[1.0; 4], &grid, &table).is_err());
}

#[test]
fn invalid_table_is_rejected() {
    let grid = ten_minute_grid(10);
    let table = DetrendTable {
        boundaries: vec![grid_time(0)],
    };
    assert!(detrend_segments(&[1.0; 10], &grid, &table).is_err());
}
