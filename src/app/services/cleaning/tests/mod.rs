//! Tests for the cleaning pipeline

use chrono::{Duration, TimeZone, Utc};

use crate::app::models::TimeGrid;

mod interpolation_tests;

/// A 10-minute grid with the requested number of points
pub fn ten_minute_grid(points: usize) -> TimeGrid {
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    TimeGrid::new(
        start,
        start + Duration::minutes(10 * points as i64),
        Duration::minutes(10),
    )
    .unwrap()
}
