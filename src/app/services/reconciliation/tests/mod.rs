//! Tests for segment reconciliation

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::app::models::TimeGrid;

mod detrend_tests;

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

/// The timestamp of grid point `index` on the test grid
pub fn grid_time(index: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(10 * index as i64)
}
