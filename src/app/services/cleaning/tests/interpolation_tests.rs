//! Tests for bounded gap interpolation

use crate::app::services::cleaning::interpolate_short_dropouts;

#[test]
fn single_point_gap_is_exactly_recovered() {
    let x = vec![1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0];
    let filled = interpolate_short_dropouts(&x, 1);
    assert_eq!(filled, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
}

#[test]
fn run_longer_than_max_stays_missing() {
    let x = vec![1.0, 2.0, f64::NAN, f64::NAN, 5.0, 6.0, 7.0];
    let filled = interpolate_short_dropouts(&x, 1);
    assert!(filled[2].is_nan());
    assert!(filled[3].is_nan());
    assert_eq!(filled[4], 5.0);
}

#[test]
fn run_within_max_is_filled_linearly() {
    let x = vec![1.0, 2.0, f64::NAN, f64::NAN, 5.0, 6.0, 7.0];
    let filled = interpolate_short_dropouts(&x, 2);
    assert!((filled[2] - 3.0).abs() < 1e-9);
    assert!((filled[3] - 4.0).abs() < 1e-9);
}

#[test]
fn edge_gaps_are_never_filled() {
    let x = vec![f64::NAN, 2.0, 3.0, 4.0, f64::NAN];
    let filled = interpolate_short_dropouts(&x, 2);
    assert!(filled[0].is_nan());
    assert!(filled[4].is_nan());
}

#[test]
fn run_one_sample_over_the_limit_stays_missing() {
    let x = vec![1.0, 2.0, f64::NAN, f64::NAN, f64::NAN, 6.0, 7.0];
    let filled = interpolate_short_dropouts(&x, 2);
    assert!(filled[2].is_nan());
    assert!(filled[3].is_nan());
    assert!(filled[4].is_nan());
}

#[test]
fn quadratic_setting_recovers_a_parabola_gap() {
    let mut x: Vec<f64> = (0..20).map(|i| {
        let t = i as f64;
        1.0 + 0.5 * t + 0.25 * t * t
    }).collect();
    let expected = x.clone();
    x[9] = f64::NAN;
    x[10] = f64::NAN;

    let filled = interpolate_short_dropouts(&x, 4);

    assert!((filled[9] - expected[9]).abs() < 1e-6);
    assert!((filled[10] - expected[10]).abs() < 1e-6);
}

#[test]
fn valid_samples_are_never_modified() {
    let x = vec![1.0, f64::NAN, 3.0, 9.0, f64::NAN, 11.0];
    let filled = interpolate_short_dropouts(&x, 1);
    assert_eq!(filled[0], 1.0);
    assert_eq!(filled[2], 3.0);
    assert_eq!(filled[3], 9.0);
    assert_eq!(filled[5], 11.0);
}
