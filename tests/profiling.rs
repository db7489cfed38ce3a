use std::time::Duration;

use speculoos::prelude::*;
use squareworldcraft::systems::profiling::{
    format_timing_display, SampleWindow, SystemId, SystemTimings, Timing, TimingStats,
};
use strum::IntoEnumIterator;

macro_rules! assert_close {
    ($actual:expr, $expected:expr, $concern:expr) => {
        let tolerance = Duration::from_micros(500);
        let diff = $actual.abs_diff($expected);
        assert!(
            diff < tolerance,
            "Expected {expected:?} +- {tolerance:.0?}, got {actual:?}, off by {diff:?} ({concern})",
            concern = $concern,
            expected = $expected,
            actual = $actual,
            tolerance = tolerance,
            diff = diff
        );
    };
}

#[test]
fn test_window_statistics() {
    let mut window = SampleWindow::default();
    window.record(Duration::from_millis(10), 1);
    window.record(Duration::from_millis(12), 2);
    window.record(Duration::from_millis(8), 3);

    let stats = window.stats(3);

    assert_close!(stats.mean, Duration::from_millis(10), "mean");
    assert_close!(stats.deviation, Duration::from_millis(2), "deviation");
}

#[test]
fn test_missed_frames_count_as_zero() {
    let mut window = SampleWindow::default();
    window.record(Duration::from_millis(10), 1);

    let stats = window.stats(3);

    assert_that(&window.len()).is_equal_to(2);
    assert_close!(stats.mean, Duration::from_millis(5), "mean with a missed frame");
}

#[test]
fn test_stale_samples_are_dropped() {
    let mut window = SampleWindow::default();
    window.record(Duration::from_millis(4), 1);
    window.record(Duration::from_millis(40), 0);

    assert_that(&window.len()).is_equal_to(1);
    assert_that(&window.latest()).is_equal_to(Duration::from_millis(4));
}

#[test]
fn test_window_is_bounded() {
    let mut window = SampleWindow::default();
    for tick in 1..=100 {
        window.record(Duration::from_millis(1), tick);
    }
    assert_that(&window.len()).is_equal_to(30);
}

#[test]
fn test_single_sample_has_no_deviation() {
    let mut window = SampleWindow::default();
    window.record(Duration::from_millis(3), 1);

    let stats = window.stats(1);

    assert_close!(stats.mean, Duration::from_millis(3), "mean");
    assert_that(&stats.deviation).is_equal_to(Duration::ZERO);
}

#[test]
fn test_default_zero_timing_for_unused_systems() {
    let timings = SystemTimings::default();
    let stats = timings.get_stats(1);

    for id in SystemId::iter() {
        assert_that(&stats.get(&id).copied()).is_equal_to(Some(TimingStats::default()));
    }
}

#[test]
fn test_slow_systems_are_named() {
    let timings = SystemTimings::default();
    timings.add_timing(SystemId::Creatures, Duration::from_millis(5), 1);
    timings.add_timing(SystemId::WorldRender, Duration::from_millis(3), 1);
    timings.add_timing(SystemId::Plants, Duration::from_micros(10), 1);

    let slowest = timings.get_slowest_systems();

    assert_that(&slowest.as_slice()).is_equal_to(
        &[
            (SystemId::Creatures, Duration::from_millis(5)),
            (SystemId::WorldRender, Duration::from_millis(3)),
        ][..],
    );
}

#[test]
fn test_fast_frames_name_the_largest_share() {
    let timings = SystemTimings::default();
    timings.add_timing(SystemId::Creatures, Duration::from_micros(900), 1);
    timings.add_timing(SystemId::Plants, Duration::from_micros(50), 1);
    timings.add_timing(SystemId::Input, Duration::from_micros(50), 1);

    let slowest = timings.get_slowest_systems();

    assert_that(&slowest.as_slice()).is_equal_to(&[(SystemId::Creatures, Duration::from_micros(900))][..]);
}

#[test]
fn test_format_timing_display_aligns_columns() {
    let rows = vec![
        (
            "total".to_string(),
            TimingStats {
                mean: Duration::from_micros(1500),
                deviation: Duration::from_micros(250),
            },
        ),
        (
            "creatures".to_string(),
            TimingStats {
                mean: Duration::from_micros(12_250),
                deviation: Duration::from_nanos(300),
            },
        ),
    ];

    let lines = format_timing_display(rows);

    assert_that(&lines.len()).is_equal_to(2);
    assert_that(&lines[0].starts_with("total ")).is_true();
    assert_that(&lines[0].ends_with(" :  1.500ms +- 250.000us")).is_true();
    assert_that(&lines[1].ends_with(" : 12.250ms +- 300.000ns")).is_true();
    assert_that(&lines[0].find(':')).is_equal_to(lines[1].find(':'));
}

#[test]
fn test_overlay_leads_with_frame_rate() {
    let timings = SystemTimings::default();
    timings.add_total_timing(Duration::from_millis(10), 1);
    timings.add_timing(SystemId::Creatures, Duration::from_millis(4), 1);

    let lines = timings.format_timing_display(1);

    assert_that(&lines[0].contains("100 FPS")).is_true();
    assert_that(&lines[1].starts_with("creatures")).is_true();
}

#[test]
fn test_tick_counter() {
    let timing = Timing::default();
    assert_that(&timing.get_current_tick()).is_equal_to(0);
    assert_that(&timing.increment_tick()).is_equal_to(1);
    assert_that(&timing.increment_tick()).is_equal_to(2);
    assert_that(&timing.get_current_tick()).is_equal_to(2);
}
