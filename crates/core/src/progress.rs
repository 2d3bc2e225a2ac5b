//! Schedule progress for a project, expressed as a whole percentage.
//!
//! Progress is the share of the `[start, end]` interval that has elapsed at
//! `now`, measured at millisecond precision rather than in calendar days so
//! the boundaries do not drift by a day.

use crate::types::Timestamp;

/// Smallest progress value.
pub const PROGRESS_MIN: u8 = 0;

/// Largest progress value.
pub const PROGRESS_MAX: u8 = 100;

/// Compute completion percentage of the interval `[start, end]` at `now`.
///
/// - A missing `start` or `end` yields 0.
/// - Before `start` yields 0, after `end` yields 100.
/// - A zero-length interval yields 100 once `now` has reached it.
/// - Otherwise the elapsed ratio is rounded to the nearest integer. Strictly
///   inside the interval the result is kept within `[1, 99]`, so a started
///   project never reads 0 and an unfinished one never reads 100.
pub fn compute_progress(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
    now: Timestamp,
) -> u8 {
    let (Some(start), Some(end)) = (start, end) else {
        return PROGRESS_MIN;
    };

    if now < start {
        return PROGRESS_MIN;
    }
    if now > end {
        return PROGRESS_MAX;
    }

    let total_ms = (end - start).num_milliseconds();
    if total_ms <= 0 {
        // start == end == now here; an inverted interval cannot reach this
        // point because `now` would be either before start or after end.
        return PROGRESS_MAX;
    }

    let elapsed_ms = (now - start).num_milliseconds();
    let percent = (elapsed_ms as f64 / total_ms as f64 * 100.0).round();
    if now > start && now < end {
        percent.clamp(f64::from(PROGRESS_MIN + 1), f64::from(PROGRESS_MAX - 1)) as u8
    } else {
        percent.clamp(f64::from(PROGRESS_MIN), f64::from(PROGRESS_MAX)) as u8
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn at(day: u32, hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn missing_start_is_zero() {
        assert_eq!(compute_progress(None, Some(at(10, 0)), at(5, 0)), 0);
    }

    #[test]
    fn missing_end_is_zero() {
        assert_eq!(compute_progress(Some(at(1, 0)), None, at(5, 0)), 0);
    }

    #[test]
    fn both_missing_is_zero() {
        assert_eq!(compute_progress(None, None, at(5, 0)), 0);
    }

    #[test]
    fn before_start_is_zero() {
        assert_eq!(compute_progress(Some(at(10, 0)), Some(at(20, 0)), at(5, 0)), 0);
    }

    #[test]
    fn after_end_is_hundred() {
        assert_eq!(compute_progress(Some(at(1, 0)), Some(at(5, 0)), at(6, 0)), 100);
    }

    #[test]
    fn exactly_at_end_is_hundred() {
        assert_eq!(compute_progress(Some(at(1, 0)), Some(at(5, 0)), at(5, 0)), 100);
    }

    #[test]
    fn exactly_at_start_is_zero() {
        assert_eq!(compute_progress(Some(at(1, 0)), Some(at(5, 0)), at(1, 0)), 0);
    }

    #[test]
    fn midpoint_is_fifty() {
        assert_eq!(compute_progress(Some(at(1, 0)), Some(at(11, 0)), at(6, 0)), 50);
    }

    #[test]
    fn ratio_is_rounded_to_nearest() {
        // 1 of 3 days elapsed -> 33.33..% -> 33
        assert_eq!(compute_progress(Some(at(1, 0)), Some(at(4, 0)), at(2, 0)), 33);
        // 2 of 3 days elapsed -> 66.66..% -> 67
        assert_eq!(compute_progress(Some(at(1, 0)), Some(at(4, 0)), at(3, 0)), 67);
    }

    #[test]
    fn sub_day_precision_is_used() {
        // 12 hours into a 2 day interval is 25%, not 0% as day truncation would give.
        assert_eq!(compute_progress(Some(at(1, 0)), Some(at(3, 0)), at(1, 12)), 25);
    }

    #[test]
    fn zero_length_interval_reached_is_hundred() {
        let start = at(7, 0);
        assert_eq!(compute_progress(Some(start), Some(start), start), 100);
    }

    #[test]
    fn zero_length_interval_not_reached_is_zero() {
        let start = at(7, 0);
        assert_eq!(compute_progress(Some(start), Some(start), at(6, 0)), 0);
    }

    #[test]
    fn inside_interval_is_strictly_between_bounds() {
        let start = at(1, 0);
        let end = at(31, 0);
        let mut now = start + Duration::hours(1);
        while now < end - Duration::hours(1) {
            let p = compute_progress(Some(start), Some(end), now);
            assert!(p > 0 && p < 100, "progress {p} at {now} out of (0, 100)");
            now += Duration::hours(7);
        }
    }

    #[test]
    fn one_millisecond_after_start_is_one() {
        let start = at(1, 0);
        let end = at(31, 0);
        let now = start + Duration::milliseconds(1);
        assert_eq!(compute_progress(Some(start), Some(end), now), 1);
    }

    #[test]
    fn one_millisecond_before_end_is_ninety_nine() {
        let start = at(1, 0);
        let end = at(31, 0);
        let now = end - Duration::milliseconds(1);
        assert_eq!(compute_progress(Some(start), Some(end), now), 99);
    }

    #[test]
    fn first_hour_of_a_month_is_one() {
        // 1h / 30d is 0.14%, which would round to 0.
        assert_eq!(
            compute_progress(Some(at(1, 0)), Some(at(31, 0)), at(1, 1)),
            1
        );
    }

    #[test]
    fn finished_intervals_are_always_hundred() {
        let now = at(31, 0);
        for (s, e) in [(1, 2), (1, 31), (10, 10), (30, 31)] {
            assert_eq!(compute_progress(Some(at(s, 0)), Some(at(e, 0)), now), 100);
        }
    }

    #[test]
    fn inverted_interval_never_panics() {
        let start = at(10, 0);
        let end = at(5, 0);
        assert_eq!(compute_progress(Some(start), Some(end), at(1, 0)), 0);
        assert_eq!(compute_progress(Some(start), Some(end), at(7, 0)), 0);
        assert_eq!(compute_progress(Some(start), Some(end), at(20, 0)), 100);
    }
}
