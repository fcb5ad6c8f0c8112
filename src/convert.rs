//! Rounding and 12/24-hour clock conversion.
//!
//! These are the only rules with real branching in the crate; everything
//! else composes them.

use crate::consts::{HOURS_PER_DAY, MAX_HOUR_12, MINUTE_STEP};
use crate::types::Meridiem;
use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone, Timelike};

/// Rounds a minute up to the next multiple of five (`ceil(m / 5) * 5`).
///
/// `0` stays `0`; `56..=59` round to `60`, which callers must carry into
/// the next hour (see [`round_up_time`]).
pub const fn round_to_five_minutes(minute: u8) -> u8 {
    minute.div_ceil(MINUTE_STEP) * MINUTE_STEP
}

/// Converts a 12-hour clock hour and meridiem into `0..=23`.
///
/// Returns `None` when `hour` is outside `1..=12`.
pub const fn to_24_hr(hour: u8, meridiem: Meridiem) -> Option<u8> {
    if hour == 0 || hour > MAX_HOUR_12 {
        return None;
    }
    match (meridiem, hour) {
        (Meridiem::Am, MAX_HOUR_12) => Some(0),
        (Meridiem::Am, h) => Some(h),
        (Meridiem::Pm, MAX_HOUR_12) => Some(MAX_HOUR_12),
        (Meridiem::Pm, h) => Some(h + MAX_HOUR_12),
    }
}

/// Converts a `0..=23` hour into the `1..=12` display hour.
///
/// Returns `None` when `hour24` is 24 or more.
pub const fn to_12_hr(hour24: u8) -> Option<u8> {
    match hour24 {
        0 => Some(MAX_HOUR_12),
        h if h > MAX_HOUR_12 && h < HOURS_PER_DAY => Some(h - MAX_HOUR_12),
        h if h < HOURS_PER_DAY => Some(h),
        _ => None,
    }
}

/// Meridiem of a `0..=23` hour: midnight through 11 is am, noon onwards pm.
pub const fn meridiem_of(hour24: u8) -> Option<Meridiem> {
    match hour24 {
        0..12 => Some(Meridiem::Am),
        12..24 => Some(Meridiem::Pm),
        _ => None,
    }
}

/// Minutes to add to reach the next five-minute mark, seconds dropped
fn minutes_to_next_mark(time: NaiveTime) -> (NaiveTime, TimeDelta) {
    let minute = time.minute() as u8;
    let delta = round_to_five_minutes(minute) - minute;
    let truncated = time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time);
    (truncated, TimeDelta::minutes(i64::from(delta)))
}

/// Rounds a wall-clock time up to the five-minute grid.
///
/// Returns the rounded time and whether it wrapped past midnight.
pub fn round_up_time(time: NaiveTime) -> (NaiveTime, bool) {
    let (truncated, delta) = minutes_to_next_mark(time);
    let (rounded, wrapped_secs) = truncated.overflowing_add_signed(delta);
    (rounded, wrapped_secs != 0)
}

fn truncate_seconds<Z: TimeZone>(value: &DateTime<Z>) -> Option<DateTime<Z>> {
    value.with_second(0)?.with_nanosecond(0)
}

/// Rounds a zoned datetime up until its wall-clock time sits on the
/// five-minute grid, carrying into the next hour or day as needed.
///
/// The minutes are added to the instant, not to the local time, so the
/// result always exists in its zone: 01:57 EST on a spring-forward night
/// becomes 03:00 EDT rather than the skipped 02:00. `None` only at the end
/// of chrono's range.
pub fn round_up_instant<Z: TimeZone>(value: &DateTime<Z>) -> Option<DateTime<Z>> {
    let (_, delta) = minutes_to_next_mark(value.time());
    truncate_seconds(value)?.checked_add_signed(delta)
}

/// Rounds a zoned datetime down onto the five-minute grid of its wall clock
pub fn round_down_instant<Z: TimeZone>(value: &DateTime<Z>) -> Option<DateTime<Z>> {
    let past_mark = value.minute() % u32::from(MINUTE_STEP);
    truncate_seconds(value)?.checked_sub_signed(TimeDelta::minutes(i64::from(past_mark)))
}
