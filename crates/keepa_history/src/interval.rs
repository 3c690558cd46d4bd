//! Interval queries: extremes, time-weighted mean and stock availability.
//!
//! Every query walks the records in order and treats each one as a segment
//! `[time, next time)`. The last segment lasts until `now` (or forever, for
//! the extremes). A segment that starts before the window but is still in
//! effect at `start` is counted from `start`.

use keepa_history_core::time::MINUTES_PER_DAY;
use keepa_history_core::{NO_DATA, SeriesKind};
use serde::{Deserialize, Serialize};

use crate::entries::Records;

/// Lowest and highest landing value in an interval, each with the time it
/// was first observed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremePoints {
    pub low_time: i32,
    pub low: i32,
    pub high_time: i32,
    pub high: i32,
}

impl ExtremePoints {
    pub const NONE: ExtremePoints = ExtremePoints {
        low_time: NO_DATA,
        low: NO_DATA,
        high_time: NO_DATA,
        high: NO_DATA,
    };

    pub fn is_none(&self) -> bool {
        *self == ExtremePoints::NONE
    }
}

impl From<ExtremePoints> for [i32; 4] {
    fn from(p: ExtremePoints) -> Self {
        [p.low_time, p.low, p.high_time, p.high]
    }
}

/// Lowest and highest landing value observed in `[start, end)`.
///
/// Unavailable segments never count as an extreme. A value already in effect
/// when the window opens is reported at `start`. Ties keep the earliest
/// time. Returns [`ExtremePoints::NONE`] if nothing is known in the window.
pub fn extreme_points_in_interval(
    csv: &[i32],
    kind: impl Into<SeriesKind>,
    start: i32,
    end: i32,
) -> ExtremePoints {
    let records = Records::new(csv, kind.into());
    let Some(first) = records.first() else {
        return ExtremePoints::NONE;
    };
    if end <= start || end < first.time {
        tracing::trace!(start, end, first = first.time, "empty extremes window");
        return ExtremePoints::NONE;
    }
    let start = start.max(first.time);

    let mut low: Option<(i32, i32)> = None;
    let mut high: Option<(i32, i32)> = None;
    for (i, e) in records.iter() {
        if end <= e.time {
            break;
        }
        if e.is_unavailable() {
            continue;
        }

        let seen_at = if start <= e.time {
            e.time
        } else {
            match records.next_time(i) {
                Some(next) if next < start => continue,
                _ => start,
            }
        };

        let value = e.landing();
        if low.is_none_or(|(_, v)| value < v) {
            low = Some((seen_at, value));
        }
        if high.is_none_or(|(_, v)| v < value) {
            high = Some((seen_at, value));
        }
    }

    match (low, high) {
        (Some((low_time, low)), Some((high_time, high))) => ExtremePoints {
            low_time,
            low,
            high_time,
            high,
        },
        _ => ExtremePoints::NONE,
    }
}

/// Lowest and highest landing value of the whole history, `(-1, -1)` if
/// there is none.
pub fn lowest_and_highest(csv: &[i32], kind: impl Into<SeriesKind>) -> (i32, i32) {
    let p = lowest_and_highest_with_time(csv, kind);
    (p.low, p.high)
}

pub fn lowest_and_highest_with_time(csv: &[i32], kind: impl Into<SeriesKind>) -> ExtremePoints {
    extreme_points_in_interval(csv, kind, 0, i32::MAX)
}

/// Time-weighted mean of the last `days` days before `now`.
pub fn weighted_mean(csv: &[i32], kind: impl Into<SeriesKind>, now: i32, days: i32) -> i32 {
    let start = now.saturating_sub(days.saturating_mul(MINUTES_PER_DAY));
    weighted_mean_in_interval(csv, kind, now, start, now)
}

/// Time-weighted mean landing value over `[start, end)`, floored.
///
/// The window is clipped to the series start and to `now`; the last record
/// holds until `now`. Unavailable segments carry no weight. Returns
/// `NO_DATA` if the clipped window is empty or has no known value.
pub fn weighted_mean_in_interval(
    csv: &[i32],
    kind: impl Into<SeriesKind>,
    now: i32,
    start: i32,
    end: i32,
) -> i32 {
    let records = Records::new(csv, kind.into());
    let Some(first) = records.first() else {
        return NO_DATA;
    };
    if end <= start || end < first.time {
        return NO_DATA;
    }
    let start = start.max(first.time);
    let end = end.min(now);
    if end <= start {
        tracing::trace!(start, end, now, "weighted mean window ends before it starts");
        return NO_DATA;
    }

    let mut weighted: i64 = 0;
    let mut minutes: i64 = 0;
    for (i, e) in records.iter() {
        if end <= e.time {
            break;
        }
        if e.price < 0 {
            continue;
        }
        let value = e.landing() as i64;
        let next = records.next_time(i);

        let from = if start <= e.time {
            e.time
        } else {
            match next {
                // In effect for the whole window.
                None => return value as i32,
                Some(next) if end <= next => return value as i32,
                Some(next) if next < start => continue,
                Some(_) => start,
            }
        };
        let to = next.unwrap_or(now).min(end);
        let span = to as i64 - from as i64;
        weighted += value * span;
        minutes += span;
    }

    if minutes == 0 {
        return NO_DATA;
    }
    (weighted / minutes) as i32
}

/// Whether the product went out of stock inside `(start, end)`, i.e. an
/// unavailable segment starts strictly within it.
///
/// `None` if the series has fewer than two records or the window is empty.
pub fn out_of_stock_in_interval(
    csv: &[i32],
    kind: impl Into<SeriesKind>,
    start: i32,
    end: i32,
) -> Option<bool> {
    let records = Records::new(csv, kind.into());
    if records.len() < 2 || end <= start {
        return None;
    }
    let out_of_stock = records
        .iter()
        .map(|(_, e)| e)
        .skip_while(|e| e.time <= start)
        .take_while(|e| e.time < end)
        .any(|e| e.is_unavailable());
    Some(out_of_stock)
}

/// Share of `[start, end)` during which the product was out of stock, as a
/// percentage from 0 to 100.
///
/// Only defined for price series. The window is clipped to the series start,
/// to `tracking_since` and to `now`. Returns `NO_DATA` for other kinds, when
/// the window lies before the history or after `now`, or when it is empty.
pub fn out_of_stock_percentage_in_interval(
    csv: &[i32],
    kind: impl Into<SeriesKind>,
    now: i32,
    start: i32,
    end: i32,
    tracking_since: i32,
) -> i32 {
    let kind = kind.into();
    if !kind.is_price {
        return NO_DATA;
    }
    let records = Records::new(csv, kind);
    let Some(first) = records.first() else {
        return NO_DATA;
    };
    if end <= start || end < first.time || end < tracking_since {
        return NO_DATA;
    }
    let start = start.max(first.time).max(tracking_since);
    let end = end.min(now);
    if end <= start {
        tracing::trace!(start, end, now, tracking_since, "out of stock window is empty");
        return NO_DATA;
    }

    let mut in_stock: i64 = 0;
    for (i, e) in records.iter() {
        if end <= e.time {
            break;
        }
        if e.is_unavailable() {
            continue;
        }
        let next = records.next_time(i);

        let from = if start <= e.time {
            e.time
        } else {
            match next {
                None => return 0,
                Some(next) if end <= next => return 0,
                Some(next) if next < start => continue,
                Some(_) => start,
            }
        };
        let to = next.map_or(end, |n| n.min(end));
        in_stock += to as i64 - from as i64;
    }

    let window = end as i64 - start as i64;
    // Unordered timestamps can count the same minutes twice.
    let in_stock = in_stock.clamp(0, window);
    if in_stock == 0 {
        return 100;
    }
    // Floor the in-stock share, so any out-of-stock time rounds up.
    (100 - in_stock * 100 / window) as i32
}
