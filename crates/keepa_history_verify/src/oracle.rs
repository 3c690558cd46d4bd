//! Brute-force answers computed by expanding a series minute by minute.

use keepa_history::{ExtremePoints, NO_DATA, SeriesKind, UNAVAILABLE};

pub struct Expanded {
    kind: SeriesKind,
    /// (time, landing value), in order.
    steps: Vec<(i32, i32)>,
}

impl Expanded {
    pub fn new(csv: &[i32], kind: SeriesKind) -> Self {
        let stride = kind.stride();
        let steps = csv
            .chunks_exact(stride)
            .map(|r| {
                let value = match r {
                    [_, v, s] if *v >= 0 => v.saturating_add((*s).max(0)),
                    [_, v, ..] => *v,
                    _ => unreachable!("chunks_exact yields full records"),
                };
                (r[0], value)
            })
            .collect();
        Expanded { kind, steps }
    }

    fn first(&self) -> Option<i32> {
        self.steps.first().map(|s| s.0)
    }

    fn last(&self) -> Option<(i32, i32)> {
        self.steps.last().copied()
    }

    pub fn value_at(&self, t: i32) -> i32 {
        let mut value = NO_DATA;
        for &(time, v) in &self.steps {
            if time > t {
                break;
            }
            value = v;
        }
        value
    }

    fn starts_at(&self, t: i32) -> bool {
        self.steps.iter().any(|s| s.0 == t)
    }

    pub fn closest_value_at(&self, t: i32) -> i32 {
        let (Some(first), Some((last_time, last_value))) = (self.first(), self.last()) else {
            return NO_DATA;
        };
        (t.max(first)..=last_time.max(t))
            .map(|m| self.value_at(m))
            .find(|&v| v != UNAVAILABLE)
            .unwrap_or(last_value)
    }

    pub fn extremes(&self, start: i32, end: i32) -> ExtremePoints {
        let (Some(first), Some((last_time, _))) = (self.first(), self.last()) else {
            return ExtremePoints::NONE;
        };
        if end <= start || end < first {
            return ExtremePoints::NONE;
        }
        let s = start.max(first);

        let mut seen: Vec<(i32, i32)> = Vec::new();
        // A segment ending exactly at the window start is still reported at
        // the start.
        if s > first && self.starts_at(s) {
            seen.push((s, self.value_at(s - 1)));
        }
        for m in s..end.min(s.max(last_time) + 1) {
            seen.push((m, self.value_at(m)));
        }

        let mut low: Option<(i32, i32)> = None;
        let mut high: Option<(i32, i32)> = None;
        for (m, v) in seen.into_iter().filter(|&(_, v)| v != UNAVAILABLE) {
            if low.is_none_or(|(_, lv)| v < lv) {
                low = Some((m, v));
            }
            if high.is_none_or(|(_, hv)| hv < v) {
                high = Some((m, v));
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

    pub fn weighted_mean(&self, now: i32, start: i32, end: i32) -> i32 {
        let Some(first) = self.first() else {
            return NO_DATA;
        };
        if end <= start {
            return NO_DATA;
        }
        let known: Vec<i64> = (start.max(first)..end.min(now))
            .map(|m| self.value_at(m))
            .filter(|&v| v >= 0)
            .map(i64::from)
            .collect();
        if known.is_empty() {
            return NO_DATA;
        }
        (known.iter().sum::<i64>() / known.len() as i64) as i32
    }

    pub fn out_of_stock_percentage(
        &self,
        now: i32,
        start: i32,
        end: i32,
        tracking_since: i32,
    ) -> i32 {
        if !self.kind.is_price {
            return NO_DATA;
        }
        let Some(first) = self.first() else {
            return NO_DATA;
        };
        if end <= start || end < first || end < tracking_since {
            return NO_DATA;
        }
        let s = start.max(first).max(tracking_since);
        let e = end.min(now);
        if e <= s {
            return NO_DATA;
        }
        let in_stock = (s..e)
            .filter(|&m| self.value_at(m) != UNAVAILABLE)
            .count() as i64;
        if in_stock == 0 {
            return 100;
        }
        (100 - in_stock * 100 / (e - s) as i64) as i32
    }
}
