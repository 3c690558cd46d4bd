use keepa_history_core::{KeepaError, Result, SeriesKind, UNAVAILABLE};
use serde::{Deserialize, Serialize};

/// One decoded record of a history series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Keepa minutes at which `price` starts to hold.
    pub time: i32,
    pub price: i32,
    /// `None` for series without a shipping component.
    pub shipping: Option<i32>,
}

impl HistoryEntry {
    fn from_record(record: &[i32]) -> Self {
        HistoryEntry {
            time: record[0],
            price: record[1],
            shipping: record.get(2).copied(),
        }
    }

    /// Price plus non-negative shipping. A negative price is returned as is.
    pub fn landing(&self) -> i32 {
        if self.price < 0 {
            return self.price;
        }
        self.price.saturating_add(self.shipping.unwrap_or(0).max(0))
    }

    pub fn is_unavailable(&self) -> bool {
        self.price == UNAVAILABLE
    }
}

/// Iterate the complete records of `csv`. A trailing partial record is
/// skipped.
pub fn entries(
    csv: &[i32],
    kind: impl Into<SeriesKind>,
) -> impl DoubleEndedIterator<Item = HistoryEntry> + ExactSizeIterator + '_ {
    csv.chunks_exact(kind.into().stride())
        .map(HistoryEntry::from_record)
}

/// Check that `csv` is made of whole records with strictly increasing
/// timestamps. The analyzer does not require this; it is for callers that
/// want to reject a malformed payload up front.
pub fn validate(csv: &[i32], kind: impl Into<SeriesKind>) -> Result<()> {
    let kind = kind.into();
    let stride = kind.stride();
    if csv.len() % stride != 0 {
        tracing::debug!(len = csv.len(), stride, "history series has a partial record");
        return Err(KeepaError::partial_record(csv.len(), stride));
    }

    let mut previous: Option<i32> = None;
    for (record, entry) in entries(csv, kind).enumerate() {
        if let Some(prev) = previous {
            if entry.time <= prev {
                tracing::debug!(record, prev, time = entry.time, "non-increasing history timestamp");
                return Err(KeepaError::NonIncreasingTime {
                    record,
                    previous: prev,
                    time: entry.time,
                });
            }
        }
        previous = Some(entry.time);
    }
    Ok(())
}

/// Indexed view over the records of a series.
#[derive(Clone, Copy)]
pub(crate) struct Records<'a> {
    csv: &'a [i32],
    stride: usize,
}

impl<'a> Records<'a> {
    pub(crate) fn new(csv: &'a [i32], kind: SeriesKind) -> Self {
        Records {
            csv,
            stride: kind.stride(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.csv.len() / self.stride
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn get(&self, i: usize) -> HistoryEntry {
        let at = i * self.stride;
        HistoryEntry::from_record(&self.csv[at..at + self.stride])
    }

    pub(crate) fn first(&self) -> Option<HistoryEntry> {
        (!self.is_empty()).then(|| self.get(0))
    }

    pub(crate) fn last(&self) -> Option<HistoryEntry> {
        self.len().checked_sub(1).map(|i| self.get(i))
    }

    /// Start time of the record after `i`, if any.
    pub(crate) fn next_time(&self, i: usize) -> Option<i32> {
        (i + 1 < self.len()).then(|| self.get(i + 1).time)
    }

    /// Number of records with `time <= t`, i.e. one past the record in
    /// effect at `t`. Timestamps are increasing, so this is a binary search.
    /// Written out by hand because records are `stride` elements wide and
    /// the stride is only known at runtime, so `slice::partition_point`
    /// does not apply to the flat array.
    pub(crate) fn partition_point(&self, t: i32) -> usize {
        let (mut lo, mut hi) = (0, self.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.get(mid).time <= t {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, HistoryEntry)> + use<'a> {
        let stride = self.stride;
        self.csv
            .chunks_exact(stride)
            .map(HistoryEntry::from_record)
            .enumerate()
    }
}
