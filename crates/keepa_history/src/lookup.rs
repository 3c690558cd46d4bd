//! Point lookups: the value of a series at its end or at a given time.

use keepa_history_core::{NO_DATA, SeriesKind};
use serde::{Deserialize, Serialize};

use crate::entries::{HistoryEntry, Records};

const SHIPPING: SeriesKind = SeriesKind {
    index: 0,
    is_price: true,
    is_deal_relevant: false,
    is_with_shipping: true,
    is_extra_data: false,
};

/// Raw price and shipping of a shipping-augmented series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceAndShipping {
    pub price: i32,
    pub shipping: i32,
}

impl PriceAndShipping {
    pub const NONE: PriceAndShipping = PriceAndShipping {
        price: NO_DATA,
        shipping: NO_DATA,
    };

    fn from_entry(e: HistoryEntry) -> Self {
        PriceAndShipping {
            price: e.price,
            shipping: e.shipping.unwrap_or(NO_DATA),
        }
    }
}

impl From<PriceAndShipping> for [i32; 2] {
    fn from(p: PriceAndShipping) -> Self {
        [p.price, p.shipping]
    }
}

/// Time of the last recorded change, or `NO_DATA` for an empty series.
/// This is not the last update time of the product.
pub fn last_time(csv: &[i32], kind: impl Into<SeriesKind>) -> i32 {
    Records::new(csv, kind.into())
        .last()
        .map_or(NO_DATA, |e| e.time)
}

/// Landing value of the last record, or `NO_DATA` for an empty series.
pub fn last(csv: &[i32], kind: impl Into<SeriesKind>) -> i32 {
    Records::new(csv, kind.into())
        .last()
        .map_or(NO_DATA, |e| e.landing())
}

/// Landing value change between the last two records.
///
/// Returns 0, not `NO_DATA`, when there are fewer than two records or either
/// of them is unavailable: a missing delta reads as "no change".
pub fn delta_last(csv: &[i32], kind: impl Into<SeriesKind>) -> i32 {
    let records = Records::new(csv, kind.into());
    if records.len() < 2 {
        return 0;
    }
    let current = records.get(records.len() - 1);
    let previous = records.get(records.len() - 2);
    if current.is_unavailable() || previous.is_unavailable() {
        return 0;
    }
    current.landing() - previous.landing()
}

/// Landing value in effect at `time`.
///
/// `NO_DATA` if the series is empty or starts after `time`. Past the last
/// record its value is held. The result is `UNAVAILABLE` if the product was
/// out of stock at `time`.
pub fn value_at_time(csv: &[i32], kind: impl Into<SeriesKind>, time: i32) -> i32 {
    let records = Records::new(csv, kind.into());
    match records.partition_point(time) {
        0 => NO_DATA,
        pos => records.get(pos - 1).landing(),
    }
}

/// Like [`value_at_time`], but an unavailable value is replaced by the next
/// known value after it. The search only moves forward in time; if nothing
/// later is known the last record's value is returned. A `time` before the
/// first record starts the search at the first record.
pub fn closest_value_at_time(csv: &[i32], kind: impl Into<SeriesKind>, time: i32) -> i32 {
    let records = Records::new(csv, kind.into());
    let Some(last) = records.last() else {
        return NO_DATA;
    };
    let from = records.partition_point(time).saturating_sub(1);
    (from..records.len())
        .map(|i| records.get(i))
        .find(|e| !e.is_unavailable())
        .unwrap_or(last)
        .landing()
}

/// Raw `(price, shipping)` in effect at `time` in a shipping-augmented
/// series, or [`PriceAndShipping::NONE`].
pub fn price_and_shipping_at_time(csv: &[i32], time: i32) -> PriceAndShipping {
    let records = Records::new(csv, SHIPPING);
    match records.partition_point(time) {
        0 => PriceAndShipping::NONE,
        pos => PriceAndShipping::from_entry(records.get(pos - 1)),
    }
}

/// Raw `(price, shipping)` of the last full record of a shipping-augmented
/// series, or [`PriceAndShipping::NONE`].
pub fn last_price_and_shipping(csv: &[i32]) -> PriceAndShipping {
    Records::new(csv, SHIPPING)
        .last()
        .map_or(PriceAndShipping::NONE, PriceAndShipping::from_entry)
}
