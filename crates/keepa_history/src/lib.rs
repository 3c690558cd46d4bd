//! Queries over Keepa history series.
//!
//! A series is a flat `[time, value, time, value, ...]` array, or
//! `[time, value, shipping, ...]` for kinds with shipping, describing a step
//! function in Keepa minutes. `-1` marks an unavailable value in a series
//! and is also what queries return when they have no answer.

mod entries;
mod interval;
mod lookup;

pub use entries::{HistoryEntry, entries, validate};
pub use interval::{
    ExtremePoints, extreme_points_in_interval, lowest_and_highest, lowest_and_highest_with_time,
    out_of_stock_in_interval, out_of_stock_percentage_in_interval, weighted_mean,
    weighted_mean_in_interval,
};
pub use keepa_history_core::{
    CsvType, KeepaError, NO_DATA, Result, SeriesKind, UNAVAILABLE, time,
};
pub use lookup::{
    PriceAndShipping, closest_value_at_time, delta_last, last, last_price_and_shipping,
    last_time, price_and_shipping_at_time, value_at_time,
};
