mod error;
mod kind;
pub mod time;

pub use error::{KeepaError, Result};
pub use kind::{CsvType, SeriesKind};

/// Query result meaning "no data to answer this query".
pub const NO_DATA: i32 = -1;
/// Series value meaning "unknown / unavailable" (e.g. out of stock) for the
/// segment it starts. Same wire constant as [`NO_DATA`].
pub const UNAVAILABLE: i32 = -1;
