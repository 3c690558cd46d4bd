use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeepaError {
    #[error("unknown csv type index: {0}")]
    UnknownCsvIndex(usize),
    #[error("invalid keepa minutes {input:?}: {source}")]
    InvalidMinutes {
        input: String,
        source: ParseIntError,
    },
    #[error("timestamp out of range: {0}")]
    Timestamp(#[from] jiff::Error),
    #[error("series of length {len} ends with a partial record (stride {stride})")]
    PartialRecord { len: usize, stride: usize },
    #[error("timestamp {time} at record {record} does not follow {previous}")]
    NonIncreasingTime {
        record: usize,
        previous: i32,
        time: i32,
    },
}

impl KeepaError {
    pub fn invalid_minutes(input: impl Into<String>, source: ParseIntError) -> Self {
        KeepaError::InvalidMinutes {
            input: input.into(),
            source,
        }
    }

    pub fn partial_record(len: usize, stride: usize) -> Self {
        KeepaError::PartialRecord { len, stride }
    }
}

pub type Result<T> = std::result::Result<T, KeepaError>;
