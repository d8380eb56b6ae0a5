use crate::allocation::Allocation;
use crate::tracker::{Tracker, TrackerError};
use crate::validation;
use polars::prelude::PolarsError;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    DataFrame(PolarsError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
    NotFound,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::DataFrame(err) => write!(f, "dataframe conversion error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::NotFound => write!(f, "no tracker stored"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<PolarsError> for PersistenceError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<TrackerError> for PersistenceError {
    fn from(value: TrackerError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub trait TrackerStore {
    fn save_tracker(&self, tracker: &Tracker) -> PersistenceResult<()>;
    fn load_tracker(&self) -> PersistenceResult<Option<Tracker>>;
}

pub fn validate_allocations(allocations: &[Allocation]) -> PersistenceResult<()> {
    validation::validate_allocation_collection(allocations)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub fn validate_tracker(tracker: &Tracker) -> PersistenceResult<()> {
    validation::validate_resource_collection(tracker.resources())
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
    validation::validate_leave_collection(tracker.leaves())
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
    let allocations = tracker.allocations()?;
    validate_allocations(&allocations)
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    load_allocations_from_csv, load_tracker_from_json, save_allocations_to_csv,
    save_tracker_to_json,
};
