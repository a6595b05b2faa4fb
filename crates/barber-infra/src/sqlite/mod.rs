//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod appointment;
pub mod catalog;
pub mod client;
pub mod pool;
pub mod slot;

use std::str::FromStr;

use barber_types::error::RepositoryError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_id<T>(s: &str, what: &str) -> Result<T, RepositoryError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    s.parse::<T>()
        .map_err(|e| RepositoryError::Query(format!("invalid {what} id: {e}")))
}

fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    barber_types::time::parse_date(s).map_err(RepositoryError::Query)
}

fn parse_time(s: &str) -> Result<NaiveTime, RepositoryError> {
    barber_types::time::parse_time(s).map_err(RepositoryError::Query)
}

fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, RepositoryError> {
    barber_types::time::parse_date_time(s).map_err(RepositoryError::Query)
}
