//! Identifier codec for view records.
//!
//! Ids are UUID v7: the first 48 bits carry the creation time in unix
//! milliseconds, the remainder is random. That makes the id itself the
//! creation timestamp and makes the hyphenated string form sort in
//! creation order, which the view ledger relies on for newest-first
//! listings. Two ids minted in the same millisecond compare arbitrarily
//! on their random suffix.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::errors::{PageSpyError, Result};

/// Mint a fresh time-ordered identifier.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Decode the millisecond timestamp embedded in a v7 identifier.
///
/// Pure decode, no storage access. Fails on malformed ids and on ids of a
/// version that carries no timestamp (e.g. v4).
pub fn timestamp_of(id: &str) -> Result<DateTime<Utc>> {
    let uuid = Uuid::parse_str(id)
        .map_err(|e| PageSpyError::validation(format!("Malformed identifier '{}': {}", id, e)))?;

    let ts = uuid.get_timestamp().ok_or_else(|| {
        PageSpyError::validation(format!("Identifier '{}' carries no timestamp", id))
    })?;

    let (secs, nanos) = ts.to_unix();
    Utc.timestamp_opt(secs as i64, nanos)
        .single()
        .ok_or_else(|| {
            PageSpyError::validation(format!("Identifier '{}' timestamp out of range", id))
        })
}
