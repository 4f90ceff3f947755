//! Storage accessors for the two services.
//! - One trait per table, so handlers can run against the database or an in-memory mock.
//! - Every failure propagates immediately; nothing here retries.

pub mod errors;
pub mod counter;
pub mod records;
#[cfg(test)]
pub mod test_support;
