//! Record storage: append-only (name, age) pairs in the `query` table.

pub mod repository;
pub mod repo;

pub use repo::seaorm::SeaOrmRecordStore;
pub use repository::{Record, RecordStore};
