//! Counter storage: a single integer row in the `counter` table.

pub mod repository;
pub mod repo;

pub use repo::seaorm::SeaOrmCounterStore;
pub use repository::CounterStore;
