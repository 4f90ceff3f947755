pub mod db;
pub mod counter;
pub mod query;
