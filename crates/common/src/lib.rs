//! Pieces shared by both services: the response envelope and logging setup.

pub mod cors;
pub mod utils;
