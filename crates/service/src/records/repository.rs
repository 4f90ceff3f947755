use async_trait::async_trait;

use crate::errors::StoreError;

/// One stored (name, age) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub age: i32,
}

impl Record {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self { name: name.into(), age }
    }
}

/// Storage abstraction for the record multiset.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// One record chosen uniformly at random; `NotFound` when there are none.
    async fn read_random(&self) -> Result<Record, StoreError>;
    async fn insert(&self, name: &str, age: i32) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory record store for tests and doc examples
pub mod mock {
    use super::*;
    use rand::seq::SliceRandom;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Default)]
    pub struct MockRecordStore {
        records: Mutex<Vec<Record>>,
        fail: AtomicBool,
    }

    impl MockRecordStore {
        pub fn with_records(records: Vec<Record>) -> Self {
            Self { records: Mutex::new(records), ..Self::default() }
        }

        pub fn records(&self) -> Vec<Record> { self.rows().clone() }

        /// Make every subsequent call fail with a query error.
        pub fn fail(&self, on: bool) { self.fail.store(on, Ordering::SeqCst); }

        fn rows(&self) -> MutexGuard<'_, Vec<Record>> {
            self.records.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::Query("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RecordStore for MockRecordStore {
        async fn read_random(&self) -> Result<Record, StoreError> {
            self.check()?;
            let picked = self.rows().choose(&mut rand::thread_rng()).cloned();
            picked.ok_or(StoreError::NotFound("record"))
        }

        async fn insert(&self, name: &str, age: i32) -> Result<(), StoreError> {
            self.check()?;
            self.rows().push(Record::new(name, age));
            Ok(())
        }

        async fn clear(&self) -> Result<(), StoreError> {
            self.check()?;
            self.rows().clear();
            Ok(())
        }
    }

}
