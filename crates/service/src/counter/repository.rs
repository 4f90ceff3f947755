use async_trait::async_trait;

use crate::errors::StoreError;

/// Storage abstraction for the counter row.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Value of the counter row; `NotFound` when the table is empty.
    async fn read_value(&self) -> Result<i32, StoreError>;
    /// Create the counter row. Fails if it already exists.
    async fn insert_value(&self, value: i32) -> Result<(), StoreError>;
    /// Overwrite the counter row; `NotFound` when there is none.
    async fn set_value(&self, value: i32) -> Result<(), StoreError>;
    /// Add one in a single statement, creating the row at 1 when absent. Returns the new value.
    async fn increment(&self) -> Result<i32, StoreError>;
    /// Delete every row. Succeeds on an empty table.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory counter for tests and local runs without Postgres.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Default)]
    pub struct MockCounterStore {
        value: Mutex<Option<i32>>,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl MockCounterStore {
        pub fn with_value(value: i32) -> Self {
            Self { value: Mutex::new(Some(value)), ..Self::default() }
        }

        /// Current row, bypassing failure injection.
        pub fn value(&self) -> Option<i32> { *self.slot() }

        pub fn fail_reads(&self, on: bool) { self.fail_reads.store(on, Ordering::SeqCst); }

        pub fn fail_writes(&self, on: bool) { self.fail_writes.store(on, Ordering::SeqCst); }

        fn slot(&self) -> MutexGuard<'_, Option<i32>> {
            self.value.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn check_write(&self) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Query("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CounterStore for MockCounterStore {
        async fn read_value(&self) -> Result<i32, StoreError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StoreError::Query("connection refused".into()));
            }
            let value = *self.slot();
            value.ok_or(StoreError::NotFound("counter"))
        }

        async fn insert_value(&self, value: i32) -> Result<(), StoreError> {
            self.check_write()?;
            let mut slot = self.slot();
            if slot.is_some() {
                return Err(StoreError::Query(
                    "duplicate key value violates unique constraint \"counter_pkey\"".into(),
                ));
            }
            *slot = Some(value);
            Ok(())
        }

        async fn set_value(&self, value: i32) -> Result<(), StoreError> {
            self.check_write()?;
            match self.slot().as_mut() {
                Some(current) => {
                    *current = value;
                    Ok(())
                }
                None => Err(StoreError::NotFound("counter")),
            }
        }

        async fn increment(&self) -> Result<i32, StoreError> {
            self.check_write()?;
            let mut slot = self.slot();
            let next = match *slot {
                Some(v) => v
                    .checked_add(1)
                    .ok_or_else(|| StoreError::Query("integer out of range".into()))?,
                None => 1,
            };
            *slot = Some(next);
            Ok(next)
        }

        async fn clear(&self) -> Result<(), StoreError> {
            self.check_write()?;
            *self.slot() = None;
            Ok(())
        }
    }

}
