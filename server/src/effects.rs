//! Clock and identity sources used when a record is created.
//!
//! Production code uses [`SystemClock`] and [`UuidIds`]. Tests swap in
//! [`FixedClock`] and [`SequentialIds`] to make created records predictable.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDateTime};
use uuid::Uuid;

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Server local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Random v4 UUIDs in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Yields `{prefix}-1`, `{prefix}-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
