// src/core/clock.rs
//
// Wall-clock seam. The cache compares millisecond epochs; tests drive a
// ManualClock to step across the TTL boundary.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;

    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.now_ms()).single().unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 { Utc::now().timestamp_millis() }
    fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self { Self { ms: AtomicI64::new(start_ms) } }
    pub fn set(&self, ms: i64) { self.ms.store(ms, Ordering::SeqCst); }
    pub fn advance(&self, delta_ms: i64) { self.ms.fetch_add(delta_ms, Ordering::SeqCst); }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 { self.ms.load(Ordering::SeqCst) }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_ms(&self) -> i64 { (**self).now_ms() }
    fn now(&self) -> DateTime<Utc> { (**self).now() }
}
