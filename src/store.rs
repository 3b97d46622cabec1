// src/store.rs
//
// Last-known-good dataset cache.
//
// Layout is two string slots: the serialized dataset and its write time as a
// millisecond epoch in decimal. One entry only; a write replaces both slots.
//
// `try_*` methods report what went wrong; `read`/`write`/`clear` log and
// degrade (a failed read is a miss, a failed write is dropped).

use std::{collections::HashMap, fs, io, path::PathBuf, sync::Arc};

use tracing::{debug, warn};

use crate::config::consts::{CACHE_DATA_KEY, CACHE_DURATION_MS, CACHE_TIME_KEY};
use crate::core::clock::{Clock, SystemClock};
use crate::data::Dataset;
use crate::error::CacheError;

/* ---------------- Slot backends ---------------- */

/// Minimal string key-value storage.
pub trait Slots {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// One file per key under a directory (default `.store/`).
#[derive(Clone, Debug)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    fn path(&self, key: &str) -> PathBuf { self.dir.join(key) }
}

impl Slots for FileSlots {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(self.path(key), value)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-process slots. With a capacity, writes that would exceed it fail the
/// way a full browser storage quota does.
#[derive(Clone, Debug, Default)]
pub struct MemorySlots {
    map: HashMap<String, String>,
    capacity: Option<usize>,
}

impl MemorySlots {
    pub fn new() -> Self { Self::default() }
    pub fn with_capacity_bytes(capacity: usize) -> Self {
        Self { map: HashMap::new(), capacity: Some(capacity) }
    }

    fn used_without(&self, key: &str) -> usize {
        self.map.iter().filter(|(k, _)| k.as_str() != key).map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Slots for MemorySlots {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        if let Some(cap) = self.capacity {
            if self.used_without(key) + key.len() + value.len() > cap {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "storage quota exceeded"));
            }
        }
        self.map.insert(s!(key), s!(value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.map.remove(key);
        Ok(())
    }
}

/* ---------------- Cache ---------------- */

pub struct CacheStore<S: Slots> {
    slots: S,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
}

impl CacheStore<FileSlots> {
    /// File-backed cache under `dir` with the default TTL and system clock.
    pub fn on_disk(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileSlots::new(dir))
    }
}

impl<S: Slots> CacheStore<S> {
    pub fn new(slots: S) -> Self {
        Self { slots, ttl_ms: CACHE_DURATION_MS, clock: Arc::new(SystemClock) }
    }

    pub fn with_ttl_ms(mut self, ttl_ms: i64) -> Self { self.ttl_ms = ttl_ms; self }
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self { self.clock = clock; self }

    pub fn ttl_ms(&self) -> i64 { self.ttl_ms }
    pub fn clock(&self) -> &Arc<dyn Clock> { &self.clock }
    pub fn slots(&self) -> &S { &self.slots }
    pub fn slots_mut(&mut self) -> &mut S { &mut self.slots }

    /// Write time of the stored entry, if there is one and it is readable.
    pub fn written_at(&self) -> Result<Option<i64>, CacheError> {
        let Some(raw) = self.slots.get(CACHE_TIME_KEY)? else { return Ok(None) };
        raw.trim().parse::<i64>().map(Some).map_err(|_| CacheError::BadTimestamp(raw))
    }

    /// Stored dataset. With `respect_ttl`, an entry older than the TTL counts as absent.
    pub fn try_read(&self, respect_ttl: bool) -> Result<Option<Dataset>, CacheError> {
        let Some(payload) = self.slots.get(CACHE_DATA_KEY)? else { return Ok(None) };

        if respect_ttl {
            let Some(written_at) = self.written_at()? else { return Ok(None) };
            let age = self
                .clock
                .now_ms()
                .checked_sub(written_at)
                .ok_or_else(|| CacheError::BadTimestamp(written_at.to_string()))?;
            if age > self.ttl_ms {
                debug!(age_ms = age, ttl_ms = self.ttl_ms, "cache entry expired");
                return Ok(None);
            }
        }

        Ok(Some(serde_json::from_str(&payload)?))
    }

    /// Replace the entry with `dataset`, stamped now.
    pub fn try_write(&mut self, dataset: &Dataset) -> Result<(), CacheError> {
        let payload = serde_json::to_string(dataset)?;
        self.slots.set(CACHE_DATA_KEY, &payload)?;
        self.slots.set(CACHE_TIME_KEY, &self.clock.now_ms().to_string())?;
        Ok(())
    }

    pub fn try_clear(&mut self) -> Result<(), CacheError> {
        self.slots.remove(CACHE_DATA_KEY)?;
        self.slots.remove(CACHE_TIME_KEY)?;
        Ok(())
    }

    /// Like `try_read`, but any failure is logged and reads as a miss.
    pub fn read(&self, respect_ttl: bool) -> Option<Dataset> {
        self.try_read(respect_ttl).unwrap_or_else(|e| {
            warn!(error = %e, "cache read failed; treating as miss");
            None
        })
    }

    /// Like `try_write`, but failures are only logged.
    pub fn write(&mut self, dataset: &Dataset) {
        if let Err(e) = self.try_write(dataset) {
            warn!(error = %e, "cache write failed; continuing without cache");
        }
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            warn!(error = %e, "cache clear failed");
        }
    }
}
