// src/service.rs
//
// Cache-first retrieval of the sheet.
//
//   get_data ─▶ fresh cache entry? ──yes──▶ return it
//                    │ no (or forced)
//                    ▼
//               fetch ──ok──▶ parse ─▶ write cache ─▶ return
//                    │ err
//                    ▼
//               any cache entry (stale ok)? ──yes──▶ return it
//                    │ no
//                    ▼
//               empty dataset with metadata.error
//
// Construct one service at startup and share it by reference (or `Arc`).
// The cache sits behind a mutex that is held for the whole call, so
// concurrent callers are serialized: one fetch and one writer at a time.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::core::net::{Fetch, HttpFetcher};
use crate::csv::parse_document_at;
use crate::data::Dataset;
use crate::error::{Error, FetchError};
use crate::store::{CacheStore, FileSlots, Slots};

pub struct DataService<F: Fetch, S: Slots> {
    fetcher: F,
    url: String,
    cache: Mutex<CacheStore<S>>,
}

impl DataService<HttpFetcher, FileSlots> {
    /// HTTP fetcher + on-disk cache, both configured from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let fetcher = HttpFetcher::new()?;
        let cache = CacheStore::on_disk(&settings.store_dir).with_ttl_ms(settings.cache_duration_ms);
        Ok(Self::new(fetcher, &settings.sheet_url, cache))
    }
}

impl<F: Fetch, S: Slots> DataService<F, S> {
    pub fn new(fetcher: F, url: impl Into<String>, cache: CacheStore<S>) -> Self {
        Self { fetcher, url: url.into(), cache: Mutex::new(cache) }
    }

    /// Always returns a well-formed dataset; failures show up only as a stale
    /// result (logged) or as `metadata.error` on an empty one.
    pub fn get_data(&self, force_refresh: bool) -> Dataset {
        let mut cache = self.lock();

        if !force_refresh {
            match cache.try_read(true) {
                Ok(Some(ds)) => {
                    debug!(records = ds.len(), "serving cached sheet");
                    return ds;
                }
                Ok(None) => debug!("no fresh cache entry"),
                Err(e) => warn!(error = %e, "cache unreadable; treating as miss"),
            }
        }

        match self.fetcher.fetch_text(&self.url) {
            Ok(text) => {
                let ds = parse_document_at(&text, cache.clock().now());
                if let Err(e) = cache.try_write(&ds) {
                    warn!(error = %e, "could not cache sheet; returning it anyway");
                }
                info!(records = ds.len(), "sheet loaded");
                ds
            }
            Err(e) => Self::fallback(&cache, e),
        }
    }

    /// Drop the cached entry; the next `get_data` fetches.
    pub fn clear_cache(&self) {
        self.lock().clear();
        info!("cache cleared");
    }

    /// Run `f` against the cache under the service lock.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut CacheStore<S>) -> R) -> R {
        f(&mut self.lock())
    }

    fn fallback(cache: &CacheStore<S>, err: FetchError) -> Dataset {
        match cache.try_read(false) {
            Ok(Some(ds)) => {
                warn!(error = %err, records = ds.len(), "fetch failed; serving stale cache");
                ds
            }
            Ok(None) => {
                error!(error = %err, "fetch failed and nothing cached");
                Dataset::failed(cache.clock().now(), join!("Failed to load data: ", &err.to_string()))
            }
            Err(cache_err) => {
                error!(error = %err, cache_error = %cache_err, "fetch failed and cache unreadable");
                Dataset::failed(cache.clock().now(), join!("Failed to load data: ", &err.to_string()))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheStore<S>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
