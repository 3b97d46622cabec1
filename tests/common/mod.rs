// tests/common/mod.rs
//
// Shared fixtures: a scripted fetcher and a service wired to in-memory slots
// and a manual clock.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use family_sheet::core::clock::ManualClock;
use family_sheet::core::net::Fetch;
use family_sheet::error::FetchError;
use family_sheet::store::{CacheStore, MemorySlots};
use family_sheet::DataService;

pub const URL: &str = "https://sheets.test/pub?output=csv";
pub const T0: i64 = 1_700_000_000_000;
pub const MIN: i64 = 60_000;

pub const SHEET: &str = "\
Person ID,Full Name,First Name,Last Name,Birth Year,Death Year,Father ID,Mother ID,Spouse IDs,Children IDs,Notes
P1,,John,Smith,1900,1970,,,P2,P3; P4,\"Farmer, later \"\"mayor\"\"\"
P2,Mary Smith (née Jones),Mary,Jones,1905,abc,,,P1,P3;P4,
P3,,Anne,Smith,1930,,P1,P2,,,
,,Orphan,Row,1940,,,,,,no id
P4,,Tom,Smith,,,P1,P2,,,
";

/// Answers from a queue; an empty queue is a transport failure.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<String, FetchError>>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new() -> Self { Self::default() }

    pub fn ok(self, body: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body.to_string()));
        self
    }

    pub fn status(self, status: u16) -> Self {
        self.responses.lock().unwrap().push_back(Err(FetchError::Status { status, url: URL.to_string() }));
        self
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

impl Fetch for ScriptedFetcher {
    fn fetch_text(&self, _url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("connection refused".into())))
    }
}

pub fn service<F: Fetch>(fetcher: F) -> (DataService<F, MemorySlots>, Arc<ManualClock>) {
    service_with_slots(fetcher, MemorySlots::new())
}

pub fn service_with_slots<F: Fetch>(
    fetcher: F,
    slots: MemorySlots,
) -> (DataService<F, MemorySlots>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0));
    let cache = CacheStore::new(slots).with_clock(clock.clone());
    (DataService::new(fetcher, URL, cache), clock)
}
