// src/core/mod.rs

pub mod clock;
pub mod net;

pub use clock::{Clock, ManualClock, SystemClock};
pub use net::{Fetch, HttpFetcher};
