// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod specs;

pub mod csv;
pub mod data;
pub mod service;
pub mod store;

pub use data::{build_lookup, Dataset, Lookup, Metadata};
pub use error::{CacheError, Error, FetchError};
pub use service::DataService;
pub use specs::people::PersonRecord;
