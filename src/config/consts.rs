// src/config/consts.rs

// Net config
pub const SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vQfamilytree/pub?output=csv";
pub const SOURCE_NAME: &str = "Google Sheets";

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CACHE_DATA_KEY: &str = "genealogy_data_cache";
pub const CACHE_TIME_KEY: &str = "genealogy_data_timestamp";
pub const CACHE_DURATION_MS: i64 = 3_600_000; // 1 hour

// Logging
pub const DEBUG_LOG_FILE: &str = "debug.log";

// Config sources
pub const CONFIG_FILE: &str = "family_sheet.toml";
pub const ENV_PREFIX: &str = "FAMILY_SHEET_";

// Parse
pub const LIST_DELIM: char = ';';
