// src/specs/coerce.rs
//
// Total coercions from raw cell text. None of these can fail.

/// Trimmed text.
pub fn text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Leading base-10 integer, e.g. `"1950"` → 1950, `" -3 "` → -3.
/// Empty or non-numeric input → `None` (never 0). Trailing junk after the
/// digits is ignored, so `"1950s"` → 1950, the way spreadsheet users write years.
pub fn integer(raw: &str) -> Option<i64> {
    let t = raw.trim();
    if t.is_empty() { return None; }

    let digits_start = usize::from(t.starts_with(['+', '-']));
    let digits_len = t[digits_start..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 { return None; }

    t[..digits_start + digits_len].parse().ok()
}

/// Split on `delim`, trim each piece, drop the empty ones. Order is kept.
pub fn list(raw: &str, delim: char) -> Vec<String> {
    if raw.trim().is_empty() { return Vec::new(); }
    raw.split(delim)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
