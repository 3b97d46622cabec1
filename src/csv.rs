// src/csv.rs
use std::mem::take;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::consts::SOURCE_NAME;
use crate::data::{Dataset, Metadata};
use crate::specs::{people::PersonRecord, RawRow};

/* ---------------- Line tokenizer ---------------- */

/// Split one CSV line into fields (quotes + doubled-quote escapes).
///
/// Never fails: an unterminated quote just runs to end of line and the
/// accumulated text is still emitted. The last field is always pushed, so a
/// trailing comma yields a trailing empty field.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = s!();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && matches!(chars.peek(), Some('"')) {
                    chars.next(); // double-quote escape
                    field.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(take(&mut field)),
            _ => field.push(ch),
        }
    }

    fields.push(field);
    fields
}

/* ---------------- Document → Dataset ---------------- */

/// Parse a whole sheet export, stamping metadata with the current time.
pub fn parse_document(text: &str) -> Dataset {
    parse_document_at(text, Utc::now())
}

/// Parse a whole sheet export.
///
/// - blank lines (after trim) are skipped, including the trailing one
/// - first remaining line is the header row; header names are trimmed
/// - each data row is zipped positionally against the headers: missing
///   trailing cells read as `""`, extra cells are ignored
/// - rows whose mapped `id` is empty are dropped
///
/// No data at all gives `Dataset::empty()` (no metadata).
pub fn parse_document_at(text: &str, now: DateTime<Utc>) -> Dataset {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Dataset::empty();
    };
    let headers: Vec<String> = parse_line(header_line)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut people = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        let cells = parse_line(line);
        let row = RawRow::zip(&headers, &cells);
        let person = PersonRecord::from_row(&row);
        if person.id.is_empty() {
            dropped += 1;
            continue;
        }
        people.push(person);
    }

    debug!(kept = people.len(), dropped, columns = headers.len(), "sheet parsed");

    let metadata = Metadata::fresh(now, SOURCE_NAME, people.len());
    Dataset { people, metadata: Some(metadata) }
}
