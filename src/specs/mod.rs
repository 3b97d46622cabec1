//! # Column “specs” module
//!
//! The sheet is authored by people, so its column headers are free text and
//! drift over time. This module pins them down: every column we read is
//! listed once in a static [`FieldSpec`] table, together with the record
//! field it lands in and how its raw text is coerced.
//!
//! ## What lives here
//! - **`RawRow`**: header → raw cell text for one data row (borrowed, short-lived).
//! - **`FieldSpec` / `FieldKind`**: the declarative column table entries.
//! - **`coerce`**: the three total coercions (string, integer, list).
//! - **`people`**: the person schema itself, generated from one table so the
//!   struct, the spec list and the mapping routine cannot drift apart.
//!
//! ## What does **not** live here
//! - Line splitting and header detection (`csv`).
//! - Caching and fetching (`store`, `service`, `core::net`).
//!
//! ## Conventions & invariants
//! - Header names match by **exact trimmed text**.
//! - A missing column is not an error: it reads as `""` and the field takes its
//!   empty/absent form.
//! - Coercions never fail. Integer fields are `Option<i64>` and are `None` on
//!   bad input, never `0`.
use std::collections::HashMap;

pub mod coerce;
pub mod people;

/// How a column's raw text is turned into a field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed text; `""` when absent.
    Str,
    /// Base-10 integer; `None` when empty or unparseable.
    Int,
    /// Delimiter-separated values, trimmed, empties dropped.
    List(char),
}

/// One column of the sheet and where it goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Header text as it appears in the sheet.
    pub source_header: &'static str,
    /// Key of the field in the record (and in its serialized form).
    pub target_key: &'static str,
    pub kind: FieldKind,
}

/// Header → raw value for one data row.
#[derive(Clone, Debug, Default)]
pub struct RawRow<'a> {
    cells: HashMap<&'a str, &'a str>,
}

impl<'a> RawRow<'a> {
    /// Pair headers with cells by position. Missing trailing cells read as `""`,
    /// cells past the last header are ignored. A repeated header keeps the
    /// rightmost value.
    pub fn zip(headers: &'a [String], cells: &'a [String]) -> Self {
        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), cells.get(i).map(String::as_str).unwrap_or("")))
            .collect();
        Self { cells }
    }

    /// Raw cell under `header`, or `""` if the sheet has no such column.
    pub fn get(&self, header: &str) -> &'a str {
        self.cells.get(header).copied().unwrap_or("")
    }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RawRow<'a> {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(xs: &[&str]) -> Vec<String> { xs.iter().map(|s| s.to_string()).collect() }

    #[test]
    fn zip_pads_and_truncates() {
        let headers = v(&["A", "B", "C"]);
        let cells = v(&["1"]);
        let row = RawRow::zip(&headers, &cells);
        assert_eq!(row.get("A"), "1");
        assert_eq!(row.get("C"), "");
        assert_eq!(row.len(), 3);

        let cells = v(&["1", "2", "3", "4"]);
        let row = RawRow::zip(&headers, &cells);
        assert_eq!(row.get("C"), "3");
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn unknown_header_reads_empty() {
        let row: RawRow = [("A", "x")].into_iter().collect();
        assert_eq!(row.get("Nope"), "");
    }

    #[test]
    fn repeated_header_keeps_rightmost() {
        let headers = v(&["Notes", "Notes"]);
        let cells = v(&["first", "second"]);
        assert_eq!(RawRow::zip(&headers, &cells).get("Notes"), "second");
    }
}
