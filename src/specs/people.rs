// src/specs/people.rs
//
// Person schema: one line per sheet column. The macro expands the table into
// the `PersonRecord` struct, the `FIELDS` spec list and the single mapping
// routine, so adding a column is a one-line change.

use serde::{Deserialize, Serialize};

use super::{coerce, FieldKind, FieldSpec, RawRow};
use crate::config::consts::LIST_DELIM;

macro_rules! person_schema {
    (@ty Str) => { String };
    (@ty Int) => { Option<i64> };
    (@ty List) => { Vec<String> };

    (@kind Str) => { FieldKind::Str };
    (@kind Int) => { FieldKind::Int };
    (@kind List) => { FieldKind::List(LIST_DELIM) };

    (@coerce Str, $raw:expr) => { coerce::text($raw) };
    (@coerce Int, $raw:expr) => { coerce::integer($raw) };
    (@coerce List, $raw:expr) => { coerce::list($raw, LIST_DELIM) };

    ( $( $(#[$doc:meta])* $field:ident : $kind:ident = $header:literal => $key:literal ),* $(,)? ) => {
        /// One person, mapped from one sheet row.
        ///
        /// Serialized with the camelCase keys listed in [`FIELDS`]; the cached
        /// payload round-trips through this shape unchanged.
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct PersonRecord {
            $(
                $(#[$doc])*
                #[serde(rename = $key)]
                pub $field: person_schema!(@ty $kind),
            )*
            /// Display name: `full_name`, else `"first last"` trimmed.
            pub name: String,
        }

        /// Every column read from the sheet, in sheet-author order.
        pub const FIELDS: &[FieldSpec] = &[
            $(
                FieldSpec {
                    source_header: $header,
                    target_key: $key,
                    kind: person_schema!(@kind $kind),
                },
            )*
        ];

        impl PersonRecord {
            /// Map one raw row. Missing columns and bad values degrade to the
            /// field's empty form; this never fails.
            pub fn from_row(row: &RawRow<'_>) -> Self {
                let mut person = Self {
                    $( $field: person_schema!(@coerce $kind, row.get($header)), )*
                    name: s!(),
                };
                person.name = display_name(&person.full_name, &person.first_name, &person.last_name);
                person
            }
        }
    };
}

person_schema! {
    /* ---------- identity ---------- */
    /// Sheet-unique key. Rows without one are dropped.
    id: Str = "Person ID" => "id",
    full_name: Str = "Full Name" => "fullName",
    first_name: Str = "First Name" => "firstName",
    middle_name: Str = "Middle Name" => "middleName",
    last_name: Str = "Last Name" => "lastName",
    maiden_name: Str = "Maiden Name" => "maidenName",
    nickname: Str = "Nickname" => "nickname",
    gender: Str = "Gender" => "gender",
    generation: Int = "Generation" => "generation",

    /* ---------- birth ---------- */
    birth_date: Str = "Birth Date" => "birthDate",
    birth_year: Int = "Birth Year" => "birthYear",
    birth_place: Str = "Birth Place" => "birthPlace",
    birth_country: Str = "Birth Country" => "birthCountry",

    /* ---------- death ---------- */
    death_date: Str = "Death Date" => "deathDate",
    death_year: Int = "Death Year" => "deathYear",
    death_place: Str = "Death Place" => "deathPlace",
    cause_of_death: Str = "Cause of Death" => "causeOfDeath",
    burial_place: Str = "Burial Place" => "burialPlace",

    /* ---------- career ---------- */
    occupation: Str = "Occupation" => "occupation",
    employer: Str = "Employer" => "employer",
    career_notes: Str = "Career Notes" => "careerNotes",

    /* ---------- family (ids of other rows) ---------- */
    father_id: Str = "Father ID" => "fatherId",
    mother_id: Str = "Mother ID" => "motherId",
    spouse_ids: List = "Spouse IDs" => "spouseIds",
    children_ids: List = "Children IDs" => "childrenIds",
    sibling_ids: List = "Sibling IDs" => "siblingIds",
    marriage_date: Str = "Marriage Date" => "marriageDate",
    marriage_year: Int = "Marriage Year" => "marriageYear",
    marriage_place: Str = "Marriage Place" => "marriagePlace",

    /* ---------- lineage ---------- */
    lineage: Str = "Lineage" => "lineage",
    branch: Str = "Family Branch" => "branch",
    clan: Str = "Clan" => "clan",
    ethnicity: Str = "Ethnicity" => "ethnicity",
    religion: Str = "Religion" => "religion",

    /* ---------- military ---------- */
    military_service: Str = "Military Service" => "militaryService",
    military_branch: Str = "Military Branch" => "militaryBranch",
    military_rank: Str = "Military Rank" => "militaryRank",
    service_start_year: Int = "Service Start Year" => "serviceStartYear",
    service_end_year: Int = "Service End Year" => "serviceEndYear",

    /* ---------- education ---------- */
    education: Str = "Education" => "education",
    schools: List = "Schools" => "schools",

    /* ---------- residence ---------- */
    residences: List = "Residences" => "residences",
    current_residence: Str = "Current Residence" => "currentResidence",

    /* ---------- misc ---------- */
    notes: Str = "Notes" => "notes",
    sources: List = "Sources" => "sources",
    photo_url: Str = "Photo URL" => "photoUrl",
    links: List = "Links" => "links",
}

fn display_name(full: &str, first: &str, last: &str) -> String {
    if !full.is_empty() {
        return s!(full);
    }
    join!(first, " ", last).trim().to_string()
}

/// Spec entry for a record key, if the key is mapped from the sheet.
pub fn field(target_key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.target_key == target_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn row<'a>(pairs: &[(&'a str, &'a str)]) -> RawRow<'a> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn table_has_unique_headers_and_keys() {
        let headers: HashSet<_> = FIELDS.iter().map(|f| f.source_header).collect();
        let keys: HashSet<_> = FIELDS.iter().map(|f| f.target_key).collect();
        assert_eq!(headers.len(), FIELDS.len());
        assert_eq!(keys.len(), FIELDS.len());
        assert!(FIELDS.len() >= 45);
    }

    #[test]
    fn field_lookup_by_key() {
        assert_eq!(field("birthYear").map(|f| f.kind), Some(FieldKind::Int));
        assert_eq!(field("spouseIds").map(|f| f.kind), Some(FieldKind::List(';')));
        assert_eq!(field("name"), None);
    }

    #[test]
    fn maps_each_kind() {
        let r = row(&[
            ("Person ID", " P1 "),
            ("First Name", "Ada"),
            ("Last Name", "Lovelace"),
            ("Birth Year", "1815"),
            ("Death Year", "unknown"),
            ("Children IDs", "P2; P3;P4"),
            ("Spouse IDs", ""),
        ]);
        let p = PersonRecord::from_row(&r);
        assert_eq!(p.id, "P1");
        assert_eq!(p.birth_year, Some(1815));
        assert_eq!(p.death_year, None);
        assert_eq!(p.children_ids, vec!["P2", "P3", "P4"]);
        assert!(p.spouse_ids.is_empty());
        assert_eq!(p.marriage_year, None);
        assert_eq!(p.occupation, "");
    }

    #[test]
    fn name_prefers_full_name() {
        let p = PersonRecord::from_row(&row(&[
            ("Full Name", " Augusta Ada King "),
            ("First Name", "Ada"),
            ("Last Name", "Lovelace"),
        ]));
        assert_eq!(p.name, "Augusta Ada King");
    }

    #[test]
    fn name_falls_back_to_first_last() {
        let p = PersonRecord::from_row(&row(&[("First Name", "Ada"), ("Last Name", "Lovelace")]));
        assert_eq!(p.name, "Ada Lovelace");

        let p = PersonRecord::from_row(&row(&[("Last Name", "Lovelace")]));
        assert_eq!(p.name, "Lovelace");

        let p = PersonRecord::from_row(&row(&[]));
        assert_eq!(p.name, "");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let p = PersonRecord::from_row(&row(&[("Person ID", "P1"), ("Birth Year", "1900")]));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], "P1");
        assert_eq!(json["birthYear"], 1900);
        assert!(json["deathYear"].is_null());
        assert_eq!(json["childrenIds"], serde_json::json!([]));
    }
}
