// src/tagging/geology.rs

use indexmap::IndexMap;
use log::warn;

use crate::models::{DatasetReference, RawMatchRow, TableSpec, TagRecord};
use crate::utils::capitalize_first;

/// Reference table and column mapping for Mars geologic units.
pub(super) const TABLE_SPEC: TableSpec = TableSpec {
    table: "geologic_unit",
    columns: &[("symbol", "unitsymbol"), ("name", "unitname")],
};

/// Provenance of the geologic-unit reference table.
pub(super) const REFERENCES: &[DatasetReference] = &[DatasetReference {
    dataset: "Mars 15M Geologic Map GIS Renovation",
    publisher: "USGS Astrogeology Science Center",
    author: "James A. Skinner, Jr.",
    originator: "Trent Hare, Ken Tanaka",
    description: "A digital adaptation of the hard-copy Viking Orbiter-based geologic maps of Mars. The western equatorial region was originally mapped by David H. Scott and K. L. Tanaka (USGS I-1802-A, 1986, 1:15M scale). The eastern equatorial region was originally mapped by Ronald Greeley and J. E. Guest (USGS I-1802-B, 1987, 1:15M scale). The north and south polar regions were originally mapped by K. L. Tanaka and D. H. Scott (USGS I-1802-C, 1987, 1:15M scale).",
    modified: "3 June 2019",
    license: "Free of charge",
    url: "https://astrogeology.usgs.gov/search/map/Mars/Geology/Mars15MGeologicGISRenovation",
}];

/// Groups raw geologic-unit rows by unit symbol, one record per distinct
/// symbol with coverage summed across disjoint polygons of the same unit.
/// Output order is the first-seen order of each symbol.
pub(super) fn format(rows: &[RawMatchRow], separator: &str) -> Vec<TagRecord> {
    let mut units: IndexMap<String, TagRecord> = IndexMap::new();

    for row in rows {
        let Some(symbol) = row.text_column("symbol") else {
            warn!(
                "geologic_unit row without a usable 'symbol' column, skipping: {:?}",
                row.columns
            );
            continue;
        };

        units
            .entry(symbol.to_string())
            .and_modify(|record| record.pcover += row.pcover)
            .or_insert_with(|| TagRecord {
                id: format!("geologicunit{}{}", separator, symbol.to_lowercase()),
                name: capitalize_first(row.text_column("name").unwrap_or_default()),
                pcover: row.pcover,
            });
    }

    units.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn unit_row(symbol: &str, name: &str, pcover: f64) -> RawMatchRow {
        let mut columns = HashMap::new();
        columns.insert("symbol".to_string(), json!(symbol));
        columns.insert("name".to_string(), json!(name));
        RawMatchRow { columns, pcover }
    }

    #[test]
    fn test_repeated_symbols_are_summed() {
        let rows = vec![
            unit_row("Nple", "noachian plains", 12.5),
            unit_row("Nple", "noachian plains", 7.5),
            unit_row("Hr", "ridged plains", 30.0),
        ];

        let records = format(&rows, ":");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "geologicunit:nple");
        assert_eq!(records[0].name, "Noachian plains");
        assert_eq!(records[0].pcover, 20.0);
        assert_eq!(records[1].id, "geologicunit:hr");
        assert_eq!(records[1].name, "Ridged plains");
        assert_eq!(records[1].pcover, 30.0);
    }

    #[test]
    fn test_sums_are_order_independent() {
        let forward = vec![
            unit_row("Nple", "noachian plains", 12.5),
            unit_row("Hr", "ridged plains", 30.0),
            unit_row("Nple", "noachian plains", 7.5),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let forward_records = format(&forward, ":");
        let reversed_records = format(&reversed, ":");

        // Output order follows first-seen order, so it flips; the summed
        // values per symbol must not.
        for record in &forward_records {
            let twin = reversed_records
                .iter()
                .find(|r| r.id == record.id)
                .unwrap();
            assert_eq!(twin.pcover, record.pcover);
        }
        assert_eq!(forward_records[0].id, "geologicunit:nple");
        assert_eq!(reversed_records[0].id, "geologicunit:nple");
    }

    #[test]
    fn test_already_distinct_input_passes_through() {
        let rows = vec![
            unit_row("Apk", "knobby plains", 5.25),
            unit_row("Hr", "ridged plains", 30.0),
        ];

        let records = format(&rows, ":");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pcover, 5.25);
        assert_eq!(records[1].pcover, 30.0);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(format(&[], ":").is_empty());
    }

    #[test]
    fn test_identifier_is_deterministic() {
        let rows = vec![unit_row("HNu", "undivided material", 1.0)];
        let first = format(&rows, ":");
        let second = format(&rows, ":");
        assert_eq!(first[0].id, "geologicunit:hnu");
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn test_row_without_symbol_is_skipped() {
        let mut columns = HashMap::new();
        columns.insert("name".to_string(), json!("orphan unit"));
        let rows = vec![
            RawMatchRow {
                columns,
                pcover: 3.0,
            },
            unit_row("Hr", "ridged plains", 30.0),
        ];

        let records = format(&rows, ":");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "geologicunit:hr");
    }
}
