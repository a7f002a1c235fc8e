// src/tagging/healpix.rs

use log::warn;

use crate::models::{RawMatchRow, TableSpec, TagRecord};

/// Reference table and column mapping for HEALPix cells.
pub(super) const TABLE_SPEC: TableSpec = TableSpec {
    table: "healpix",
    columns: &[("level", "level"), ("pix", "pix")],
};

/// One record per cell, in input order. Cells are already distinct per row,
/// so there is no grouping.
///
/// The identifier keeps the historical fixed "00" prefix before the level
/// digits. It does not vary with the level's digit count, so it is not a
/// real zero-padding scheme, but existing consumers match on the exact
/// string.
pub(super) fn format(rows: &[RawMatchRow], separator: &str) -> Vec<TagRecord> {
    let mut cells = Vec::with_capacity(rows.len());

    for row in rows {
        let (Some(level), Some(pix)) = (row.int_column("level"), row.int_column("pix")) else {
            warn!(
                "healpix row without usable 'level'/'pix' columns, skipping: {:?}",
                row.columns
            );
            continue;
        };

        cells.push(TagRecord {
            id: format!("healpix{}00{}{}", separator, level, pix),
            name: format!("Healpix order {}, pixel {}", level, pix),
            pcover: row.pcover,
        });
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn cell_row(level: i64, pix: i64, pcover: f64) -> RawMatchRow {
        let mut columns = HashMap::new();
        columns.insert("level".to_string(), json!(level));
        columns.insert("pix".to_string(), json!(pix));
        RawMatchRow { columns, pcover }
    }

    #[test]
    fn test_single_cell() {
        let records = format(&[cell_row(3, 42, 100.0)], ":");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "healpix:00342");
        assert_eq!(records[0].name, "Healpix order 3, pixel 42");
        assert_eq!(records[0].pcover, 100.0);
    }

    #[test]
    fn test_prefix_does_not_vary_with_level_digits() {
        let records = format(&[cell_row(10, 7, 1.0)], ":");
        assert_eq!(records[0].id, "healpix:00107");
    }

    #[test]
    fn test_rows_are_not_grouped() {
        let rows = vec![cell_row(3, 42, 60.0), cell_row(3, 42, 40.0)];
        let records = format(&rows, ":");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pcover, 60.0);
        assert_eq!(records[1].pcover, 40.0);
    }

    #[test]
    fn test_input_order_is_preserved() {
        let rows = vec![
            cell_row(2, 9, 10.0),
            cell_row(2, 4, 20.0),
            cell_row(2, 11, 30.0),
        ];
        let records = format(&rows, ":");

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["healpix:0029", "healpix:0024", "healpix:00211"]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(format(&[], ":").is_empty());
    }

    #[test]
    fn test_row_without_cell_columns_is_skipped() {
        let rows = vec![
            RawMatchRow {
                columns: HashMap::new(),
                pcover: 5.0,
            },
            cell_row(1, 2, 50.0),
        ];
        let records = format(&rows, ":");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "healpix:0012");
    }
}
