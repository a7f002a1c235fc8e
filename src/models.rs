// src/models.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

//------------------------------------------------------------------------------
// INPUT TYPES
//------------------------------------------------------------------------------

/// Footprint metadata submitted for tagging.
///
/// The footprint is a WKT geometry in EPSG:4326; it is passed verbatim to
/// the tagging service, which runs the intersection inside the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintMetadata {
    /// WKT geometry of the footprint to tag
    pub footprint: String,
}

impl FootprintMetadata {
    pub fn new(footprint: &str) -> Self {
        FootprintMetadata {
            footprint: footprint.to_string(),
        }
    }
}

/// Options forwarded to the tagging service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagOptions {
    /// Reference-data schema of the planetary body (e.g. "mars")
    pub schema: String,

    /// Request per-match coverage computation
    pub compute_area: bool,
}

/// Logical-to-physical column mapping for one reference table.
///
/// Each entry is (logical name, physical column); the tagging service
/// selects the physical columns and keys the returned values by their
/// logical names.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub table: &'static str,
    pub columns: &'static [(&'static str, &'static str)],
}

//------------------------------------------------------------------------------
// RAW RESULTS (produced by the tagging service)
//------------------------------------------------------------------------------

/// One geometry intersection returned by the tagging service.
///
/// `columns` holds the logical-column values selected through the table's
/// [`TableSpec`]. Values are kept loosely typed; the formatters pull what
/// they need and skip rows that do not decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMatchRow {
    /// Logical column name -> value
    pub columns: HashMap<String, Value>,

    /// Percent (0-100) of the footprint area covered by the matched geometry.
    /// Disjoint geometries of the same reference feature each carry their own
    /// share; aggregation happens in the formatter.
    pub pcover: f64,
}

impl RawMatchRow {
    /// Text value of a logical column, if present and textual.
    pub fn text_column(&self, name: &str) -> Option<&str> {
        self.columns.get(name)?.as_str()
    }

    /// Integer value of a logical column. Accepts numeric values as well as
    /// numeric strings, which some reference tables store.
    pub fn int_column(&self, name: &str) -> Option<i64> {
        let value = self.columns.get(name)?;
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    }
}

/// Raw tagging result: reference table name -> intersected rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTagResults(pub HashMap<String, Vec<RawMatchRow>>);

impl RawTagResults {
    /// Rows for one reference table. A table absent from the result means
    /// zero matches, not an error.
    pub fn rows_for(&self, table: &str) -> &[RawMatchRow] {
        self.0.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, table: &str, rows: Vec<RawMatchRow>) {
        self.0.insert(table.to_string(), rows);
    }
}

//------------------------------------------------------------------------------
// OUTPUT TYPES
//------------------------------------------------------------------------------

/// A single cleaned tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Stable identifier, namespaced by category and the framework separator
    pub id: String,

    /// Human-readable label
    pub name: String,

    /// Aggregated coverage percent for this tag
    pub pcover: f64,
}

/// Final tagging result: category key -> tag records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaggedResult(pub HashMap<String, Vec<TagRecord>>);

impl TaggedResult {
    /// Records under one category key, empty if the category is absent.
    pub fn records(&self, category: &str) -> &[TagRecord] {
        self.0.get(category).map(Vec::as_slice).unwrap_or(&[])
    }
}

//------------------------------------------------------------------------------
// DATASET PROVENANCE
//------------------------------------------------------------------------------

/// Provenance of a reference dataset used for tagging.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReference {
    pub dataset: &'static str,
    pub publisher: &'static str,
    pub author: &'static str,
    pub originator: &'static str,
    pub description: &'static str,
    pub modified: &'static str,
    pub license: &'static str,
    pub url: &'static str,
}
