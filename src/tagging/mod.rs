// src/tagging/mod.rs

mod geology;
mod healpix;
mod postgres;

pub use postgres::PgTaggingService;

use anyhow::Result;
use log::debug;
use std::collections::HashMap;

use crate::config::TaggerConfig;
use crate::models::{
    DatasetReference, FootprintMetadata, RawMatchRow, RawTagResults, TagOptions, TagRecord,
    TableSpec, TaggedResult,
};

/// External spatial tagging service.
///
/// Implementations intersect a footprint with the requested reference tables
/// and return one row per intersected geometry, coverage-annotated when
/// `compute_area` is set. Failures propagate to the caller unchanged; the
/// formatting layer performs no recovery or wrapping.
#[allow(async_fn_in_trait)]
pub trait TaggingService {
    async fn tag(
        &self,
        footprint: &FootprintMetadata,
        tables: &[TableSpec],
        options: &TagOptions,
    ) -> Result<RawTagResults>;
}

/// Formatter variant, selected by configuration.
///
/// Each variant knows its reference table, its output category key, and how
/// to shape that table's raw rows into clean tag records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawResultFormatter {
    /// Mars geologic units, grouped by unit symbol with coverage summed
    Geology,
    /// HEALPix cells, one record per row
    Healpix,
}

impl RawResultFormatter {
    /// Reference table and column mapping consumed by this variant.
    pub fn table_spec(&self) -> TableSpec {
        match self {
            RawResultFormatter::Geology => geology::TABLE_SPEC,
            RawResultFormatter::Healpix => healpix::TABLE_SPEC,
        }
    }

    /// Category key the formatted records are returned under.
    pub fn category_key(&self) -> &'static str {
        match self {
            RawResultFormatter::Geology => "geologic_units",
            RawResultFormatter::Healpix => "healpix",
        }
    }

    /// Provenance of the reference dataset backing this variant.
    pub fn references(&self) -> &'static [DatasetReference] {
        match self {
            RawResultFormatter::Geology => geology::REFERENCES,
            RawResultFormatter::Healpix => &[],
        }
    }

    /// Shape raw rows into clean tag records.
    pub fn format(&self, rows: &[RawMatchRow], separator: &str) -> Vec<TagRecord> {
        match self {
            RawResultFormatter::Geology => geology::format(rows, separator),
            RawResultFormatter::Healpix => healpix::format(rows, separator),
        }
    }
}

/// Tags footprints by delegating the spatial work to an injected service and
/// formatting its raw rows.
///
/// Stateless across calls; each invocation is independent.
#[derive(Debug, Clone)]
pub struct Tagger<S> {
    service: S,
    formatter: RawResultFormatter,
    config: TaggerConfig,
}

impl<S: TaggingService> Tagger<S> {
    pub fn new(service: S, formatter: RawResultFormatter, config: TaggerConfig) -> Self {
        Tagger {
            service,
            formatter,
            config,
        }
    }

    /// Geologic-unit tagger for the configured schema.
    pub fn geology(service: S, config: TaggerConfig) -> Self {
        Tagger::new(service, RawResultFormatter::Geology, config)
    }

    /// HEALPix cell tagger for the configured schema.
    pub fn healpix(service: S, config: TaggerConfig) -> Self {
        Tagger::new(service, RawResultFormatter::Healpix, config)
    }

    /// Tag a footprint and return the formatted records under this variant's
    /// category key. A reference table with no intersections yields an empty
    /// record list, never an error.
    pub async fn tag(&self, footprint: &FootprintMetadata) -> Result<TaggedResult> {
        let options = TagOptions {
            schema: self.config.schema.clone(),
            compute_area: true,
        };
        let tables = [self.formatter.table_spec()];
        let raw = self.service.tag(footprint, &tables, &options).await?;

        let rows = raw.rows_for(tables[0].table);
        debug!(
            "{} raw intersection(s) in table '{}'",
            rows.len(),
            tables[0].table
        );
        let records = self.formatter.format(rows, &self.config.tag_separator);

        let mut categories = HashMap::new();
        categories.insert(self.formatter.category_key().to_string(), records);
        Ok(TaggedResult(categories))
    }

    /// Provenance of the reference dataset backing this tagger.
    pub fn references(&self) -> &'static [DatasetReference] {
        self.formatter.references()
    }
}
