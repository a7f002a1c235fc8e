// src/tagging/postgres.rs

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde_json::Value;
use tokio_postgres::Row as PgRow;

use crate::db::{self, PgPool};
use crate::models::{FootprintMetadata, RawMatchRow, RawTagResults, TagOptions, TableSpec};

use super::TaggingService;

/// Spatial tagging service backed by PostGIS reference tables.
///
/// Geometry work (intersection tests, area ratios) runs inside the database;
/// this client only selects the mapped columns plus the coverage percentage
/// and reshapes rows.
#[derive(Clone)]
pub struct PgTaggingService {
    pool: PgPool,
}

impl PgTaggingService {
    pub fn new(pool: PgPool) -> Self {
        PgTaggingService { pool }
    }

    /// Builds a service from environment-configured connection settings and
    /// probes for the PostGIS extension the intersection queries rely on.
    pub async fn from_env() -> Result<Self> {
        let pool = db::connect().await?;
        let conn = pool
            .get()
            .await
            .context("Failed to get DB connection for PostGIS probe")?;
        if !db::check_postgis(&*conn).await? {
            warn!("PostGIS extension not installed; tagging queries will fail");
        }
        drop(conn);
        Ok(PgTaggingService::new(pool))
    }

    /// Builds the intersection query for one reference table. The footprint
    /// WKT is the single bind parameter; schema, table, and column names come
    /// from trusted compile-time table specs.
    fn build_query(spec: &TableSpec, options: &TagOptions) -> String {
        let mut select: Vec<String> = spec
            .columns
            .iter()
            .map(|(logical, physical)| format!("{} AS {}", physical, logical))
            .collect();
        if options.compute_area {
            select.push(
                "100.0 * ST_Area(ST_Intersection(geom, ST_GeomFromText($1, 4326))) \
                 / ST_Area(ST_GeomFromText($1, 4326)) AS pcover"
                    .to_string(),
            );
        } else {
            select.push("0.0::FLOAT8 AS pcover".to_string());
        }

        format!(
            "SELECT {} FROM {}.{} WHERE ST_Intersects(geom, ST_GeomFromText($1, 4326))",
            select.join(", "),
            options.schema,
            spec.table
        )
    }
}

impl TaggingService for PgTaggingService {
    async fn tag(
        &self,
        footprint: &FootprintMetadata,
        tables: &[TableSpec],
        options: &TagOptions,
    ) -> Result<RawTagResults> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get DB connection for tagging")?;

        let mut results = RawTagResults::default();
        for spec in tables {
            let query = Self::build_query(spec, options);
            let rows = conn
                .query(&query, &[&footprint.footprint])
                .await
                .with_context(|| {
                    format!(
                        "Intersection query failed for table {}.{}",
                        options.schema, spec.table
                    )
                })?;

            let mut matches = Vec::with_capacity(rows.len());
            for row in &rows {
                let mut columns = HashMap::new();
                for &(logical, physical) in spec.columns {
                    match column_value(row, logical) {
                        Some(value) => {
                            columns.insert(logical.to_string(), value);
                        }
                        None => warn!(
                            "Unsupported value in column {}.{}.{} ({}), leaving unset",
                            options.schema, spec.table, physical, logical
                        ),
                    }
                }
                let pcover: f64 = row.get("pcover");
                matches.push(RawMatchRow { columns, pcover });
            }

            debug!(
                "{} intersection(s) in {}.{}",
                matches.len(),
                options.schema,
                spec.table
            );
            results.insert(spec.table, matches);
        }

        Ok(results)
    }
}

/// Reads one column into a loosely-typed value. Reference tables mix text
/// and integer columns; anything else is unsupported.
fn column_value(row: &PgRow, name: &str) -> Option<Value> {
    if let Ok(v) = row.try_get::<_, String>(name) {
        return Some(Value::String(v));
    }
    if let Ok(v) = row.try_get::<_, i64>(name) {
        return Some(Value::from(v));
    }
    if let Ok(v) = row.try_get::<_, i32>(name) {
        return Some(Value::from(v));
    }
    if let Ok(v) = row.try_get::<_, f64>(name) {
        return Some(Value::from(v));
    }
    None
}
