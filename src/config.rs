// src/config.rs

/// Framework-wide token separating a tag category from its value
pub const DEFAULT_TAG_SEPARATOR: &str = ":";

/// Reference-data schema holding the Mars tables
pub const MARS_SCHEMA: &str = "mars";

/// Per-tagger configuration.
///
/// The separator must match the value used throughout the rest of the
/// tagging framework; generated identifiers are consumed as opaque strings
/// downstream.
#[derive(Debug, Clone)]
pub struct TaggerConfig {
    /// Schema selector naming the planetary body's reference tables
    pub schema: String,

    /// Separator token used when building tag identifiers
    pub tag_separator: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        TaggerConfig {
            schema: MARS_SCHEMA.to_string(),
            tag_separator: DEFAULT_TAG_SEPARATOR.to_string(),
        }
    }
}

impl TaggerConfig {
    /// Configuration for another planetary body's schema, keeping the
    /// framework separator.
    pub fn for_schema(schema: &str) -> Self {
        TaggerConfig {
            schema: schema.to_string(),
            ..Default::default()
        }
    }
}
