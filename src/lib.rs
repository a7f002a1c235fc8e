// src/lib.rs
pub mod config;
pub mod db;
pub mod models;
pub mod tagging;
pub mod utils;

// Re-export common types for easier access
pub use config::TaggerConfig;
pub use models::{
    FootprintMetadata, RawMatchRow, RawTagResults, TagOptions, TagRecord, TaggedResult,
};
pub use tagging::{PgTaggingService, RawResultFormatter, Tagger, TaggingService};

// Re-export important functionality
pub use db::PgPool;
