//! # Clinident Core
//!
//! Reusable engines and utilities shared by the stores and the CLI:
//! - In-memory filtering and ordering of loaded collections ([`filter`])
//! - CSV/JSON export with per-entity projections ([`export`])
//! - API environment/endpoint configuration ([`config`])
//! - Client-side validation of create/update inputs ([`validation`])
//! - Display formatting for amounts, counts and dates ([`format`])
//!
//! **No I/O concerns**: remote calls live in `clinident-client`, state
//! ownership in `clinident-store`. Everything here is synchronous and, aside
//! from the export delivery seam, pure.

pub mod config;
pub mod export;
pub mod filter;
pub mod format;
pub mod validation;

pub use config::{ApiConfig, ConfigError, Endpoint, Environment};
pub use export::{
    DirectorySink, DownloadSink, ExportError, ExportFormat, ExportResult, Exporter, MemorySink,
};
pub use filter::{FieldFilter, FilterSet, FilterSnapshot, MatchMode, SortDirection};
pub use validation::ValidationErrors;
