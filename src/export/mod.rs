//! Data export for Finanzgarten
//!
//! - JSON: full snapshot, importable (the default)
//! - YAML: full snapshot, human-readable, importable
//! - CSV: transaction register for spreadsheets
//!
//! JSON import also reads documents exported by the browser app.

pub mod csv;
pub mod json;
mod legacy;
pub mod yaml;

pub use csv::export_transactions_csv;
pub use json::{
    default_export_file_name, export_json, import_from_json, DataExport, EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_yaml, import_from_yaml};
