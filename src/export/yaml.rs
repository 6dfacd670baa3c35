//! YAML export for human-readable backups

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::export::json::DataExport;

/// Write the export as YAML with a short comment header
pub fn export_yaml<W: Write>(export: &DataExport, writer: &mut W) -> FinanceResult<()> {
    let header = format!(
        "# Finanzgarten data export\n# Generated: {}\n# Contains your full transaction history.\n\n",
        export.export_date.to_rfc3339()
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export)?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> FinanceResult<DataExport> {
    let export: DataExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FinanceError::Import(e.to_string()))?;

    export.validate().map_err(FinanceError::Import)?;

    Ok(export)
}
