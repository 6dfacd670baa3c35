//! Export and import CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::ValueEnum;
use serde_json::json;
use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::export::{
    default_export_file_name, export_json, export_transactions_csv, export_yaml,
    import_from_json, import_from_yaml, DataExport,
};
use crate::storage::Storage;

use super::amount_formatter;

/// Output format for `export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

fn write_export<W: Write>(
    format: ExportFormat,
    export: &DataExport,
    settings: &Settings,
    writer: &mut W,
) -> FinanceResult<()> {
    match format {
        ExportFormat::Json => export_json(export, writer, true)?,
        ExportFormat::Yaml => export_yaml(export, writer)?,
        ExportFormat::Csv => {
            export_transactions_csv(&export.transactions, &settings.salary_classifier(), &mut *writer)?
        }
    }
    writer
        .flush()
        .map_err(|e| FinanceError::Export(e.to_string()))
}

/// Export the ledger; `-` as output writes to stdout
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> FinanceResult<()> {
    let ledger = storage.load_ledger(settings)?;
    let now = Utc::now();
    let export = DataExport::from_ledger(&ledger, now);

    let path = output.unwrap_or_else(|| {
        PathBuf::from(default_export_file_name(now.date_naive(), format.extension()))
    });

    if path == Path::new("-") {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        return write_export(format, &export, settings, &mut handle);
    }

    let file = File::create(&path).map_err(|e| {
        FinanceError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write_export(format, &export, settings, &mut writer)?;

    info!(path = %path.display(), transactions = export.transactions.len(), "exported ledger");
    println!(
        "Exported {} transactions to {}",
        export.transactions.len(),
        path.display()
    );
    Ok(())
}

/// Replace all stored data with a JSON or YAML export
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    path: &Path,
) -> FinanceResult<()> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| FinanceError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let export = if is_yaml {
        import_from_yaml(&contents)?
    } else {
        import_from_json(&contents)?
    };

    let count = export.transactions.len();
    let ledger = export.into_ledger();
    storage.save_ledger(&ledger)?;

    let entry = AuditEntry::create(
        EntityType::Profile,
        "profile",
        Some("import".to_string()),
        &json!({ "source": path.display().to_string(), "transactions": count }),
    );
    if let Err(e) = AuditLogger::new(storage.paths().audit_log()).log(&entry) {
        warn!(error = %e, "failed to audit import");
    }

    info!(path = %path.display(), transactions = count, "imported ledger");
    println!(
        "Imported {} transactions from {} (balance {})",
        count,
        path.display(),
        amount_formatter(settings, &ledger).format(ledger.profile().current_balance)
    );
    Ok(())
}
