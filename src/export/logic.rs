use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::TransactionExport;
use crate::models::transaction::{Transaction, TransactionKind};
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the given history (already in display order) to `file`.
    ///
    /// - `file` must be an absolute path
    /// - `kind` keeps only earned or spent rows
    ///
    /// Returns the number of rows written.
    pub fn export(
        history: &[Transaction],
        format: ExportFormat,
        file: &str,
        kind: Option<TransactionKind>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let rows = rows_for(history, kind);
        if rows.is_empty() {
            warning("No transactions to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}

fn rows_for(history: &[Transaction], kind: Option<TransactionKind>) -> Vec<TransactionExport> {
    history
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .map(TransactionExport::from)
        .collect()
}
