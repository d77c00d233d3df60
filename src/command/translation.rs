use crate::table::{ReadError, RowTable, TableError, TableReader, TableWriter, WriteError};
use crate::translate::{TranslateError, Translator};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("Column '{0}' does not exist in the input")]
    ColumnNotFound(String),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("Failed to add translated column: {0}")]
    Table(#[from] TableError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// What to translate and how to label it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSettings {
    /// Source column whose text is translated
    pub column: String,
    /// Label appended to the source column name: `<column> (<suffix>)`
    pub column_suffix: String,
    /// Keep only this many leading rows
    pub max_rows: Option<NonZeroUsize>,
}

impl TranslationSettings {
    pub fn translated_column_name(&self) -> String {
        translated_column_name(&self.column, &self.column_suffix)
    }
}

/// Name of the column inserted next to `column`
pub fn translated_column_name(column: &str, suffix: &str) -> String {
    format!("{column} ({suffix})")
}

/// Drop every row past `max_rows`
pub fn truncate_rows(table: &mut RowTable, max_rows: Option<NonZeroUsize>) {
    if let Some(max_rows) = max_rows {
        if table.len() > max_rows.get() {
            debug!(from = table.len(), to = max_rows.get(), "truncating rows");
            table.truncate(max_rows.get());
        }
    }
}

/// Source column values, failing with `ColumnNotFound` if it is absent
pub fn source_texts(table: &RowTable, column: &str) -> Result<Vec<String>, CommandError> {
    table
        .column_values(column)
        .map_err(|_| CommandError::ColumnNotFound(column.to_string()))
}

/// Insert the translated column right after its source column
pub fn merge_translation(
    table: &mut RowTable,
    settings: &TranslationSettings,
    translated: Vec<String>,
) -> Result<(), CommandError> {
    if !table.has_column(&settings.column) {
        return Err(CommandError::ColumnNotFound(settings.column.clone()));
    }
    table.insert_column_after(&settings.column, settings.translated_column_name(), translated)?;
    Ok(())
}

/// Read, translate one column, write.
///
/// Every failure before the write step aborts without touching the output.
pub struct TranslationCommand {
    reader: Box<dyn TableReader>,
    writer: Box<dyn TableWriter>,
    translator: Box<dyn Translator>,
    settings: TranslationSettings,
}

impl TranslationCommand {
    pub fn new(
        reader: Box<dyn TableReader>,
        writer: Box<dyn TableWriter>,
        translator: Box<dyn Translator>,
        settings: TranslationSettings,
    ) -> Self {
        Self {
            reader,
            writer,
            translator,
            settings,
        }
    }

    pub fn settings(&self) -> &TranslationSettings {
        &self.settings
    }

    /// Run the pipeline; returns the written file path, if any
    pub async fn execute(&mut self) -> Result<Option<PathBuf>, CommandError> {
        let mut table = self.reader.read_table()?;
        debug!(rows = table.len(), columns = table.headers().len(), "read input");

        truncate_rows(&mut table, self.settings.max_rows);

        let texts = source_texts(&table, &self.settings.column)?;
        let target_column = self.settings.translated_column_name();
        if table.has_column(&target_column) {
            return Err(TableError::DuplicateColumn(target_column).into());
        }

        info!(column = %self.settings.column, rows = texts.len(), "translating column");
        let translated = self.translator.translate(&texts).await?;
        if translated.len() != texts.len() {
            return Err(TranslateError::InvalidResponse(format!(
                "expected {} translations, got {}",
                texts.len(),
                translated.len()
            ))
            .into());
        }

        merge_translation(&mut table, &self.settings, translated)?;

        let written = self.writer.write_table(&table)?;
        Ok(written)
    }
}
