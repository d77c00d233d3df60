use csv::{ReaderBuilder, StringRecord, Writer};
use std::io::{Read, Write};
use thiserror::Error;

/// Errors that can occur while building or reshaping a row table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV input has no header row")]
    MissingHeader,

    #[error("Row {row} has {found} fields but the header has {expected}")]
    RowTooWide {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Column '{0}' does not exist")]
    UnknownColumn(String),

    #[error("Column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("Expected {expected} values for the new column, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// In-memory CSV table: a header row plus string cells.
///
/// Every row has exactly as many cells as there are headers. Short rows are
/// padded with empty strings when the table is built, so a missing value and
/// an empty value look the same to the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RowTable {
    /// Build a table from headers and rows, padding short rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| pad_row(row, width, index + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    /// Parse CSV with a mandatory header row
    pub fn from_reader<R: Read>(source: R) -> Result<Self, TableError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(TableError::MissingHeader);
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record: StringRecord = record?;
            let row = record.iter().map(str::to_string).collect();
            rows.push(pad_row(row, headers.len(), index + 1)?);
        }

        Ok(Self { headers, rows })
    }

    /// Serialize the table as CSV, header first
    pub fn to_writer<W: Write>(&self, sink: W) -> Result<(), TableError> {
        let mut writer = Writer::from_writer(sink);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Values of one column, in row order
    pub fn column_values(&self, name: &str) -> Result<Vec<String>, TableError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;

        Ok(self.rows.iter().map(|row| row[index].clone()).collect())
    }

    /// Keep only the first `max_rows` rows
    pub fn truncate(&mut self, max_rows: usize) {
        self.rows.truncate(max_rows);
    }

    /// Insert a new column immediately to the right of `source`.
    ///
    /// Returns the index of the inserted column.
    pub fn insert_column_after(
        &mut self,
        source: &str,
        name: impl Into<String>,
        values: Vec<String>,
    ) -> Result<usize, TableError> {
        let name = name.into();
        let source_index = self
            .column_index(source)
            .ok_or_else(|| TableError::UnknownColumn(source.to_string()))?;

        if self.has_column(&name) {
            return Err(TableError::DuplicateColumn(name));
        }

        if values.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        let insert_at = source_index + 1;
        self.headers.insert(insert_at, name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(insert_at, value);
        }

        Ok(insert_at)
    }
}

fn pad_row(mut row: Vec<String>, width: usize, row_number: usize) -> Result<Vec<String>, TableError> {
    if row.len() > width {
        return Err(TableError::RowTooWide {
            row: row_number,
            expected: width,
            found: row.len(),
        });
    }
    row.resize(width, String::new());
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RowTable {
        RowTable::from_reader("id,title,abstract\n1,A,First\n2,B,Second\n3,C,Third\n".as_bytes())
            .unwrap()
    }

    #[test]
    fn test_from_reader_parses_headers_and_rows() {
        let table = sample();
        assert_eq!(table.headers(), &["id", "title", "abstract"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1], vec!["2", "B", "Second"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = RowTable::from_reader("a,b,c\n1\n2,x\n".as_bytes()).unwrap();
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
        assert_eq!(table.rows()[1], vec!["2", "x", ""]);
    }

    #[test]
    fn test_wide_rows_are_rejected() {
        let result = RowTable::from_reader("a,b\n1,2,3\n".as_bytes());
        assert!(matches!(
            result,
            Err(TableError::RowTooWide { row: 1, expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let result = RowTable::from_reader("".as_bytes());
        assert!(matches!(result, Err(TableError::MissingHeader)));
    }

    #[test]
    fn test_quoted_fields_with_newlines() {
        let table = RowTable::from_reader("id,abstract\n1,\"line one\nline two\"\n".as_bytes()).unwrap();
        assert_eq!(table.column_values("abstract").unwrap(), vec!["line one\nline two"]);
    }

    #[test]
    fn test_column_values_unknown_column() {
        let table = sample();
        assert!(matches!(
            table.column_values("missing"),
            Err(TableError::UnknownColumn(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_truncate_keeps_leading_rows() {
        let mut table = sample();
        table.truncate(2);
        assert_eq!(table.column_values("id").unwrap(), vec!["1", "2"]);

        table.truncate(10);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_insert_column_after_source() {
        let mut table = sample();
        let index = table
            .insert_column_after("title", "title (ja)", vec!["a".into(), "b".into(), "c".into()])
            .unwrap();

        assert_eq!(index, 2);
        assert_eq!(table.headers(), &["id", "title", "title (ja)", "abstract"]);
        assert_eq!(table.rows()[2], vec!["3", "C", "c", "Third"]);
    }

    #[test]
    fn test_insert_column_after_last_column() {
        let mut table = sample();
        table
            .insert_column_after("abstract", "abstract (ja)", vec![String::new(); 3])
            .unwrap();
        assert_eq!(table.headers().last().unwrap(), "abstract (ja)");
    }

    #[test]
    fn test_insert_column_length_mismatch() {
        let mut table = sample();
        let result = table.insert_column_after("title", "new", vec!["only one".into()]);
        assert!(matches!(
            result,
            Err(TableError::LengthMismatch { expected: 3, actual: 1 })
        ));
        assert_eq!(table.headers().len(), 3);
    }

    #[test]
    fn test_insert_duplicate_column() {
        let mut table = sample();
        let result = table.insert_column_after("id", "title", vec![String::new(); 3]);
        assert!(matches!(result, Err(TableError::DuplicateColumn(_))));
    }

    #[test]
    fn test_to_writer_quotes_when_needed() {
        let table = RowTable::new(
            vec!["id".into(), "abstract".into()],
            vec![vec!["1".into(), "Hello, world".into()]],
        )
        .unwrap();

        let mut out = Vec::new();
        table.to_writer(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id,abstract\n1,\"Hello, world\"\n");
    }

    #[test]
    fn test_new_pads_and_validates() {
        let table = RowTable::new(vec!["a".into(), "b".into()], vec![vec!["1".into()]]).unwrap();
        assert_eq!(table.rows()[0], vec!["1", ""]);

        let result = RowTable::new(vec!["a".into()], vec![vec!["1".into(), "2".into()]]);
        assert!(result.is_err());
    }
}
