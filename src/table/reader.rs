use crate::table::row_table::{RowTable, TableError};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Input file {} does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse CSV input: {0}")]
    Parse(#[from] TableError),
}

/// Source of a row table
pub trait TableReader {
    fn read_table(&mut self) -> Result<RowTable, ReadError>;
}

/// Reads a CSV file from disk
#[derive(Debug, Clone)]
pub struct FileReader {
    path: PathBuf,
}

impl FileReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableReader for FileReader {
    fn read_table(&mut self) -> Result<RowTable, ReadError> {
        if !self.path.is_file() {
            return Err(ReadError::InputNotFound(self.path.clone()));
        }

        let file = File::open(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ReadError::InputNotFound(self.path.clone()),
            _ => ReadError::Open {
                path: self.path.clone(),
                source,
            },
        })?;

        debug!(path = %self.path.display(), "reading CSV file");
        Ok(RowTable::from_reader(BufReader::new(file))?)
    }
}

/// Reads CSV from any byte stream, stdin by default
pub struct StreamReader<R> {
    source: R,
}

impl StreamReader<io::Stdin> {
    pub fn stdin() -> Self {
        Self { source: io::stdin() }
    }
}

impl<R: Read> StreamReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }
}

impl<R: Read> TableReader for StreamReader<R> {
    fn read_table(&mut self) -> Result<RowTable, ReadError> {
        debug!("reading CSV from stream");
        Ok(RowTable::from_reader(&mut self.source)?)
    }
}
