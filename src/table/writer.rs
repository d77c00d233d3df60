use crate::table::row_table::{RowTable, TableError};
use std::ffi::{OsStr, OsString};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::iter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Upper bound on `name(N).ext` candidates tried before giving up
pub const MAX_ALTERNATES: u32 = 10_000;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write CSV output: {0}")]
    Serialize(#[from] TableError),

    #[error("No free alternate file name found for {}", .0.display())]
    NoAlternatePath(PathBuf),
}

/// Destination for a row table.
///
/// Returns the path actually written, or `None` when the output has no path
/// worth reporting (a stream).
pub trait TableWriter {
    fn write_table(&mut self, table: &RowTable) -> Result<Option<PathBuf>, WriteError>;
}

/// Writes a CSV file, never clobbering an existing one unless told to
#[derive(Debug, Clone)]
pub struct FileWriter {
    path: PathBuf,
    overwrite: bool,
}

impl FileWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            overwrite: false,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Open the requested path, or the first `name(N).ext` sibling that does
    /// not exist yet. Creation is exclusive so a file appearing between two
    /// runs is never truncated.
    fn create_target(&self) -> Result<(PathBuf, File), WriteError> {
        if self.overwrite {
            let file = File::create(&self.path).map_err(|source| WriteError::Create {
                path: self.path.clone(),
                source,
            })?;
            return Ok((self.path.clone(), file));
        }

        for candidate in candidate_paths(&self.path) {
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => {
                    return Err(WriteError::Create {
                        path: candidate,
                        source,
                    });
                }
            }
        }

        Err(WriteError::NoAlternatePath(self.path.clone()))
    }
}

impl TableWriter for FileWriter {
    fn write_table(&mut self, table: &RowTable) -> Result<Option<PathBuf>, WriteError> {
        let (target, file) = self.create_target()?;
        if target != self.path {
            warn!(
                requested = %self.path.display(),
                actual = %target.display(),
                "output file exists, writing to alternate path"
            );
        }

        table.to_writer(BufWriter::new(file))?;

        debug!(path = %target.display(), rows = table.len(), "wrote CSV file");
        Ok(Some(target))
    }
}

/// Writes CSV to any byte sink, stdout by default
pub struct StreamWriter<W> {
    sink: W,
}

impl StreamWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { sink: io::stdout() }
    }
}

impl<W: Write> StreamWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> TableWriter for StreamWriter<W> {
    fn write_table(&mut self, table: &RowTable) -> Result<Option<PathBuf>, WriteError> {
        table.to_writer(&mut self.sink)?;
        debug!(rows = table.len(), "wrote CSV to stream");
        Ok(None)
    }
}

/// `path` itself, then `name(1).ext`, `name(2).ext`, ... up to the cap.
///
/// `./file.csv` -> `./file.csv`, `./file(1).csv`, `./file(2).csv`, ...
fn candidate_paths(path: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    let numbered = path.file_stem().into_iter().flat_map(move |stem| {
        (1..=MAX_ALTERNATES).map(move |index| numbered_path(path, stem, index))
    });
    iter::once(path.to_path_buf()).chain(numbered)
}

fn numbered_path(path: &Path, stem: &OsStr, index: u32) -> PathBuf {
    let mut name = OsString::from(stem);
    name.push(format!("({index})"));
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    path.with_file_name(name)
}
