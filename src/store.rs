//! Line-oriented JSONL record store.
//!
//! One file per store, one JSON object per line, append-compatible. The
//! store knows nothing about tasks; it persists any [`Record`] keyed by its
//! id field. Mutations (`update`, `delete`) rewrite the whole file through a
//! temporary sibling that is synced and atomically renamed into place, so a
//! failed rewrite leaves the previous contents intact.
//!
//! Malformed lines fail the read with a decoding error carrying the line
//! number. They are never silently skipped.

use crate::record::Record;
use eyre::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Lines, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Generic JSONL-backed record store.
pub struct JsonlStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Record> JsonlStore<T> {
    /// Create a store backed by the given file path.
    ///
    /// The file (and its parent directories) are created lazily on first
    /// append; a store over a missing file behaves as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a new line at the end of the file.
    ///
    /// No uniqueness check is performed; generating unique ids is the
    /// caller's responsibility.
    pub fn append(&self, record: &T) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let line = serde_json::to_string(record).context("Failed to serialize record")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {} for append", self.path.display()))?;

        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to append to {}", self.path.display()))?;

        log::debug!("Appended record {} to {}", record.id(), self.path.display());
        Ok(())
    }

    /// Get the first record matching `id`, in file order.
    pub fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        for record in self.iter()? {
            let record = record?;
            if record.id() == id {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// All records in insertion order.
    pub fn list_all(&self) -> Result<Vec<T>> {
        self.iter()?.collect()
    }

    /// Replace the record matching `id` with `record`.
    ///
    /// Returns false (and changes nothing) when no record matches.
    pub fn update(&self, id: &str, record: T) -> Result<bool> {
        let mut records = self.list_all()?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(false);
        };
        *slot = record;
        self.rewrite(&records)?;
        Ok(true)
    }

    /// Remove the record matching `id`.
    ///
    /// Returns false (and changes nothing) when no record matches.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let records = self.list_all()?;
        let before = records.len();
        let remaining: Vec<T> = records.into_iter().filter(|r| r.id() != id).collect();
        if remaining.len() == before {
            return Ok(false);
        }
        self.rewrite(&remaining)?;
        Ok(true)
    }

    /// Records satisfying `predicate`, in file order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>> {
        let mut matches = Vec::new();
        for record in self.iter()? {
            let record = record?;
            if predicate(&record) {
                matches.push(record);
            }
        }
        Ok(matches)
    }

    /// Number of records, via full scan.
    pub fn len(&self) -> Result<usize> {
        let mut count = 0;
        for record in self.iter()? {
            record?;
            count += 1;
        }
        Ok(count)
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.iter()?.next().is_none())
    }

    /// Lazy iterator over records in file order.
    ///
    /// Each call re-reads from the start of the file, so iteration is
    /// restartable. A missing backing file yields an empty iterator.
    pub fn iter(&self) -> Result<RecordIter<T>> {
        let lines = match File::open(&self.path) {
            Ok(file) => Some(BufReader::new(file).lines()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open {}", self.path.display()));
            }
        };
        Ok(RecordIter {
            lines,
            line_number: 0,
            path: self.path.clone(),
            _record: PhantomData,
        })
    }

    /// Rewrite the full file through a temporary sibling + atomic rename.
    fn rewrite(&self, records: &[T]) -> Result<()> {
        let tmp_path = self.path.with_extension("tmp");

        {
            let mut tmp = File::create(&tmp_path)
                .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
            for record in records {
                let line = serde_json::to_string(record).context("Failed to serialize record")?;
                writeln!(tmp, "{}", line)
                    .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
            }
            tmp.sync_all()
                .with_context(|| format!("Failed to sync {}", tmp_path.display()))?;
        }

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to replace {} with {}",
                self.path.display(),
                tmp_path.display()
            )
        })?;

        log::debug!("Rewrote {} with {} record(s)", self.path.display(), records.len());
        Ok(())
    }
}

/// Iterator returned by [`JsonlStore::iter`].
pub struct RecordIter<T> {
    lines: Option<Lines<BufReader<File>>>,
    line_number: usize,
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Record> Iterator for RecordIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.lines.as_mut()?;
        loop {
            let line = match lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(e).with_context(|| {
                        format!("Failed to read line {} of {}", self.line_number + 1, self.path.display())
                    }));
                }
            };
            self.line_number += 1;

            // A trailing blank line from an interrupted append is not data
            if line.trim().is_empty() {
                continue;
            }

            return Some(serde_json::from_str(&line).with_context(|| {
                format!(
                    "Malformed record at line {} of {}",
                    self.line_number,
                    self.path.display()
                )
            }));
        }
    }
}
