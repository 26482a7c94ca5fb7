use crate::error::{AuditError, Result};
use crate::readers::text_source::{open_text, Compression};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Read;
use std::path::{Path, PathBuf};

/// A CSV file opened for a single pass, with its header row resolved.
pub struct CsvTable {
    path: PathBuf,
    compression: Compression,
    headers: StringRecord,
    records: StringRecordsIntoIter<Box<dyn Read>>,
}

impl CsvTable {
    pub fn open(path: &Path) -> Result<Self> {
        let (compression, source) = open_text(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);
        let headers = reader.headers()?.clone();

        Ok(Self {
            path: path.to_path_buf(),
            compression,
            headers,
            records: reader.into_records(),
        })
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Position of a header column, or `MalformedHeader` when it is absent.
    /// A repeated header name resolves to its last occurrence.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| *h == name)
            .map(|(index, _)| index)
            .last()
            .ok_or_else(|| AuditError::MalformedHeader {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }

    /// Resolve several columns at once, failing on the first absent one
    pub fn columns<const N: usize>(&self, names: [&str; N]) -> Result<[usize; N]> {
        let mut positions = [0; N];
        for (slot, name) in positions.iter_mut().zip(names) {
            *slot = self.column(name)?;
        }
        Ok(positions)
    }
}

impl Iterator for CsvTable {
    type Item = Result<StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|r| r.map_err(AuditError::from))
    }
}

/// Value of a cell, treating short rows as empty cells
pub fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}
