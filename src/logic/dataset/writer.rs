use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::logic::dataset::record::LabeledRecord;
use crate::logic::error::{DetectorError, Result};

/// Line-oriented writer for labelled records (one JSON object per line)
pub struct DatasetWriter {
    out: BufWriter<File>,
    written: usize,
}

impl DatasetWriter {
    /// Create or truncate `path`, making parent directories as needed
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            out: BufWriter::new(File::create(path)?),
            written: 0,
        })
    }

    pub fn append(&mut self, record: &LabeledRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.out, "{}", json)?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered lines and return how many were written
    pub fn finish(mut self) -> Result<usize> {
        self.out.flush()?;
        Ok(self.written)
    }
}

pub fn write_records(path: &Path, records: &[LabeledRecord]) -> Result<usize> {
    let mut writer = DatasetWriter::create(path)?;
    for record in records {
        writer.append(record)?;
    }
    writer.finish()
}

/// Read a JSONL corpus. Blank lines are skipped; a bad line fails the whole
/// read with its 1-based line number.
pub fn read_records(path: &Path) -> Result<Vec<LabeledRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: LabeledRecord = serde_json::from_str(&line)
            .map_err(|e| DetectorError::InvalidInput(format!("line {}: {}", index + 1, e)))?;
        records.push(record);
    }

    Ok(records)
}
