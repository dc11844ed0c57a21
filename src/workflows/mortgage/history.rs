use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::ApplicantProfile;

/// One row of the append-only request log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "Recorded At")]
    pub recorded_at: DateTime<Utc>,
    #[serde(rename = "Loan Amount")]
    pub loan_amount: f64,
    #[serde(rename = "Annual Income")]
    pub annual_income: f64,
    #[serde(rename = "Capital")]
    pub capital: f64,
    #[serde(rename = "Credit Score")]
    pub credit_score: u16,
}

impl HistoryEntry {
    pub fn new(profile: &ApplicantProfile, recorded_at: DateTime<Utc>) -> Self {
        Self {
            recorded_at,
            loan_amount: profile.loan_amount,
            annual_income: profile.annual_income,
            capital: profile.capital,
            credit_score: profile.credit_score,
        }
    }

    pub fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            loan_amount: self.loan_amount,
            annual_income: self.annual_income,
            capital: self.capital,
            credit_score: self.credit_score,
        }
    }
}

/// Storage abstraction so the advisor service can be exercised without touching disk.
pub trait HistoryRecorder: Send + Sync {
    fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history log io failure: {0}")]
    Io(#[from] io::Error),
    #[error("history log is corrupt: {0}")]
    Csv(#[from] csv::Error),
    #[error("history log unavailable: {0}")]
    Unavailable(String),
}

/// CSV history file; rows are only ever appended, never rewritten.
#[derive(Debug)]
pub struct CsvHistoryLog {
    path: PathBuf,
    writer_lock: Mutex<()>,
}

impl CsvHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryRecorder for CsvHistoryLog {
    fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        let _guard = self
            .writer_lock
            .lock()
            .map_err(|_| HistoryError::Unavailable("writer lock poisoned".to_string()))?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let write_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(entry)?;
        writer.flush()?;
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut entries = read_entries(file)?;
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.split_off(skip))
    }
}

fn read_entries<R: Read>(reader: R) -> Result<Vec<HistoryEntry>, HistoryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();
    for row in csv_reader.deserialize::<HistoryEntry>() {
        entries.push(row?);
    }
    Ok(entries)
}
