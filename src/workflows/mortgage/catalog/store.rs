use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use super::ConstraintCatalog;
use crate::workflows::mortgage::domain::BankConstraint;

/// Raised when the bank constraint store cannot back a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("bank constraint store not found at {}", path.display())]
    Missing { path: PathBuf },
    #[error("bank constraint store unreadable: {0}")]
    Io(#[from] io::Error),
    #[error("bank constraint store is corrupt: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid constraint row for '{bank}': {detail}")]
    InvalidRecord { bank: String, detail: String },
}

/// CSV-backed persistence for the constraint catalog.
#[derive(Debug, Clone)]
pub struct CsvCatalogStore {
    path: PathBuf,
}

impl CsvCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ConstraintCatalog, CatalogError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(CatalogError::Missing {
                    path: self.path.clone(),
                })
            }
            Err(err) => return Err(err.into()),
        };
        let catalog = read_catalog(file)?;
        info!(path = %self.path.display(), banks = catalog.len(), "bank constraints loaded");
        Ok(catalog)
    }

    /// Replaces the store; readers see either the old file or the complete new one.
    pub fn save(&self, catalog: &ConstraintCatalog) -> Result<(), CatalogError> {
        self.replace_with(|file| write_catalog(file, catalog))?;
        info!(path = %self.path.display(), banks = catalog.len(), "bank constraints saved");
        Ok(())
    }

    /// Writes into a sibling temp file and renames it over the store on success.
    fn replace_with<F>(&self, write: F) -> Result<(), CatalogError>
    where
        F: FnOnce(&mut NamedTempFile) -> Result<(), CatalogError>,
    {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)?;
        write(&mut staged)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    /// Loads the store, writing `defaults` first when the file does not exist yet.
    ///
    /// Corrupt stores are surfaced rather than overwritten.
    pub fn load_or_seed(
        &self,
        defaults: &ConstraintCatalog,
    ) -> Result<ConstraintCatalog, CatalogError> {
        match self.load() {
            Err(CatalogError::Missing { path }) => {
                warn!(path = %path.display(), "bank constraint store missing, seeding defaults");
                self.save(defaults)?;
                self.load()
            }
            other => other,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ConstraintRow {
    #[serde(rename = "Bank Name")]
    bank_name: String,
    #[serde(rename = "Base Interest Rate")]
    base_interest_rate: f64,
    #[serde(rename = "Max Loan to Income")]
    max_loan_to_income: f64,
    #[serde(rename = "Min Credit Score")]
    min_credit_score: u16,
    #[serde(rename = "Down Payment (%)")]
    down_payment_percent: f64,
}

impl ConstraintRow {
    fn from_constraint(bank: &BankConstraint) -> Self {
        // Stored as a percentage; rounded so 0.15 is written as 15 rather than 15.000000000000002.
        let percent = (bank.down_payment_fraction * 100.0 * 1e6).round() / 1e6;
        Self {
            bank_name: bank.name.clone(),
            base_interest_rate: bank.base_interest_rate,
            max_loan_to_income: bank.max_loan_to_income,
            min_credit_score: bank.min_credit_score,
            down_payment_percent: percent,
        }
    }

    fn into_constraint(self) -> Result<BankConstraint, CatalogError> {
        let invalid = |detail: &str| CatalogError::InvalidRecord {
            bank: self.bank_name.clone(),
            detail: detail.to_string(),
        };

        if self.bank_name.trim().is_empty() {
            return Err(invalid("bank name is empty"));
        }
        if !self.base_interest_rate.is_finite() || self.base_interest_rate < 0.0 {
            return Err(invalid("interest rate must be a non-negative percentage"));
        }
        if !self.max_loan_to_income.is_finite() || self.max_loan_to_income <= 0.0 {
            return Err(invalid("max loan to income must be positive"));
        }
        if !(0.0..=100.0).contains(&self.down_payment_percent) {
            return Err(invalid("down payment must be between 0 and 100 percent"));
        }

        Ok(BankConstraint {
            name: self.bank_name.trim().to_string(),
            base_interest_rate: self.base_interest_rate,
            max_loan_to_income: self.max_loan_to_income,
            min_credit_score: self.min_credit_score,
            down_payment_fraction: self.down_payment_percent / 100.0,
        })
    }
}

pub(crate) fn read_catalog<R: Read>(reader: R) -> Result<ConstraintCatalog, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut catalog = ConstraintCatalog::new();

    for row in csv_reader.deserialize::<ConstraintRow>() {
        catalog.insert(row?.into_constraint()?);
    }

    Ok(catalog)
}

pub(crate) fn write_catalog<W: Write>(
    writer: W,
    catalog: &ConstraintCatalog,
) -> Result<(), CatalogError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for bank in catalog {
        csv_writer.serialize(ConstraintRow::from_constraint(bank))?;
    }
    csv_writer.flush()?;
    Ok(())
}
