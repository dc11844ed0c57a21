mod store;

pub use store::{CatalogError, CsvCatalogStore};

use serde::Serialize;

use super::domain::BankConstraint;

/// Ordered set of bank constraints keyed by bank name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConstraintCatalog {
    banks: Vec<BankConstraint>,
}

impl ConstraintCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three reference banks used when no store exists yet.
    pub fn reference() -> Self {
        Self::from_banks([
            BankConstraint::new("Nordea", 6.1, 4.0, 720, 0.10),
            BankConstraint::new("DNB", 5.5, 5.0, 650, 0.15),
            BankConstraint::new("SPAREBANK 1", 4.5, 4.5, 700, 0.125),
        ])
    }

    pub fn from_banks<I>(banks: I) -> Self
    where
        I: IntoIterator<Item = BankConstraint>,
    {
        let mut catalog = Self::new();
        for bank in banks {
            catalog.insert(bank);
        }
        catalog
    }

    /// Adds a bank, replacing any existing entry with the same name in place.
    ///
    /// Returns the constraint that was replaced, if any.
    pub fn insert(&mut self, bank: BankConstraint) -> Option<BankConstraint> {
        match self.banks.iter_mut().find(|existing| existing.name == bank.name) {
            Some(existing) => Some(std::mem::replace(existing, bank)),
            None => {
                self.banks.push(bank);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&BankConstraint> {
        self.banks.iter().find(|bank| bank.name == name)
    }

    pub fn banks(&self) -> &[BankConstraint] {
        &self.banks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BankConstraint> {
        self.banks.iter()
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConstraintCatalog {
    type Item = &'a BankConstraint;
    type IntoIter = std::slice::Iter<'a, BankConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
