// Tenders index: keyed lookup from Transaction ID to the fields that
// must reappear in item rows (duplicate check) and the fields merged
// into them (payload). Built once, read-only afterwards.

use std::collections::HashMap;

use crate::error::MergeError;
use crate::row::RawRow;
use crate::schema::{DUP_CHECK_FIELDS, PAYLOAD_FIELDS};

/// What to do when a Transaction ID appears more than once in the
/// tenders report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the last row seen (legacy export behavior).
    LastWins,
    /// Fail the run; duplicate IDs in settlement data usually mean a
    /// broken export.
    Reject,
}

/// Tenders fields that must agree with every matching item row.
#[derive(Debug, Clone)]
pub struct DupCheck {
    values: Vec<(&'static str, String)>,
}

impl DupCheck {
    fn from_row(row: &RawRow) -> Result<Self, MergeError> {
        let mut values = Vec::with_capacity(DUP_CHECK_FIELDS.len());
        for field in DUP_CHECK_FIELDS {
            values.push((*field, row.require(field)?.to_string()));
        }
        Ok(Self { values })
    }

    /// (column name, tenders value) pairs in check order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values.iter().map(|(c, v)| (*c, v.as_str()))
    }
}

/// Tenders fields merged into each matching item row, already under
/// their output names.
#[derive(Debug, Clone)]
pub struct Payload {
    values: Vec<(&'static str, String)>,
}

impl Payload {
    fn from_row(row: &RawRow) -> Result<Self, MergeError> {
        let mut values = Vec::with_capacity(PAYLOAD_FIELDS.len());
        for (source, output) in PAYLOAD_FIELDS {
            values.push((*output, row.require(source)?.to_string()));
        }
        Ok(Self { values })
    }

    /// (output column, value) pairs in payload output order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values.iter().map(|(c, v)| (*c, v.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct TenderEntry {
    pub dup_check: DupCheck,
    pub payload: Payload,
}

/// Keyed lookup over the tenders report.
#[derive(Debug)]
pub struct TendersIndex {
    entries: HashMap<String, TenderEntry>,
}

impl TendersIndex {
    pub fn build(rows: &[RawRow], policy: DuplicatePolicy) -> Result<Self, MergeError> {
        let mut entries = HashMap::with_capacity(rows.len());
        for row in rows {
            let transaction_id = row.require("Transaction ID")?.to_string();
            if policy == DuplicatePolicy::Reject && entries.contains_key(&transaction_id) {
                return Err(MergeError::DuplicateTransaction { transaction_id });
            }
            let entry = TenderEntry {
                dup_check: DupCheck::from_row(row)?,
                payload: Payload::from_row(row)?,
            };
            entries.insert(transaction_id, entry);
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, transaction_id: &str) -> Option<&TenderEntry> {
        self.entries.get(transaction_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
