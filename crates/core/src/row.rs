// Row normalization: a parsed CSV record becomes a name→value map,
// rejected if any declared value is absent or empty, or if the record
// carries values beyond the header.

use std::collections::HashMap;

use crate::error::MergeError;
use crate::index::Payload;
use crate::schema::Table;

// ---------------------------------------------------------------------------
// RawRow
// ---------------------------------------------------------------------------

/// One validated data row: column name → text value, plus the 1-based
/// file line it came from.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub line: u64,
    values: HashMap<String, String>,
}

impl RawRow {
    /// Normalize a CSV record against a validated header.
    pub fn from_record(
        table: Table,
        header: &[String],
        record: &csv::StringRecord,
    ) -> Result<Self, MergeError> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() > header.len() {
            return Err(MergeError::UnexpectedColumns {
                table,
                line,
                extra: record.len() - header.len(),
            });
        }

        let mut values = HashMap::with_capacity(header.len());
        for (i, column) in header.iter().enumerate() {
            match record.get(i) {
                Some(value) if !value.is_empty() => {
                    values.insert(column.clone(), value.to_string());
                }
                _ => {
                    return Err(MergeError::MalformedRow {
                        table,
                        line,
                        column: column.clone(),
                    });
                }
            }
        }

        Ok(Self { line, values })
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Fetch a column that the validated header guarantees is present.
    pub fn require(&self, column: &str) -> Result<&str, MergeError> {
        self.get(column).ok_or_else(|| MergeError::MissingColumn {
            column: column.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// MergedRow
// ---------------------------------------------------------------------------

/// An item row with its tenders payload folded in. Built transiently per
/// item row and consumed by projection.
#[derive(Debug, Clone)]
pub struct MergedRow {
    values: HashMap<String, String>,
}

impl MergedRow {
    pub fn new(item_row: &RawRow, payload: &Payload) -> Self {
        let mut values = item_row.values.clone();
        for (column, value) in payload.fields() {
            values.insert(column.to_string(), value.to_string());
        }
        Self { values }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn record(values: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(values.to_vec())
    }

    #[test]
    fn full_row_normalizes() {
        let header = header(&["Transaction ID", "Tips"]);
        let row = RawRow::from_record(Table::Tenders, &header, &record(&["T1", "2.00"])).unwrap();
        assert_eq!(row.get("Transaction ID"), Some("T1"));
        assert_eq!(row.get("Tips"), Some("2.00"));
        assert_eq!(row.get("Cost"), None);
    }

    #[test]
    fn short_row_is_malformed() {
        let header = header(&["Transaction ID", "Tips"]);
        let err = RawRow::from_record(Table::Tenders, &header, &record(&["T1"])).unwrap_err();
        match err {
            MergeError::MalformedRow { column, .. } => assert_eq!(column, "Tips"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_value_is_malformed() {
        let header = header(&["Transaction ID", "Tips"]);
        let err = RawRow::from_record(Table::Tenders, &header, &record(&["T1", ""])).unwrap_err();
        match err {
            MergeError::MalformedRow { column, .. } => assert_eq!(column, "Tips"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extra_values_are_rejected() {
        let header = header(&["Transaction ID", "Tips"]);
        let err =
            RawRow::from_record(Table::Item, &header, &record(&["T1", "2.00", "stray"]))
                .unwrap_err();
        match err {
            MergeError::UnexpectedColumns { table, extra, .. } => {
                assert_eq!(table, Table::Item);
                assert_eq!(extra, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
