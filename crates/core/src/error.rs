use std::fmt;

use crate::schema::Table;

#[derive(Debug)]
pub enum MergeError {
    /// A report's header set does not equal its fixed schema.
    SchemaMismatch {
        table: Table,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    /// A data row has a missing or empty value for a declared column.
    MalformedRow {
        table: Table,
        line: u64,
        column: String,
    },
    /// A data row carries more values than the header declares.
    UnexpectedColumns {
        table: Table,
        line: u64,
        extra: usize,
    },
    /// A Transaction ID appears more than once in the tenders report
    /// (strict duplicate policy only).
    DuplicateTransaction { transaction_id: String },
    /// An item row's Transaction ID has no tenders entry.
    UnknownTransaction { transaction_id: String },
    /// A duplicate-check field disagrees between the two reports.
    DuplicateFieldMismatch {
        transaction_id: String,
        field: String,
        tenders_value: String,
        item_value: String,
    },
    /// A projected column is absent from a merged row. Unreachable when
    /// upstream validation ran; kept as a guard.
    MissingColumn { column: String },
    /// CSV reader error.
    Csv { table: Table, message: String },
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaMismatch { table, missing, unexpected } => {
                write!(f, "not a \"{}\" report", table.report_name())?;
                let mut parts = Vec::new();
                if !missing.is_empty() {
                    parts.push(format!("missing columns: {}", missing.join(", ")));
                }
                if !unexpected.is_empty() {
                    parts.push(format!("unexpected columns: {}", unexpected.join(", ")));
                }
                if !parts.is_empty() {
                    write!(f, " ({})", parts.join("; "))?;
                }
                Ok(())
            }
            Self::MalformedRow { table, line, column } => write!(
                f,
                "empty value for \"{column}\" on line {line} of the \"{}\" report",
                table.report_name()
            ),
            Self::UnexpectedColumns { table, line, extra } => write!(
                f,
                "line {line} of the \"{}\" report has {extra} more field(s) than the header",
                table.report_name()
            ),
            Self::DuplicateTransaction { transaction_id } => write!(
                f,
                "duplicate Transaction ID {transaction_id:?} in the tenders report"
            ),
            Self::UnknownTransaction { transaction_id } => write!(
                f,
                "Transaction ID {transaction_id:?} has no matching tenders row"
            ),
            Self::DuplicateFieldMismatch {
                transaction_id,
                field,
                tenders_value,
                item_value,
            } => write!(
                f,
                "\"{field}\" mismatch for Transaction ID {transaction_id:?}: \
                 tenders has {tenders_value:?}, item has {item_value:?}"
            ),
            Self::MissingColumn { column } => {
                write!(f, "column {column:?} missing from merged row")
            }
            Self::Csv { table, message } => {
                write!(f, "cannot parse the \"{}\" report: {message}", table.report_name())
            }
        }
    }
}

impl std::error::Error for MergeError {}
