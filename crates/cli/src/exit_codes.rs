//! CLI Exit Code Registry
//!
//! Single source of truth for all exit codes. Exit codes are part of
//! the shell contract — accounting scripts rely on them.
//!
//! | Code | Meaning                                      |
//! |------|----------------------------------------------|
//! | 0    | Success                                      |
//! | 1    | General error (IO, unspecified)              |
//! | 2    | Usage / configuration error                  |
//! | 3    | Report header does not match its schema      |
//! | 4    | Malformed row / extra fields / CSV parse     |
//! | 5    | Item Transaction ID missing from tenders     |
//! | 6    | Duplicate-check field disagrees across files |
//! | 7    | Duplicate Transaction ID (strict mode)       |

use tillmerge_core::MergeError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, bad selection names, bad config file.
pub const EXIT_USAGE: u8 = 2;

/// A report's header set does not equal its fixed schema.
pub const EXIT_SCHEMA: u8 = 3;

/// A data row is malformed: missing/empty value, extra fields, or a
/// CSV-level parse failure.
pub const EXIT_ROW: u8 = 4;

/// An item row's Transaction ID has no tenders entry.
pub const EXIT_UNKNOWN_TXN: u8 = 5;

/// A duplicate-check field disagrees between the two reports.
pub const EXIT_FIELD_MISMATCH: u8 = 6;

/// Duplicate Transaction ID in the tenders report (--strict-duplicates).
pub const EXIT_DUPLICATE_TXN: u8 = 7;

/// Map a core merge error to its exit code.
pub fn merge_exit_code(err: &MergeError) -> u8 {
    match err {
        MergeError::SchemaMismatch { .. } => EXIT_SCHEMA,
        MergeError::MalformedRow { .. }
        | MergeError::UnexpectedColumns { .. }
        | MergeError::Csv { .. } => EXIT_ROW,
        MergeError::UnknownTransaction { .. } => EXIT_UNKNOWN_TXN,
        MergeError::DuplicateFieldMismatch { .. } => EXIT_FIELD_MISMATCH,
        MergeError::DuplicateTransaction { .. } => EXIT_DUPLICATE_TXN,
        MergeError::MissingColumn { .. } => EXIT_ERROR,
    }
}
