//! `tillmerge-core` — reconcile-and-merge engine for POS CSV exports.
//!
//! Pure engine crate: receives CSV text, returns merged rows or a
//! specific error. No CLI or filesystem dependencies.

pub mod engine;
pub mod error;
pub mod index;
pub mod projection;
pub mod row;
pub mod schema;

pub use engine::{load_table, merge, ParsedTable};
pub use error::MergeError;
pub use index::{DuplicatePolicy, TendersIndex};
pub use row::{MergedRow, RawRow};
pub use schema::Table;
