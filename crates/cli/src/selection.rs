// Column-selection parsing and validation. Names are checked against
// the union of both report schemas plus the renamed payload columns
// before the core ever runs.

use std::collections::HashSet;

use tillmerge_core::schema;

use crate::CliError;

/// A fully validated column selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Natural order: item header followed by the tenders payload.
    All,
    /// Only these columns, in this order.
    Include(Vec<String>),
    /// Natural order minus these columns.
    Exclude(HashSet<String>),
}

impl Selection {
    pub fn include(&self) -> Option<&[String]> {
        match self {
            Selection::Include(cols) => Some(cols),
            _ => None,
        }
    }

    pub fn exclude(&self) -> Option<&HashSet<String>> {
        match self {
            Selection::Exclude(cols) => Some(cols),
            _ => None,
        }
    }
}

/// Parse a comma-separated inclusion list, keeping caller order.
pub fn parse_include(raw: &str) -> Result<Selection, CliError> {
    let names: Vec<String> = raw.split(',').map(str::to_string).collect();
    validate_names(names.iter().map(String::as_str))?;
    Ok(Selection::Include(names))
}

/// Parse a comma-separated exclusion set.
pub fn parse_exclude(raw: &str) -> Result<Selection, CliError> {
    let names: HashSet<String> = raw.split(',').map(str::to_string).collect();
    validate_names(names.iter().map(String::as_str))?;
    Ok(Selection::Exclude(names))
}

fn validate_names<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), CliError> {
    let mut unknown: Vec<&str> = names.filter(|n| !schema::is_known_column(n)).collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort();
    Err(
        CliError::usage(format!("unknown column(s): {}", unknown.join(", "))).with_hint(
            "column names must match the report headers exactly, \
             e.g. \"Transaction ID\" or \"Tenders Net Total\"",
        ),
    )
}
