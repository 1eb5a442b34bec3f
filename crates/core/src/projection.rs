// Output column computation and row rendering.
// Natural order = item header order followed by the tenders payload
// output order; an explicit include list is used verbatim.

use std::collections::HashSet;

use crate::error::MergeError;
use crate::row::MergedRow;
use crate::schema::PAYLOAD_FIELDS;

/// Compute the ordered output column list.
///
/// `include` wins when given (the boundary layer has already checked the
/// names); otherwise the natural order, minus any `exclude` names.
pub fn columns(
    item_header: &[String],
    include: Option<&[String]>,
    exclude: Option<&HashSet<String>>,
) -> Vec<String> {
    if let Some(include) = include {
        return include.to_vec();
    }

    let mut cols: Vec<String> = item_header.to_vec();
    cols.extend(PAYLOAD_FIELDS.iter().map(|(_, out)| out.to_string()));

    if let Some(exclude) = exclude {
        cols.retain(|c| !exclude.contains(c));
    }

    cols
}

/// Project a merged row onto the output columns. `MissingColumn` can only
/// fire if an upstream invariant was violated.
pub fn render<'a>(row: &'a MergedRow, columns: &[String]) -> Result<Vec<&'a str>, MergeError> {
    columns
        .iter()
        .map(|column| {
            row.get(column).ok_or_else(|| MergeError::MissingColumn {
                column: column.clone(),
            })
        })
        .collect()
}
