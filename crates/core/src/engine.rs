// Table loading and the merge pass.
// The tenders report is fully materialized into an index first; item
// rows are then merged in file order, aborting on the first
// inconsistency.

use crate::error::MergeError;
use crate::index::TendersIndex;
use crate::row::{MergedRow, RawRow};
use crate::schema::{self, Table};

/// A schema-validated report: header in file order plus normalized rows.
#[derive(Debug)]
pub struct ParsedTable {
    pub table: Table,
    pub header: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Parse CSV text into a `ParsedTable`, validating the header against the
/// table's fixed schema and normalizing every row.
pub fn load_table(table: Table, csv_data: &str) -> Result<ParsedTable, MergeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| MergeError::Csv {
            table,
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    schema::validate_header(table, &header)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| MergeError::Csv {
            table,
            message: e.to_string(),
        })?;
        rows.push(RawRow::from_record(table, &header, &record)?);
    }

    Ok(ParsedTable { table, header, rows })
}

/// Merge item rows against the tenders index, lazily and in file order.
/// The first error ends the run; the index is never mutated.
pub fn merge<'a>(
    items: &'a ParsedTable,
    index: &'a TendersIndex,
) -> impl Iterator<Item = Result<MergedRow, MergeError>> + 'a {
    items.rows.iter().map(move |row| merge_row(row, index))
}

fn merge_row(row: &RawRow, index: &TendersIndex) -> Result<MergedRow, MergeError> {
    let transaction_id = row.require("Transaction ID")?;

    let entry = index
        .lookup(transaction_id)
        .ok_or_else(|| MergeError::UnknownTransaction {
            transaction_id: transaction_id.to_string(),
        })?;

    for (field, tenders_value) in entry.dup_check.fields() {
        let item_value = row.require(field)?;
        if item_value != tenders_value {
            return Err(MergeError::DuplicateFieldMismatch {
                transaction_id: transaction_id.to_string(),
                field: field.to_string(),
                tenders_value: tenders_value.to_string(),
                item_value: item_value.to_string(),
            });
        }
    }

    Ok(MergedRow::new(row, &entry.payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DuplicatePolicy;
    use crate::schema::{DUP_CHECK_FIELDS, ITEM_FIELDS, TENDERS_FIELDS};

    // Deterministic fixture values: dup-check fields depend only on the
    // transaction so both reports agree; everything else is table-tagged
    // so renames are observable.
    fn field_value(table: &str, id: &str, column: &str) -> String {
        if column == "Transaction ID" {
            return id.to_string();
        }
        if DUP_CHECK_FIELDS.contains(&column) {
            return format!("{id}/{column}");
        }
        format!("{id}/{table}/{column}")
    }

    fn report(table: &str, fields: &[&str], ids: &[&str]) -> String {
        let mut out = fields.join(",");
        out.push('\n');
        for id in ids {
            let row: Vec<String> = fields
                .iter()
                .map(|c| field_value(table, id, c))
                .collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    fn tenders_csv(ids: &[&str]) -> String {
        report("tenders", TENDERS_FIELDS, ids)
    }

    fn item_csv(ids: &[&str]) -> String {
        report("item", ITEM_FIELDS, ids)
    }

    fn build_index(ids: &[&str]) -> TendersIndex {
        let tenders = load_table(Table::Tenders, &tenders_csv(ids)).unwrap();
        TendersIndex::build(&tenders.rows, DuplicatePolicy::LastWins).unwrap()
    }

    #[test]
    fn load_table_validates_and_normalizes() {
        let parsed = load_table(Table::Tenders, &tenders_csv(&["T1", "T2"])).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.header.len(), TENDERS_FIELDS.len());
        assert_eq!(parsed.rows[0].get("Transaction ID"), Some("T1"));
        // Header line is line 1, first data row line 2.
        assert_eq!(parsed.rows[0].line, 2);
    }

    #[test]
    fn load_table_rejects_foreign_header() {
        let err = load_table(Table::Item, &tenders_csv(&["T1"])).unwrap_err();
        assert!(matches!(err, MergeError::SchemaMismatch { table: Table::Item, .. }));
    }

    #[test]
    fn load_table_rejects_short_row() {
        let mut data = tenders_csv(&[]);
        data.push_str("T1,only-two-values\n");
        let err = load_table(Table::Tenders, &data).unwrap_err();
        assert!(matches!(err, MergeError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn load_table_rejects_extra_values() {
        let mut data = item_csv(&["T1"]);
        let newline = data.pop();
        assert_eq!(newline, Some('\n'));
        data.push_str(",stray\n");
        let err = load_table(Table::Item, &data).unwrap_err();
        assert!(matches!(
            err,
            MergeError::UnexpectedColumns { table: Table::Item, extra: 1, .. }
        ));
    }

    #[test]
    fn merge_happy_path_renames_payload() {
        let index = build_index(&["T1", "T2"]);
        let items = load_table(Table::Item, &item_csv(&["T1", "T2", "T1"])).unwrap();

        let merged: Vec<MergedRow> = merge(&items, &index)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(merged.len(), 3, "one output row per item row");

        let first = &merged[0];
        // Item-side common fields keep their own values…
        assert_eq!(first.get("Net Total"), Some("T1/item/Net Total"));
        // …and the tenders values arrive under their renamed columns.
        assert_eq!(first.get("Tenders Net Total"), Some("T1/tenders/Net Total"));
        assert_eq!(first.get("Tenders Tax"), Some("T1/tenders/Tax"));
        assert_eq!(first.get("Tenders Total Due"), Some("T1/tenders/Total Due"));
        // Tenders-only fields copied verbatim.
        assert_eq!(first.get("Tips"), Some("T1/tenders/Tips"));
        assert_eq!(first.get("Receipt Number"), Some("T1/tenders/Receipt Number"));
        // Item-only fields untouched.
        assert_eq!(first.get("UPC"), Some("T1/item/UPC"));
    }

    #[test]
    fn merge_preserves_item_order() {
        let index = build_index(&["T1", "T2", "T3"]);
        let items = load_table(Table::Item, &item_csv(&["T3", "T1", "T2"])).unwrap();
        let ids: Vec<String> = merge(&items, &index)
            .map(|r| r.unwrap().get("Transaction ID").unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["T3", "T1", "T2"]);
    }

    #[test]
    fn merge_fails_fast_on_unknown_transaction() {
        let index = build_index(&["T1"]);
        let items = load_table(Table::Item, &item_csv(&["T1", "T9", "T1"])).unwrap();

        let mut stream = merge(&items, &index);
        assert!(stream.next().unwrap().is_ok());
        match stream.next().unwrap().unwrap_err() {
            MergeError::UnknownTransaction { transaction_id } => {
                assert_eq!(transaction_id, "T9");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn merge_fails_on_dup_check_disagreement() {
        let index = build_index(&["T1"]);

        // Same key, but the item row's Cashier Name differs.
        let mut data = ITEM_FIELDS.join(",");
        data.push('\n');
        let row: Vec<String> = ITEM_FIELDS
            .iter()
            .map(|c| {
                if *c == "Cashier Name" {
                    "somebody else".to_string()
                } else {
                    field_value("item", "T1", c)
                }
            })
            .collect();
        data.push_str(&row.join(","));
        data.push('\n');

        let items = load_table(Table::Item, &data).unwrap();
        let err = merge(&items, &index).next().unwrap().unwrap_err();
        match err {
            MergeError::DuplicateFieldMismatch { field, transaction_id, tenders_value, item_value } => {
                assert_eq!(field, "Cashier Name");
                assert_eq!(transaction_id, "T1");
                assert_eq!(tenders_value, "T1/Cashier Name");
                assert_eq!(item_value, "somebody else");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
