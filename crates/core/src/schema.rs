// Fixed report schemas and the payload rename table.
// Column sets come from the ShopKeep export formats; both reports share
// the eight common field names but their values differ per row type.

use std::collections::HashSet;

use crate::error::MergeError;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Tenders,
    Item,
}

impl Table {
    pub fn report_name(&self) -> &'static str {
        match self {
            Table::Tenders => "Transactions Tenders",
            Table::Item => "Transactions by Item",
        }
    }

    /// The full fixed schema for this table.
    pub fn schema(&self) -> &'static [&'static str] {
        match self {
            Table::Tenders => TENDERS_FIELDS,
            Table::Item => ITEM_FIELDS,
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.report_name())
    }
}

// ---------------------------------------------------------------------------
// Field sets
// ---------------------------------------------------------------------------

/// Fields present in both reports. Same names, different per-row values.
pub const COMMON_FIELDS: &[&str] = &[
    "Transaction ID",
    "Time",
    "Register Name/Number",
    "Cashier Name",
    "Operation Type",
    "Net Total",
    "Tax",
    "Total Due",
];

/// "Transactions by Item" schema: common fields plus item-line fields.
pub const ITEM_FIELDS: &[&str] = &[
    "Transaction ID",
    "Time",
    "Register Name/Number",
    "Cashier Name",
    "Operation Type",
    "Net Total",
    "Tax",
    "Total Due",
    "Category",
    "Cost",
    "Customer ID",
    "Department",
    "Discounts",
    "Line Item",
    "Modifiers",
    "Price",
    "Quantity",
    "Store Code",
    "Subtotal",
    "Supplier Code",
    "Supplier",
    "UPC",
];

/// "Transactions Tenders" schema: common fields plus settlement fields.
pub const TENDERS_FIELDS: &[&str] = &[
    "Transaction ID",
    "Time",
    "Register Name/Number",
    "Cashier Name",
    "Operation Type",
    "Net Total",
    "Tax",
    "Total Due",
    "Card Type",
    "Cardholder Name",
    "Customer Email",
    "Customer Name",
    "Discount",
    "Gross Amount",
    "Last 4 Digits",
    "New Liabilities",
    "Receipt Number",
    "Tender Type",
    "Tendered Amount",
    "Tips",
];

/// Common fields whose values must agree between a tenders row and every
/// item row sharing its Transaction ID.
pub const DUP_CHECK_FIELDS: &[&str] = &[
    "Time",
    "Register Name/Number",
    "Cashier Name",
    "Operation Type",
];

/// Tenders fields copied into each matching item row, as
/// (source column, output column) pairs in output order. The three common
/// money fields are renamed so they cannot collide with the item row's
/// identically named columns.
pub const PAYLOAD_FIELDS: &[(&str, &str)] = &[
    ("Customer Name", "Customer Name"),
    ("Customer Email", "Customer Email"),
    ("Gross Amount", "Gross Amount"),
    ("Discount", "Discount"),
    ("Net Total", "Tenders Net Total"),
    ("New Liabilities", "New Liabilities"),
    ("Tax", "Tenders Tax"),
    ("Total Due", "Tenders Total Due"),
    ("Tips", "Tips"),
    ("Tendered Amount", "Tendered Amount"),
    ("Tender Type", "Tender Type"),
    ("Card Type", "Card Type"),
    ("Last 4 Digits", "Last 4 Digits"),
    ("Cardholder Name", "Cardholder Name"),
    ("Receipt Number", "Receipt Number"),
];

/// True if `name` can appear as a column of the merged output or of either
/// input report. Used by the boundary layer to validate column selections.
pub fn is_known_column(name: &str) -> bool {
    ITEM_FIELDS.contains(&name)
        || TENDERS_FIELDS.contains(&name)
        || PAYLOAD_FIELDS.iter().any(|(_, out)| *out == name)
}

// ---------------------------------------------------------------------------
// Header validation
// ---------------------------------------------------------------------------

/// Check that `header`'s name set exactly equals the table's fixed schema.
/// Column order is irrelevant; any missing or extra name is a mismatch.
pub fn validate_header(table: Table, header: &[String]) -> Result<(), MergeError> {
    let expected: HashSet<&str> = table.schema().iter().copied().collect();
    let actual: HashSet<&str> = header.iter().map(String::as_str).collect();
    if expected == actual {
        return Ok(());
    }

    let mut missing: Vec<String> = expected
        .difference(&actual)
        .map(|s| s.to_string())
        .collect();
    let mut unexpected: Vec<String> = actual
        .difference(&expected)
        .map(|s| s.to_string())
        .collect();
    missing.sort();
    unexpected.sort();

    Err(MergeError::SchemaMismatch {
        table,
        missing,
        unexpected,
    })
}
