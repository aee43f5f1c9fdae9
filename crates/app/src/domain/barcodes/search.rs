//! Saved barcode search.

use super::models::BarcodeRecord;

/// Records matching a search query, in their original order.
///
/// A blank query matches everything. Otherwise a record matches when its item
/// name contains the query ignoring case, or its item code contains it.
pub fn filter_barcodes<'a>(records: &'a [BarcodeRecord], query: &str) -> Vec<&'a BarcodeRecord> {
    let query = query.trim();

    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            record.item_name.as_str().to_lowercase().contains(&needle)
                || record.item_code.as_str().contains(query)
        })
        .collect()
}
