use crate::types::{ColumnDefinition, RawRecord, TargetField};
use crate::utils::split_barcodes;

/// Fan a record out into one record per barcode listed in its barcode column.
///
/// Records without a mapped barcode column, or with at most one barcode, come
/// back as a single unchanged copy. The input record is never modified.
pub fn expand_barcodes(record: &RawRecord, definition: &ColumnDefinition) -> Vec<RawRecord> {
    let Some(column) = definition.source_for(TargetField::Barcode) else {
        return vec![record.clone()];
    };

    let tokens = match record.get(column) {
        Some(value) => split_barcodes(value),
        None => Vec::new(),
    };

    if tokens.len() <= 1 {
        return vec![record.clone()];
    }

    tracing::debug!("Expanding {} barcodes from column '{}'", tokens.len(), column);
    tokens
        .into_iter()
        .map(|token| record.with_value(column, token))
        .collect()
}
