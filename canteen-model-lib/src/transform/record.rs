use crate::error::RowTransformError;
use crate::types::{Barcode, CatalogItem, ColumnDefinition, RawRecord, TargetField};
use crate::utils::{parse_float_prefix, parse_int_prefix, split_barcodes};

/// Map one record onto a catalog item.
///
/// Columns without a usable entry in `definition` are dropped. An empty record
/// produces no item. Cells missing from a short row leave their targets at the
/// defaults; cells past the last header are ignored.
pub fn transform_record(
    record: &RawRecord,
    definition: &ColumnDefinition,
) -> Result<Option<CatalogItem>, RowTransformError> {
    if record.is_empty() {
        return Ok(None);
    }

    let mut item = CatalogItem::default();
    for (column, value) in record.fields() {
        if let Some(target) = definition.target_for(column) {
            apply_value(&mut item, target, value);
        }
    }

    Ok(Some(item))
}

fn apply_value(item: &mut CatalogItem, target: TargetField, value: &str) {
    match target {
        TargetField::ProductPackageId => item.product_package_id = parse_int_prefix(value),
        TargetField::ProductName => item.product_name = value.to_string(),
        TargetField::ProductCategory => item.product_category = value.to_string(),
        TargetField::Price => item.price = parse_float_prefix(value),
        TargetField::TaxRate => item.tax_rate = parse_float_prefix(value),
        TargetField::FeeAmount => item.fee_amount = parse_float_prefix(value),
        TargetField::SubMenu => item.sub_menu = Some(value.to_string()),
        TargetField::HealthyIndicator => item.healthy_indicator = parse_float_prefix(value),
        TargetField::Barcode => item.barcodes.extend(split_barcodes(value).into_iter().map(
            |token| Barcode {
                bar_code: token.to_string(),
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnMapping;
    use std::sync::Arc;

    fn definition() -> ColumnDefinition {
        ColumnDefinition::new(vec![
            ColumnMapping::new("Id", "ProductPackageID"),
            ColumnMapping::new("Name", "ProductName"),
            ColumnMapping::new("Dept", "ProductCategory"),
            ColumnMapping::new("Cost", "Price"),
            ColumnMapping::new("Tax", "TaxRate"),
            ColumnMapping::new("Menu", "SubMenu"),
            ColumnMapping::new("UPC", "Barcode"),
        ])
    }

    #[test]
    fn coerces_each_target() {
        let record = RawRecord::from_pairs([
            ("Id", "1001"),
            ("Name", "Trail Mix"),
            ("Dept", "Snacks"),
            ("Cost", "3.25"),
            ("Tax", "0.0925"),
            ("Menu", "Grab & Go"),
            ("UPC", "041570054529"),
            ("Unmapped", "dropped"),
        ]);
        let item = transform_record(&record, &definition()).unwrap().unwrap();

        assert_eq!(item.product_package_id, Some(1001));
        assert_eq!(item.product_name, "Trail Mix");
        assert_eq!(item.product_category, "Snacks");
        assert_eq!(item.price, 3.25);
        assert_eq!(item.tax_rate, 0.0925);
        assert_eq!(item.sub_menu.as_deref(), Some("Grab & Go"));
        assert_eq!(item.fee_amount, 0.0);
        assert_eq!(
            item.barcodes,
            vec![Barcode {
                bar_code: "041570054529".into()
            }]
        );
    }

    #[test]
    fn non_numeric_values_do_not_reject_the_row() {
        let record = RawRecord::from_pairs([("Id", "ABC-1"), ("Cost", "free")]);
        let item = transform_record(&record, &definition()).unwrap().unwrap();

        assert_eq!(item.product_package_id, None);
        assert!(item.price.is_nan());
    }

    #[test]
    fn listed_barcodes_become_separate_entries() {
        let record = RawRecord::from_pairs([("UPC", "111, ,222")]);
        let item = transform_record(&record, &definition()).unwrap().unwrap();
        let codes: Vec<_> = item.barcodes.iter().map(|b| b.bar_code.as_str()).collect();
        assert_eq!(codes, vec!["111", "222"]);
    }

    #[test]
    fn empty_or_unmapped_barcode_yields_no_entries() {
        let record = RawRecord::from_pairs([("Name", "Soup"), ("UPC", "")]);
        let item = transform_record(&record, &definition()).unwrap().unwrap();
        assert!(item.barcodes.is_empty());

        let no_barcode = ColumnDefinition::new(vec![ColumnMapping::new("Name", "ProductName")]);
        let record = RawRecord::from_pairs([("Name", "Soup"), ("UPC", "999")]);
        let item = transform_record(&record, &no_barcode).unwrap().unwrap();
        assert!(item.barcodes.is_empty());
    }

    #[test]
    fn same_input_gives_same_item() {
        let record = RawRecord::from_pairs([("Id", "7"), ("Name", "Tea"), ("UPC", "5")]);
        let def = definition();
        assert_eq!(
            transform_record(&record, &def).unwrap(),
            transform_record(&record, &def).unwrap()
        );
    }

    #[test]
    fn empty_record_yields_nothing() {
        let empty = RawRecord::from_pairs(Vec::<(String, String)>::new());
        assert_eq!(transform_record(&empty, &definition()), Ok(None));
    }

    #[test]
    fn short_row_keeps_the_cells_it_has() {
        let headers: Arc<[String]> =
            vec!["Id".to_string(), "Name".to_string(), "Cost".to_string(), "UPC".to_string()]
                .into();
        let short = RawRecord::new(headers, vec!["1003".into(), "Turkey Sandwich".into()]);
        let item = transform_record(&short, &definition()).unwrap().unwrap();

        assert_eq!(item.product_package_id, Some(1003));
        assert_eq!(item.product_name, "Turkey Sandwich");
        assert_eq!(item.price, 0.0);
        assert!(item.barcodes.is_empty());
    }

    #[test]
    fn cells_past_the_last_header_are_ignored() {
        let headers: Arc<[String]> = vec!["Id".to_string(), "Name".to_string()].into();
        let long = RawRecord::new(headers, vec!["2".into(), "Soup".into(), "555".into()]);
        let item = transform_record(&long, &definition()).unwrap().unwrap();

        assert_eq!(item.product_package_id, Some(2));
        assert_eq!(item.product_name, "Soup");
        assert!(item.barcodes.is_empty());
    }

    #[test]
    fn without_definition_entries_the_item_keeps_defaults() {
        let record = RawRecord::from_pairs([("Name", "Tea")]);
        let item = transform_record(&record, &ColumnDefinition::default())
            .unwrap()
            .unwrap();
        assert_eq!(item, CatalogItem::default());
    }
}
