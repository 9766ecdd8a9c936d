use serde_json::Value as JsonValue;

use crate::error::{ProcessingState, ProcessorError};
use crate::template::TemplateSource;
use crate::transform::{expand_barcodes, transform_record};
use crate::types::{
    CanteenModel, ColumnDefinition, KioskEntry, Market, MarketMetadata, RawRecord,
};
use crate::utils::{non_empty, parse_int_prefix};

/// A finished document and what was skipped while producing it.
#[derive(Debug)]
pub struct ProcessedModel {
    pub model: CanteenModel,
    pub state: ProcessingState,
}

#[derive(Debug, Clone, Default)]
pub struct CanteenModelBuilder {
    template: TemplateSource,
}

impl CanteenModelBuilder {
    pub fn new(template: TemplateSource) -> Self {
        Self { template }
    }

    /// Assemble a model from `records`, in input order.
    ///
    /// Each record is barcode-expanded before being transformed, so siblings from
    /// one row sit next to each other in the catalog. Rows that fail to transform
    /// are dropped and noted in the returned state. Without a definition every row
    /// becomes a default item.
    pub fn build(
        &self,
        records: Option<&[RawRecord]>,
        definition: Option<&ColumnDefinition>,
        market: &MarketMetadata,
    ) -> Result<ProcessedModel, ProcessorError> {
        let mut model = self.template.load()?;
        let mut state = ProcessingState::new();

        let empty_definition = ColumnDefinition::default();
        let definition = definition.unwrap_or(&empty_definition);

        let mut rows = 0;
        for (i, record) in records.unwrap_or_default().iter().enumerate() {
            for expanded in expand_barcodes(record, definition) {
                match transform_record(&expanded, definition) {
                    Ok(Some(item)) => {
                        rows += 1;
                        model.market.product_catalog.push(item);
                    }
                    Ok(None) => tracing::debug!("Row {} is empty, skipping", i + 1),
                    Err(e) => state.drop_row(i + 1, &e),
                }
            }
        }
        tracing::info!("Processed {} records", rows);

        apply_market_metadata(&mut model.market, market, &mut state);

        Ok(ProcessedModel { model, state })
    }

    /// Same as [`build`](Self::build) for records that arrive as parsed JSON.
    /// Fails with [`ProcessorError::InvalidInput`] unless `records` is `null` or
    /// an array of objects.
    pub fn build_from_json(
        &self,
        records: &JsonValue,
        definition: Option<&ColumnDefinition>,
        market: &MarketMetadata,
    ) -> Result<ProcessedModel, ProcessorError> {
        let records = RawRecord::list_from_json(records)?;
        self.build(Some(records.as_slice()), definition, market)
    }
}

fn apply_market_metadata(
    market: &mut Market,
    meta: &MarketMetadata,
    state: &mut ProcessingState,
) {
    if let Some(market_id) = non_empty(&meta.market_id) {
        match parse_int_prefix(market_id) {
            Some(id) => market.market_id = Some(id),
            None => {
                tracing::warn!("MarketID '{}' is not a number, leaving it unset", market_id);
                state.add_warning(
                    format!("MarketID '{}' is not a number", market_id),
                    Some("market_metadata".to_string()),
                );
            }
        }
    }
    if let Some(account_name) = non_empty(&meta.account_name) {
        market.account_name = account_name.to_string();
    }
    if let Some(location_name) = non_empty(&meta.location_name) {
        market.location_name = location_name.to_string();
    }
    if let Some(market_name) = non_empty(&meta.market_name) {
        market.market_name = market_name.to_string();
    }
    if let Some(menu) = non_empty(&meta.menu) {
        market.menu = Some(menu.to_string());
    }
    if let Some(connect_url) = non_empty(&meta.connect_url) {
        market.connect_url = connect_url.to_string();
    }
    if let Some(kiosk) = non_empty(&meta.kiosk) {
        market.kiosks.push(KioskEntry {
            kiosk: kiosk.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Barcode, ColumnMapping};
    use serde_json::json;

    fn definition() -> ColumnDefinition {
        ColumnDefinition::new(vec![
            ColumnMapping::new("Id", "ProductPackageID"),
            ColumnMapping::new("Name", "ProductName"),
            ColumnMapping::new("Cost", "Price"),
            ColumnMapping::new("UPC", "Barcode"),
        ])
    }

    fn builder() -> CanteenModelBuilder {
        CanteenModelBuilder::default()
    }

    #[test]
    fn builds_one_item_per_row() {
        let records = vec![
            RawRecord::from_pairs([("Id", "1"), ("Name", "Tea"), ("UPC", "11")]),
            RawRecord::from_pairs([("Id", "2"), ("Name", "Coffee"), ("UPC", "22")]),
            RawRecord::from_pairs([("Id", "3"), ("Name", "Cocoa"), ("UPC", "33")]),
        ];
        let processed = builder()
            .build(Some(records.as_slice()), Some(&definition()), &MarketMetadata::default())
            .unwrap();

        let names: Vec<_> = processed
            .model
            .market
            .product_catalog
            .iter()
            .map(|i| i.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Tea", "Coffee", "Cocoa"]);
        assert_eq!(processed.state.dropped_rows(), 0);
    }

    #[test]
    fn expanded_siblings_stay_together_in_token_order() {
        let records = vec![
            RawRecord::from_pairs([("Id", "1"), ("Name", "Chips"), ("UPC", "111, 222, 333")]),
            RawRecord::from_pairs([("Id", "2"), ("Name", "Soup"), ("UPC", "")]),
        ];
        let processed = builder()
            .build(Some(records.as_slice()), Some(&definition()), &MarketMetadata::default())
            .unwrap();
        let catalog = &processed.model.market.product_catalog;

        assert_eq!(catalog.len(), 4);
        for (item, code) in catalog.iter().zip(["111", "222", "333"]) {
            assert_eq!(item.product_name, "Chips");
            assert_eq!(item.product_package_id, Some(1));
            assert_eq!(
                item.barcodes,
                vec![Barcode {
                    bar_code: code.into()
                }]
            );
        }
        assert_eq!(catalog[3].product_name, "Soup");
        assert!(catalog[3].barcodes.is_empty());
    }

    #[test]
    fn short_and_long_rows_are_kept() {
        let headers: std::sync::Arc<[String]> =
            vec!["Id".to_string(), "Name".to_string(), "UPC".to_string()].into();
        let records = vec![
            RawRecord::new(headers.clone(), vec!["1".into(), "Tea".into()]),
            RawRecord::new(
                headers.clone(),
                vec!["2".into(), "Coffee".into(), "22".into(), "x".into()],
            ),
            RawRecord::new(headers, vec!["3".into(), "Cocoa".into(), "33".into()]),
        ];
        let processed = builder()
            .build(Some(records.as_slice()), Some(&definition()), &MarketMetadata::default())
            .unwrap();
        let catalog = &processed.model.market.product_catalog;

        assert_eq!(catalog.len(), 3);
        assert_eq!(processed.state.dropped_rows(), 0);
        assert_eq!(catalog[0].product_name, "Tea");
        assert!(catalog[0].barcodes.is_empty());
        assert_eq!(catalog[1].barcodes[0].bar_code, "22");
    }

    #[test]
    fn no_records_returns_template_with_market_metadata() {
        let market = MarketMetadata {
            market_id: Some("42".into()),
            market_name: Some("North Hall".into()),
            account_name: Some(String::new()),
            kiosk: Some("K-7".into()),
            ..MarketMetadata::default()
        };
        let processed = builder().build(None, None, &market).unwrap();
        let model = processed.model;

        assert!(model.market.product_catalog.is_empty());
        assert_eq!(model.market.market_id, Some(42));
        assert_eq!(model.market.market_name, "North Hall");
        assert_eq!(model.market.account_name, "");
        assert_eq!(model.market.menu, None);
        assert_eq!(
            model.market.kiosks,
            vec![KioskEntry {
                kiosk: "K-7".into()
            }]
        );

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["Market"]["MarketID"], json!(42));
    }

    #[test]
    fn non_numeric_market_id_is_left_unset() {
        let market = MarketMetadata {
            market_id: Some("north".into()),
            ..MarketMetadata::default()
        };
        let processed = builder().build(Some(&[][..]), None, &market).unwrap();
        assert_eq!(processed.model.market.market_id, None);
        assert!(processed.state.has_warnings());
    }

    #[test]
    fn building_twice_gives_identical_documents() {
        let records = vec![RawRecord::from_pairs([("Id", "1"), ("UPC", "1,2")])];
        let market = MarketMetadata {
            menu: Some("Lunch".into()),
            ..MarketMetadata::default()
        };
        let first = builder()
            .build(Some(records.as_slice()), Some(&definition()), &market)
            .unwrap();
        let second = builder()
            .build(Some(records.as_slice()), Some(&definition()), &market)
            .unwrap();
        assert_eq!(first.model, second.model);
    }

    #[test]
    fn json_records_must_be_a_sequence() {
        let err = builder()
            .build_from_json(
                &json!({ "Id": "1" }),
                Some(&definition()),
                &MarketMetadata::default(),
            )
            .unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidInput(_)));

        let processed = builder()
            .build_from_json(
                &json!([{ "Id": "5", "Name": "Water" }]),
                Some(&definition()),
                &MarketMetadata::default(),
            )
            .unwrap();
        assert_eq!(processed.model.market.product_catalog.len(), 1);
    }

    #[test]
    fn missing_template_produces_no_document() {
        let builder = CanteenModelBuilder::new(TemplateSource::File(
            "/nonexistent/canteen.model.json".into(),
        ));
        let err = builder
            .build(None, None, &MarketMetadata::default())
            .unwrap_err();
        assert!(matches!(err, ProcessorError::Template(_)));
    }
}
