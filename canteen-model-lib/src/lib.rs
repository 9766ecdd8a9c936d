//! Canteen Model Processor Library
//!
//! This library converts canteen menu CSV files into the Canteen Model JSON
//! document, using a column definition selected by a menu type.

mod builder;
mod config;
mod definition;
mod error;
mod processor;
mod reader;
mod template;
mod transform;
mod types;
mod utils;

pub use builder::{CanteenModelBuilder, ProcessedModel};
pub use config::ProcessorConfig;
pub use definition::{
    DefinitionResolver, DefinitionSource, Preset, CUSTOM_DEFINITION_TEMPLATE, CUSTOM_TYPE,
};
pub use error::{ProcessingMessage, ProcessingState, ProcessorError, RowTransformError};
pub use processor::{Processor, Upload};
pub use reader::{decode_records, load_records, DecodedRecords};
pub use template::{TemplateSource, CANTEEN_TEMPLATE};
pub use transform::{expand_barcodes, transform_record};
pub use types::{
    Barcode, CanteenModel, CatalogItem, ColumnDefinition, ColumnMapping, KioskEntry, Market,
    MarketMetadata, Message, RawRecord, TargetField,
};
