mod csv;
mod definition;
mod model;

pub use csv::RawRecord;
pub use definition::{ColumnDefinition, ColumnMapping, TargetField};
pub use model::{Barcode, CanteenModel, CatalogItem, KioskEntry, Market, MarketMetadata, Message};
