mod barcode;
mod record;

pub use barcode::expand_barcodes;
pub use record::transform_record;
