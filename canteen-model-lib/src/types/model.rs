use serde::{Deserialize, Serialize};

use crate::utils::{deserialize_nullable_f64, deserialize_optional_text};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Barcode {
    #[serde(rename = "BarCode")]
    pub bar_code: String,
}

/// One entry of `Market.ProductCatalog`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogItem {
    #[serde(rename = "ProductPackageID")]
    pub product_package_id: Option<i64>,
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "ProductCategory")]
    pub product_category: String,
    #[serde(rename = "Price", deserialize_with = "deserialize_nullable_f64")]
    pub price: f64,
    #[serde(rename = "TaxRate", deserialize_with = "deserialize_nullable_f64")]
    pub tax_rate: f64,
    #[serde(rename = "FeeAmount", deserialize_with = "deserialize_nullable_f64")]
    pub fee_amount: f64,
    #[serde(rename = "SubMenu")]
    pub sub_menu: Option<String>,
    #[serde(
        rename = "HealthyIndicator",
        deserialize_with = "deserialize_nullable_f64"
    )]
    pub healthy_indicator: f64,
    #[serde(rename = "Barcodes", default)]
    pub barcodes: Vec<Barcode>,
}

impl Default for CatalogItem {
    fn default() -> Self {
        Self {
            product_package_id: Some(0),
            product_name: String::new(),
            product_category: String::new(),
            price: 0.0,
            tax_rate: 0.0,
            fee_amount: 0.0,
            sub_menu: None,
            healthy_indicator: 0.0,
            barcodes: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct KioskEntry {
    #[serde(rename = "Kiosk")]
    pub kiosk: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Market {
    #[serde(rename = "MarketID")]
    pub market_id: Option<i64>,
    #[serde(rename = "AccountName")]
    pub account_name: String,
    #[serde(rename = "LocationName")]
    pub location_name: String,
    #[serde(rename = "MarketName")]
    pub market_name: String,
    #[serde(rename = "Menu")]
    pub menu: Option<String>,
    #[serde(rename = "ConnectURL")]
    pub connect_url: String,
    #[serde(rename = "Kiosks", default)]
    pub kiosks: Vec<KioskEntry>,
    #[serde(rename = "ProductCatalog", default)]
    pub product_catalog: Vec<CatalogItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Message {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "Created")]
    pub created: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Mode")]
    pub mode: String,
}

/// The output document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanteenModel {
    #[serde(rename = "OperationNo")]
    pub operation_no: String,
    #[serde(rename = "Market")]
    pub market: Market,
    #[serde(rename = "Message")]
    pub message: Message,
}

/// Caller supplied overrides for the `Market` node. Empty strings count as absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MarketMetadata {
    #[serde(
        rename = "MarketID",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub market_id: Option<String>,
    #[serde(rename = "AccountName", default)]
    pub account_name: Option<String>,
    #[serde(rename = "LocationName", default)]
    pub location_name: Option<String>,
    #[serde(rename = "MarketName", default)]
    pub market_name: Option<String>,
    #[serde(rename = "Menu", default)]
    pub menu: Option<String>,
    #[serde(rename = "ConnectURL", default)]
    pub connect_url: Option<String>,
    #[serde(rename = "Kiosk", default, deserialize_with = "deserialize_optional_text")]
    pub kiosk: Option<String>,
}
