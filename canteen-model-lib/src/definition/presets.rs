pub const SJSU_DEFINITION: &str = include_str!("../../resources/columndefinitions/sjsu.cdf.json");

pub const UH_DEFINITION: &str = include_str!("../../resources/columndefinitions/uh.cdf.json");

pub const CUSTOM_DEFINITION_TEMPLATE: &str = r#"[
  // Each entry maps one CSV header ("source") onto a Canteen Model field ("target").
  // Headers without an entry are dropped from the output.
  //
  // Valid targets:
  //   ProductPackageID  - parsed as an integer
  //   ProductName       - copied as-is
  //   ProductCategory   - copied as-is
  //   Price             - parsed as a decimal
  //   TaxRate           - parsed as a decimal
  //   FeeAmount         - parsed as a decimal
  //   SubMenu           - copied as-is
  //   HealthyIndicator  - parsed as a decimal
  //   Barcode           - split on "," into one catalog entry per barcode
  {
    "source": "Item Number",
    "target": "ProductPackageID"
  },
  {
    "source": "Item Name",
    "target": "ProductName"
  },
  {
    "source": "Category",
    "target": "ProductCategory"
  },
  {
    "source": "Price",
    "target": "Price"
  },
  {
    "source": "Tax Rate",
    "target": "TaxRate"
  },
  {
    // Several barcodes may share one cell, e.g. "0123, 0456"
    "source": "UPC",
    "target": "Barcode"
  },
  {
    // A null target keeps the column documented without mapping it
    "source": "Supplier",
    "target": null
  }
]"#;
