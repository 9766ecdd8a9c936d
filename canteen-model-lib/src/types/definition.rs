use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProcessorError;

/// Output fields a column may be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetField {
    ProductPackageId,
    ProductName,
    ProductCategory,
    Price,
    TaxRate,
    FeeAmount,
    SubMenu,
    HealthyIndicator,
    Barcode,
}

impl TargetField {
    pub const ALL: [TargetField; 9] = [
        TargetField::ProductPackageId,
        TargetField::ProductName,
        TargetField::ProductCategory,
        TargetField::Price,
        TargetField::TaxRate,
        TargetField::FeeAmount,
        TargetField::SubMenu,
        TargetField::HealthyIndicator,
        TargetField::Barcode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::ProductPackageId => "ProductPackageID",
            TargetField::ProductName => "ProductName",
            TargetField::ProductCategory => "ProductCategory",
            TargetField::Price => "Price",
            TargetField::TaxRate => "TaxRate",
            TargetField::FeeAmount => "FeeAmount",
            TargetField::SubMenu => "SubMenu",
            TargetField::HealthyIndicator => "HealthyIndicator",
            TargetField::Barcode => "Barcode",
        }
    }
}

impl FromStr for TargetField {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetField::ALL
            .iter()
            .find(|field| field.as_str() == s)
            .copied()
            .ok_or_else(|| {
                ProcessorError::DefinitionParse(format!(
                    "Unknown target '{}' [Expected one of: {}]",
                    s,
                    TargetField::ALL
                        .iter()
                        .map(TargetField::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnMapping {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: Option<String>,
}

impl ColumnMapping {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: Some(target.into()),
        }
    }

    /// The recognized target of this entry; `None` for null, empty or unknown names.
    pub fn target_field(&self) -> Option<TargetField> {
        self.target
            .as_deref()
            .filter(|t| !t.is_empty())
            .and_then(|t| t.parse().ok())
    }
}

/// Ordered source column → target field table.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ColumnDefinition {
    mappings: Vec<ColumnMapping>,
}

impl ColumnDefinition {
    pub fn new(mappings: Vec<ColumnMapping>) -> Self {
        Self { mappings }
    }

    /// Parse a definition file; `//` and `/* */` comments are allowed.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ProcessorError> {
        let mut stripped = String::new();
        json_comments::StripComments::new(bytes)
            .read_to_string(&mut stripped)
            .map_err(|e| ProcessorError::DefinitionParse(e.to_string()))?;
        serde_json::from_str(&stripped).map_err(|e| ProcessorError::DefinitionParse(e.to_string()))
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Target of the first entry whose source is `column`. Later entries for the
    /// same column are never consulted, even when the first one has no usable target.
    pub fn target_for(&self, column: &str) -> Option<TargetField> {
        self.mappings
            .iter()
            .find(|m| !m.source.is_empty() && m.source == column)
            .and_then(ColumnMapping::target_field)
    }

    /// Source column of the first entry mapped onto `target`.
    pub fn source_for(&self, target: TargetField) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| !m.source.is_empty() && m.target_field() == Some(target))
            .map(|m| m.source.as_str())
    }

    /// Target names that are set but not recognized.
    pub fn unknown_targets(&self) -> Vec<&str> {
        self.mappings
            .iter()
            .filter_map(|m| m.target.as_deref())
            .filter(|t| !t.is_empty() && t.parse::<TargetField>().is_err())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ProcessorError> {
        if self.mappings.is_empty() {
            return Err(ProcessorError::DefinitionParse(
                "Column definition contains no entries".into(),
            ));
        }

        if let Some(i) = self.mappings.iter().position(|m| m.source.is_empty()) {
            return Err(ProcessorError::DefinitionParse(format!(
                "Entry {} has no source column",
                i + 1
            )));
        }

        for mapping in &self.mappings {
            if let Some(target) = mapping.target.as_deref().filter(|t| !t.is_empty()) {
                target.parse::<TargetField>()?;
            }
        }

        Ok(())
    }
}
