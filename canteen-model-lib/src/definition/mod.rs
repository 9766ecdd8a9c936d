mod presets;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ProcessorError;
use crate::types::ColumnDefinition;

pub use presets::CUSTOM_DEFINITION_TEMPLATE;

/// Discriminator value that selects a caller supplied definition.
pub const CUSTOM_TYPE: &str = "custom";

/// Known menu layouts, each backed by a `<name>.cdf.json` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Sjsu,
    Uh,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Sjsu, Preset::Uh];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Sjsu => "sjsu",
            Preset::Uh => "uh",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.cdf.json", self.name())
    }

    pub fn embedded(&self) -> &'static str {
        match self {
            Preset::Sjsu => presets::SJSU_DEFINITION,
            Preset::Uh => presets::UH_DEFINITION,
        }
    }
}

impl FromStr for Preset {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Preset::ALL
            .iter()
            .find(|preset| preset.name() == lowered)
            .copied()
            .ok_or_else(|| ProcessorError::UnsupportedType(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where preset tables are read from.
#[derive(Debug, Clone, Default)]
pub enum DefinitionSource {
    #[default]
    Embedded,
    /// Read `<dir>/<preset>.cdf.json` on every resolution.
    Directory(PathBuf),
}

#[derive(Debug, Clone, Default)]
pub struct DefinitionResolver {
    source: DefinitionSource,
}

impl DefinitionResolver {
    pub fn new(source: DefinitionSource) -> Self {
        Self { source }
    }

    /// Select the column definition for `type_`: a preset name (any case) or
    /// `custom`, which requires `custom_definition`.
    pub fn resolve(
        &self,
        type_: Option<&str>,
        custom_definition: Option<&[u8]>,
    ) -> Result<ColumnDefinition, ProcessorError> {
        let type_ = type_
            .filter(|t| !t.is_empty())
            .ok_or(ProcessorError::MissingType)?;

        let definition = if type_.eq_ignore_ascii_case(CUSTOM_TYPE) {
            tracing::info!("Processing custom column definition");
            let bytes = custom_definition
                .filter(|b| !b.iter().all(u8::is_ascii_whitespace))
                .ok_or(ProcessorError::MissingCustomDefinition)?;
            ColumnDefinition::from_slice(bytes)?
        } else {
            let preset = type_.parse::<Preset>().map_err(|e| {
                tracing::warn!("Unsupported format provided: {}", type_);
                e
            })?;
            tracing::info!("Processing {} file", preset);
            self.load_preset(preset)?
        };

        for target in definition.unknown_targets() {
            tracing::warn!("Column definition maps onto unknown target '{}'", target);
        }

        Ok(definition)
    }

    fn load_preset(&self, preset: Preset) -> Result<ColumnDefinition, ProcessorError> {
        match &self.source {
            DefinitionSource::Embedded => {
                ColumnDefinition::from_slice(preset.embedded().as_bytes())
            }
            DefinitionSource::Directory(dir) => {
                let path = dir.join(preset.file_name());
                tracing::debug!("Loading column definition from {}", path.display());
                let bytes = std::fs::read(&path)?;
                ColumnDefinition::from_slice(&bytes).map_err(|e| {
                    ProcessorError::DefinitionParse(format!("{}: {}", path.display(), e))
                })
            }
        }
    }
}
