use std::fmt;

use canteen_model::{Preset, CUSTOM_DEFINITION_TEMPLATE, CUSTOM_TYPE};

pub enum DefinitionTemplate {
    Custom,
    Preset(Preset),
}

impl DefinitionTemplate {
    pub fn from_name(name: Option<&str>) -> anyhow::Result<Self> {
        match name {
            None => Ok(DefinitionTemplate::Custom),
            Some(name) if name.eq_ignore_ascii_case(CUSTOM_TYPE) => Ok(DefinitionTemplate::Custom),
            Some(name) => name.parse::<Preset>().map(DefinitionTemplate::Preset).map_err(|_| {
                anyhow::anyhow!(
                    "Invalid preset '{}'. Must be one of: {}",
                    name,
                    Preset::ALL
                        .iter()
                        .map(Preset::name)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }),
        }
    }

    pub fn contents(&self) -> &'static str {
        match self {
            DefinitionTemplate::Custom => CUSTOM_DEFINITION_TEMPLATE,
            DefinitionTemplate::Preset(preset) => preset.embedded(),
        }
    }

    pub fn default_file_name(&self) -> String {
        match self {
            DefinitionTemplate::Custom => "custom.cdf.jsonc".to_string(),
            DefinitionTemplate::Preset(preset) => preset.file_name(),
        }
    }
}

impl fmt::Display for DefinitionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionTemplate::Custom => f.write_str(CUSTOM_TYPE),
            DefinitionTemplate::Preset(preset) => write!(f, "{}", preset),
        }
    }
}
