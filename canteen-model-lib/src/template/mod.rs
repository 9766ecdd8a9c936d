use std::path::PathBuf;

use crate::error::ProcessorError;
use crate::types::CanteenModel;

pub const CANTEEN_TEMPLATE: &str = include_str!("../../resources/models/canteen.model.json");

/// Where the starting document comes from. A file is re-read on every load.
#[derive(Debug, Clone, Default)]
pub enum TemplateSource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl TemplateSource {
    pub fn load(&self) -> Result<CanteenModel, ProcessorError> {
        match self {
            TemplateSource::Embedded => parse_template(CANTEEN_TEMPLATE),
            TemplateSource::File(path) => {
                tracing::debug!("Loading canteen model template from {}", path.display());
                let contents = std::fs::read_to_string(path).map_err(|e| {
                    ProcessorError::Template(format!("{}: {}", path.display(), e))
                })?;
                parse_template(&contents)
            }
        }
    }
}

fn parse_template(contents: &str) -> Result<CanteenModel, ProcessorError> {
    serde_json::from_str(contents).map_err(|e| {
        tracing::error!("Error parsing model JSON : {}", e);
        ProcessorError::Template(e.to_string())
    })
}
