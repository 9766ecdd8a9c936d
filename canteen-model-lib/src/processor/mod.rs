use crate::builder::{CanteenModelBuilder, ProcessedModel};
use crate::config::ProcessorConfig;
use crate::definition::DefinitionResolver;
use crate::error::ProcessorError;
use crate::reader::load_records;
use crate::types::MarketMetadata;

/// An uploaded menu file.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            bytes,
        }
    }
}

/// Turns one upload into one Canteen Model. Holds no per-request state, so a
/// single processor can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Processor {
    config: ProcessorConfig,
    resolver: DefinitionResolver,
    builder: CanteenModelBuilder,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        tracing::info!("Creating processor with config: {:?}", config);
        Self {
            resolver: DefinitionResolver::new(config.definition_source()),
            builder: CanteenModelBuilder::new(config.template_source()),
            config,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn validate_upload(&self, upload: Option<&Upload>) -> Result<(), ProcessorError> {
        let upload = upload.ok_or_else(|| {
            tracing::warn!("No file provided -- no file generated");
            ProcessorError::Input("no file provided".into())
        })?;

        if let Some(name) = &upload.file_name {
            tracing::info!("file detected : {}", name);
            if !self.config.is_allowed_file(name) {
                return Err(ProcessorError::Input(format!(
                    "'{}' is not one of the accepted file types: {}",
                    name,
                    self.config.allowed_extensions.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Convert `upload` using the column definition selected by `type_`.
    ///
    /// Any request level failure (file, type, definition, template) returns an
    /// error and no document. Rows that cannot be transformed are left out of the
    /// catalog and reported in [`ProcessedModel::state`].
    pub async fn process_upload(
        &self,
        upload: Option<Upload>,
        type_: Option<&str>,
        market: &MarketMetadata,
        custom_definition: Option<&[u8]>,
    ) -> Result<ProcessedModel, ProcessorError> {
        self.validate_upload(upload.as_ref())?;
        let definition = self.resolver.resolve(type_, custom_definition)?;

        let bytes = upload.map(|u| u.bytes).unwrap_or_default();
        let decoded = load_records(bytes).await?;

        let mut processed = self
            .builder
            .build(Some(decoded.records.as_slice()), Some(&definition), market)?;
        processed.state.merge(decoded.state);

        if processed.state.dropped_rows() > 0 {
            tracing::warn!(
                "{} rows could not be converted and were skipped",
                processed.state.dropped_rows()
            );
        }

        Ok(processed)
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}
