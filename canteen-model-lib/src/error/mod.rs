use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid input file: {0}")]
    Input(String),
    #[error("No type was provided")]
    MissingType,
    #[error("Unsupported type provided: {0}")]
    UnsupportedType(String),
    #[error("A custom column definition is required when type is 'custom'")]
    MissingCustomDefinition,
    #[error("Invalid column definition: {0}")]
    DefinitionParse(String),
    #[error("Error loading canteen model template: {0}")]
    Template(String),
    #[error("Invalid list of records provided: {0}")]
    InvalidInput(String),
}

impl ProcessorError {
    /// Status a request boundary should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ProcessorError::Input(_)
            | ProcessorError::MissingType
            | ProcessorError::UnsupportedType(_)
            | ProcessorError::MissingCustomDefinition
            | ProcessorError::DefinitionParse(_)
            | ProcessorError::InvalidInput(_)
            | ProcessorError::Csv(_) => 400,
            ProcessorError::Io(_) | ProcessorError::Json(_) | ProcessorError::Template(_) => 500,
        }
    }
}

/// Failure of a single row. Never aborts a batch; the builder drops the row.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowTransformError {
    #[error("row could not be decoded: {0}")]
    Undecodable(String),
}

#[derive(Debug, Clone)]
pub struct ProcessingMessage {
    pub message: String,
    pub source: Option<String>,
}

impl ProcessingMessage {
    pub fn new(message: impl Into<String>, source: Option<String>) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }
}

/// Warnings collected while building one model, mostly dropped rows.
#[derive(Debug, Default, Clone)]
pub struct ProcessingState {
    warnings: Vec<ProcessingMessage>,
    dropped_rows: usize,
}

impl ProcessingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, message: impl Into<String>, source: Option<String>) {
        self.warnings.push(ProcessingMessage::new(message, source));
    }

    pub fn drop_row(&mut self, row_num: usize, error: &RowTransformError) {
        tracing::warn!("Skipping row {}: {}", row_num, error);
        self.dropped_rows += 1;
        self.add_warning(
            format!("[Row: {}], {}", row_num, error),
            Some("row_transform".to_string()),
        );
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn get_warnings(&self) -> &[ProcessingMessage] {
        &self.warnings
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn merge(&mut self, other: ProcessingState) {
        self.warnings.extend(other.warnings);
        self.dropped_rows += other.dropped_rows;
    }
}
