use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::definition::DefinitionSource;
use crate::error::ProcessorError;
use crate::template::TemplateSource;

fn default_allowed_extensions() -> Vec<String> {
    vec!["csv".to_string(), "txt".to_string()]
}

/// Where static resources live and which uploads are accepted.
///
/// Unset paths fall back to the resources compiled into the library.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProcessorConfig {
    #[serde(default)]
    pub definitions_dir: Option<PathBuf>,
    #[serde(default)]
    pub template_path: Option<PathBuf>,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            definitions_dir: None,
            template_path: None,
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl ProcessorConfig {
    /// Load a config file (comments allowed). Relative paths inside it are
    /// resolved against the file's directory.
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Result<Self, ProcessorError> {
        let path = path.into();
        tracing::info!("Loading config from {:?}", path);
        let file = std::fs::File::open(&path)?;
        let mut contents = String::new();
        json_comments::StripComments::new(file).read_to_string(&mut contents)?;
        let mut config: ProcessorConfig = serde_json::from_str(&contents)?;

        if let Some(base) = path.parent() {
            config.definitions_dir = config.definitions_dir.map(|p| base.join(p));
            config.template_path = config.template_path.map(|p| base.join(p));
        }
        Ok(config)
    }

    pub fn definition_source(&self) -> DefinitionSource {
        match &self.definitions_dir {
            Some(dir) => DefinitionSource::Directory(dir.clone()),
            None => DefinitionSource::Embedded,
        }
    }

    pub fn template_source(&self) -> TemplateSource {
        match &self.template_path {
            Some(path) => TemplateSource::File(path.clone()),
            None => TemplateSource::Embedded,
        }
    }

    /// An empty extension list accepts every file.
    pub fn is_allowed_file(&self, file_name: &str) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.allowed_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accepts_csv_and_txt_only() {
        let config = ProcessorConfig::default();
        assert!(config.is_allowed_file("menu.csv"));
        assert!(config.is_allowed_file("MENU.TXT"));
        assert!(!config.is_allowed_file("testfile.jpg"));
        assert!(!config.is_allowed_file("menu"));
    }

    #[test]
    fn loads_commented_config_relative_to_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canteen.jsonc");
        std::fs::write(
            &path,
            r#"{
                // preset tables maintained by the operations team
                "definitionsDir": "columndefinitions",
                "allowedExtensions": ["csv"]
            }"#,
        )
        .unwrap();

        let config = ProcessorConfig::from_file(&path).unwrap();
        assert_eq!(
            config.definitions_dir,
            Some(dir.path().join("columndefinitions"))
        );
        assert_eq!(config.template_path, None);
        assert!(!config.is_allowed_file("menu.txt"));
        assert!(matches!(
            config.definition_source(),
            DefinitionSource::Directory(_)
        ));
        assert!(matches!(config.template_source(), TemplateSource::Embedded));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canteen.json");
        std::fs::write(&path, r#"{ "templatePth": "x.json" }"#).unwrap();
        assert!(matches!(
            ProcessorConfig::from_file(&path),
            Err(ProcessorError::Json(_))
        ));
    }
}
