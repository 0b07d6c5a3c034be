// Datafile loaders

use crate::datafile::Datafile;
use crate::error::{AllocationError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Supported datafile encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Decodes datafiles without validating their contents
pub struct DatafileLoader {
    format: FileFormat,
}

impl DatafileLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                AllocationError::load(format!("No file extension: {}", path.display()))
            })?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| AllocationError::load(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load a datafile from disk
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Datafile> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AllocationError::load(format!("{}: {}", path.display(), e)))?;

        let datafile = self.parse(&content)?;

        debug!(
            path = %path.display(),
            experiments = datafile.experiments.len(),
            features = datafile.features.len(),
            "Datafile loaded"
        );

        Ok(datafile)
    }

    /// Decode a datafile from text
    pub fn parse(&self, content: &str) -> Result<Datafile> {
        let value = match self.format {
            FileFormat::Json => Self::parse_json(content)?,
            FileFormat::Toml => Self::parse_toml(content)?,
        };

        serde_json::from_value(value).map_err(|e| AllocationError::parse(e.to_string()))
    }

    fn parse_json(content: &str) -> Result<Value> {
        serde_json::from_str(content)
            .map_err(|e| AllocationError::parse(format!("JSON parse error: {}", e)))
    }

    // TOML goes through the JSON value tree so opaque payloads come out identical
    // to a JSON datafile with the same content.
    fn parse_toml(content: &str) -> Result<Value> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| AllocationError::parse(format!("TOML parse error: {}", e)))?;

        serde_json::to_value(toml_value)
            .map_err(|e| AllocationError::parse(format!("TOML to JSON conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const JSON: &str = r#"{
        "experiments": {
            "e1": {
                "id": "e1",
                "percentage": 50,
                "variations": [
                    { "id": "a", "percentage": 30 },
                    { "id": "b", "percentage": 20 }
                ],
                "audience": { "plan": "pro" }
            }
        },
        "features": {
            "f1": { "id": "f1", "percentage": 25.5, "data": { "limit": 3 } }
        }
    }"#;

    const TOML: &str = r#"
        [experiments.e1]
        id = "e1"
        percentage = 50
        audience = { plan = "pro" }

        [[experiments.e1.variations]]
        id = "a"
        percentage = 30

        [[experiments.e1.variations]]
        id = "b"
        percentage = 20

        [features.f1]
        id = "f1"
        percentage = 25.5
        data = { limit = 3 }
    "#;

    #[test]
    fn test_parse_json() {
        let datafile = DatafileLoader::new(FileFormat::Json).parse(JSON).unwrap();

        assert_eq!(datafile.experiments["e1"].variations.len(), 2);
        assert_eq!(datafile.experiments["e1"].audience, Some(json!({ "plan": "pro" })));
        assert_eq!(datafile.features["f1"].percentage, 25.5);
    }

    #[test]
    fn test_json_and_toml_agree() {
        let from_json = DatafileLoader::new(FileFormat::Json).parse(JSON).unwrap();
        let from_toml = DatafileLoader::new(FileFormat::Toml).parse(TOML).unwrap();

        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let datafile = DatafileLoader::new(FileFormat::Json)
            .parse(r#"{ "features": {} }"#)
            .unwrap();
        assert!(datafile.experiments.is_empty());

        let datafile = DatafileLoader::new(FileFormat::Toml).parse("").unwrap();
        assert!(datafile.experiments.is_empty());
        assert!(datafile.features.is_empty());
    }

    #[test]
    fn test_invalid_input_is_parse_error() {
        let err = DatafileLoader::new(FileFormat::Json).parse("{ not json").unwrap_err();
        assert!(matches!(err, AllocationError::Parse(_)));

        let err = DatafileLoader::new(FileFormat::Json)
            .parse(r#"{ "features": { "f": { "id": "f" } } }"#)
            .unwrap_err();
        assert!(matches!(err, AllocationError::Parse(_)));

        let err = DatafileLoader::new(FileFormat::Toml).parse("[[[").unwrap_err();
        assert!(matches!(err, AllocationError::Parse(_)));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("yaml"), None);

        assert_eq!(DatafileLoader::auto("datafile.json").unwrap().format(), FileFormat::Json);
        assert!(matches!(DatafileLoader::auto("datafile"), Err(AllocationError::Load(_))));
        assert!(matches!(DatafileLoader::auto("datafile.ini"), Err(AllocationError::Load(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DatafileLoader::new(FileFormat::Json)
            .load_file("/nonexistent/datafile.json")
            .unwrap_err();
        assert!(matches!(err, AllocationError::Load(_)));
    }
}
