//! Rule document loading and rendering.
//!
//! Documents are read as YAML (which also accepts JSON) and written back as
//! YAML or pretty-printed JSON.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{SimplifyError, SimplifyResult};
use crate::rules::RuleDocument;

/// Output encoding for a rendered document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML, the format rule documents are usually written in.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Get the string representation of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected yaml or json)")),
        }
    }
}

impl RuleDocument {
    /// Parse a document from YAML or JSON text.
    ///
    /// A document with no content (blank, or only comments and `---`)
    /// parses as an empty rule list. A stream holding more than one YAML
    /// document is rejected rather than merged or truncated.
    ///
    /// # Example
    ///
    /// ```
    /// use rbac_simplify::rules::RuleDocument;
    ///
    /// let doc = RuleDocument::from_yaml_str("rules:\n- apiGroups: ['*']\n  resources: [pods]\n  verbs: [get]\n").unwrap();
    /// assert_eq!(doc.len(), 1);
    ///
    /// assert!(RuleDocument::from_yaml_str("# nothing here\n").unwrap().is_empty());
    /// ```
    pub fn from_yaml_str(input: &str) -> SimplifyResult<Self> {
        parse(input).map_err(|source| SimplifyError::Parse { path: None, source })
    }

    /// Read and parse the document at `path`.
    pub fn load(path: impl AsRef<Path>) -> SimplifyResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SimplifyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "read rule document");

        parse(&contents).map_err(|source| SimplifyError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Render the document as YAML.
    pub fn to_yaml_string(&self) -> SimplifyResult<String> {
        serde_yaml::to_string(self).map_err(|e| SimplifyError::Render {
            format: OutputFormat::Yaml,
            source: Box::new(e),
        })
    }

    /// Render the document as pretty-printed JSON, newline terminated.
    pub fn to_json_string(&self) -> SimplifyResult<String> {
        let mut out = serde_json::to_string_pretty(self).map_err(|e| SimplifyError::Render {
            format: OutputFormat::Json,
            source: Box::new(e),
        })?;
        out.push('\n');
        Ok(out)
    }

    /// Render the document in the given format.
    pub fn render(&self, format: OutputFormat) -> SimplifyResult<String> {
        match format {
            OutputFormat::Yaml => self.to_yaml_string(),
            OutputFormat::Json => self.to_json_string(),
        }
    }
}

fn parse(input: &str) -> Result<RuleDocument, serde_yaml::Error> {
    if is_blank_document(input) {
        return Ok(RuleDocument::default());
    }
    serde_yaml::from_str(input)
}

fn is_blank_document(input: &str) -> bool {
    input.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    #[test]
    fn test_parse_sample() {
        let doc = RuleDocument::from_yaml_str(
            r#"
rules:
  - apiGroups: ["*"]
    resources: ["pods"]
    verbs: ["get","list"]
  - apiGroups: [""]
    resources: ["pods","secrets"]
    verbs: ["list","watch"]
"#,
        )
        .unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.rules[0], Rule::new(&["*"], &["pods"], &["get", "list"]));
        assert_eq!(doc.rules[1].resources, vec!["pods", "secrets"]);
    }

    #[test]
    fn test_parse_json_input() {
        let doc = RuleDocument::from_yaml_str(
            r#"{"rules": [{"apiGroups": ["apps"], "resources": ["deployments"], "verbs": ["get"]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.rules[0], Rule::new(&["apps"], &["deployments"], &["get"]));
    }

    #[test]
    fn test_blank_documents() {
        assert!(RuleDocument::from_yaml_str("").unwrap().is_empty());
        assert!(RuleDocument::from_yaml_str("  \n# comment\n---\n").unwrap().is_empty());
        assert!(RuleDocument::from_yaml_str("rules: []\n").unwrap().is_empty());
        assert!(RuleDocument::from_yaml_str("rules:\n").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document() {
        let err = RuleDocument::from_yaml_str("rules: \"not a list\"\n").unwrap_err();
        assert!(matches!(err, SimplifyError::Parse { path: None, .. }));

        let err = RuleDocument::from_yaml_str("rules:\n  - apiGroups: {a: b}\n").unwrap_err();
        assert!(matches!(err, SimplifyError::Parse { .. }));
    }

    #[test]
    fn test_multi_document_stream_rejected() {
        let input = "rules: []\n---\nrules:\n- apiGroups: ['']\n  resources: [pods]\n  verbs: [get]\n";
        let err = RuleDocument::from_yaml_str(input).unwrap_err();
        assert!(matches!(err, SimplifyError::Parse { path: None, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = RuleDocument::load(&path).unwrap_err();
        match err {
            SimplifyError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "rules: [\n").unwrap();
        let err = RuleDocument::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_yaml_rendering() {
        let doc = RuleDocument::new(vec![Rule::new(&[""], &["pods"], &["get", "list"])]);
        let yaml = doc.to_yaml_string().unwrap();
        assert_eq!(
            yaml,
            "rules:\n- apiGroups:\n  - ''\n  resources:\n  - pods\n  verbs:\n  - get\n  - list\n"
        );
    }

    #[test]
    fn test_empty_rendering() {
        let doc = RuleDocument::default();
        assert_eq!(doc.to_yaml_string().unwrap(), "rules: []\n");
        assert_eq!(doc.to_json_string().unwrap(), "{\n  \"rules\": []\n}\n");
    }

    #[test]
    fn test_json_rendering_field_order() {
        let doc = RuleDocument::new(vec![Rule::new(&["apps"], &["deployments"], &[])]);
        let json = doc.render(OutputFormat::Json).unwrap();
        let groups = json.find("apiGroups").unwrap();
        let resources = json.find("resources").unwrap();
        let verbs = json.find("verbs").unwrap();
        assert!(groups < resources && resources < verbs);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("toml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "yaml");
    }
}
