//! Read flow documents from text, files, or stdin.

use std::io::Read;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::Result;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Parse YAML text into a generic value.
///
/// Empty or whitespace-only input yields `Value::Null`, which builds into a
/// childless root.
pub fn parse_yaml(content: &str) -> Result<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Load and parse a document. `-` reads standard input.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    debug!(path = %path.display(), bytes = content.len(), "loaded flow document");
    parse_yaml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;

    #[test]
    fn empty_input_is_null() {
        assert_eq!(parse_yaml("").unwrap(), Value::Null);
        assert_eq!(parse_yaml("  \n\t").unwrap(), Value::Null);
    }

    #[test]
    fn mapping_order_is_preserved() {
        let v = parse_yaml("flows:\n  b: {}\n  a: {}\n").unwrap();
        let keys: Vec<&str> = v["flows"]
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(|k| k.as_str())
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn invalid_yaml_reports_parser_message() {
        let err = parse_yaml("flows: [unclosed").unwrap_err();
        assert!(matches!(err, FlowError::Parse(_)));
        assert!(err.to_string().starts_with("invalid YAML:"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flows.yaml");
        std::fs::write(&path, "flows:\n  a:\n    name: A\n").unwrap();
        let v = load_document(&path).unwrap();
        assert_eq!(v["flows"]["a"]["name"].as_str(), Some("A"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_document(Path::new("/nonexistent/flows.yaml")).unwrap_err();
        assert!(matches!(err, FlowError::Io(_)));
    }
}
