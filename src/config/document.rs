//! Hierarchical document access by dotted path.
//!
//! The loader only needs to check for values and read strings and lists,
//! so it works against the narrow [`Document`] trait. [`TreeDocument`] is the
//! implementation used for real config files: TOML or YAML decoded into a
//! neutral [`Value`] tree. Scalars JSON can't hold (TOML datetimes,
//! infinities, NaN) are stored as their text form.

use serde_json::Value;
use std::path::Path;
use thiserror::Error;

use super::error::ConfigError;

/// Typed read failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("`{path}` must be {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Read access to a decoded configuration document.
///
/// A missing key and an explicit null are both reported as absent.
pub trait Document {
    /// Raw value at `path`, if any.
    fn get_raw_value(&self, path: &str) -> Option<&Value>;

    /// Returns `true` if a non-null value exists at `path`.
    fn has_value(&self, path: &str) -> bool {
        self.get_raw_value(path).is_some()
    }

    /// String at `path`. Absent values yield `Ok(None)`.
    fn get_string(&self, path: &str) -> Result<Option<String>, AccessError> {
        match self.get_raw_value(path) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(mismatch(path, "a string", other)),
        }
    }

    /// List at `path`. Absent values yield `Ok(None)`.
    fn get_raw_list(&self, path: &str) -> Result<Option<&[Value]>, AccessError> {
        match self.get_raw_value(path) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.as_slice())),
            Some(other) => Err(mismatch(path, "a list", other)),
        }
    }
}

fn mismatch(path: &str, expected: &'static str, found: &Value) -> AccessError {
    AccessError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: kind_of(found),
    }
}

/// Human-readable kind of a value, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
}

impl Format {
    /// File extensions tried during discovery, in order.
    pub const EXTENSIONS: [&'static str; 3] = ["yml", "yaml", "toml"];

    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yml" | "yaml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A configuration document backed by an in-memory value tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeDocument {
    root: Value,
}

impl TreeDocument {
    /// Wrap an already decoded tree.
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Decode a document from text.
    pub fn parse(text: &str, format: Format) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::new(Value::Null));
        }
        let root = match format {
            Format::Toml => from_toml(toml::Value::Table(text.parse::<toml::Table>()?)),
            Format::Yaml => from_yaml(serde_yaml::from_str(text)?, "")?,
        };
        Ok(Self::new(root))
    }
}

/// JSON has no infinities or NaN; keep those as their text form.
fn float(f: f64) -> Value {
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(f.to_string()))
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, from_toml(v)))
                .collect(),
        ),
    }
}

fn from_yaml(value: serde_yaml::Value, path: &str) -> Result<Value, ConfigError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(|item| from_yaml(item, path))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::new();
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Null => "null".to_string(),
                    other => {
                        let path = if path.is_empty() { "<root>" } else { path };
                        return Err(ConfigError::TypeMismatch {
                            path: path.to_string(),
                            expected: "a map with scalar keys",
                            found: yaml_kind(&other),
                        });
                    }
                };
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                object.insert(key, from_yaml(value, &child)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => from_yaml(tagged.value, path)?,
    })
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Sequence(_) => "a list key",
        serde_yaml::Value::Mapping(_) => "a map key",
        _ => "a tagged key",
    }
}

impl Document for TreeDocument {
    fn get_raw_value(&self, path: &str) -> Option<&Value> {
        let mut node = &self.root;
        for key in path.split('.') {
            node = node.as_object()?.get(key)?;
        }
        if node.is_null() { None } else { Some(node) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> TreeDocument {
        TreeDocument::new(json!({
            "server6": {
                "listen": "[::]:547",
                "plugins": [{"dns": "2001:4860:4860::8888"}],
                "port": 547,
            },
            "server4": null,
        }))
    }

    #[test]
    fn nested_lookup() {
        let doc = doc();
        assert!(doc.has_value("server6"));
        assert!(doc.has_value("server6.listen"));
        assert!(!doc.has_value("server6.missing"));
        assert!(!doc.has_value("server6.listen.deeper"));
    }

    #[test]
    fn null_reads_as_absent() {
        assert!(!doc().has_value("server4"));
        assert!(!doc().has_value("server4.listen"));
    }

    #[test]
    fn get_string_rejects_other_types() {
        let doc = doc();
        assert_eq!(
            doc.get_string("server6.listen").unwrap().as_deref(),
            Some("[::]:547")
        );
        assert_eq!(doc.get_string("server6.nope").unwrap(), None);
        let err = doc.get_string("server6.port").unwrap_err();
        assert_eq!(
            err,
            AccessError::TypeMismatch {
                path: "server6.port".to_string(),
                expected: "a string",
                found: "an integer",
            }
        );
    }

    #[test]
    fn get_raw_list() {
        let doc = doc();
        assert_eq!(doc.get_raw_list("server6.plugins").unwrap().unwrap().len(), 1);
        assert!(doc.get_raw_list("server4.plugins").unwrap().is_none());
        assert!(doc.get_raw_list("server6.listen").is_err());
    }

    #[test]
    fn parse_toml_and_yaml_agree() {
        let toml = r#"
[server4]
listen = "0.0.0.0:67"
plugins = [{ lease_time = "3600s" }, { router = "10.0.0.1" }]
"#;
        let yaml = r#"
server4:
  listen: "0.0.0.0:67"
  plugins:
    - lease_time: 3600s
    - router: 10.0.0.1
"#;
        let from_toml = TreeDocument::parse(toml, Format::Toml).unwrap();
        let from_yaml = TreeDocument::parse(yaml, Format::Yaml).unwrap();
        assert_eq!(from_toml, from_yaml);
    }

    #[test]
    fn blank_input_is_an_empty_document() {
        let doc = TreeDocument::parse("  \n", Format::Yaml).unwrap();
        assert!(!doc.has_value("server6"));
        let doc = TreeDocument::parse("", Format::Toml).unwrap();
        assert!(!doc.has_value("server4"));
    }

    #[test]
    fn toml_datetimes_read_as_strings() {
        let doc = TreeDocument::parse("expiry = 2024-01-01\nat = 1979-05-27T07:32:00Z\n", Format::Toml)
            .unwrap();
        assert_eq!(doc.get_string("expiry").unwrap().as_deref(), Some("2024-01-01"));
        assert_eq!(
            doc.get_string("at").unwrap().as_deref(),
            Some("1979-05-27T07:32:00Z")
        );
    }

    #[test]
    fn non_finite_floats_keep_their_text() {
        let doc = TreeDocument::parse("a: .inf\nb: -.inf\nc: .nan\n", Format::Yaml).unwrap();
        assert_eq!(doc.get_string("a").unwrap().as_deref(), Some("inf"));
        assert_eq!(doc.get_string("b").unwrap().as_deref(), Some("-inf"));
        assert_eq!(doc.get_string("c").unwrap().as_deref(), Some("NaN"));

        let doc = TreeDocument::parse("a = inf\nb = nan\n", Format::Toml).unwrap();
        assert_eq!(doc.get_string("a").unwrap().as_deref(), Some("inf"));
        assert_eq!(doc.get_string("b").unwrap().as_deref(), Some("NaN"));
    }

    #[test]
    fn finite_numbers_stay_numbers() {
        let doc = TreeDocument::parse("a: 3600\nb: 1.5\nc: 18446744073709551615\n", Format::Yaml)
            .unwrap();
        assert_eq!(doc.get_raw_value("a"), Some(&json!(3600)));
        assert_eq!(doc.get_raw_value("b"), Some(&json!(1.5)));
        assert_eq!(doc.get_raw_value("c"), Some(&json!(u64::MAX)));
    }

    #[test]
    fn yaml_scalar_keys_become_strings() {
        let doc = TreeDocument::parse("server4:\n  67: port\n  true: yes\n", Format::Yaml).unwrap();
        assert_eq!(doc.get_string("server4.67").unwrap().as_deref(), Some("port"));
        assert!(doc.has_value("server4.true"));
    }

    #[test]
    fn yaml_complex_keys_are_rejected() {
        let err = TreeDocument::parse("server4:\n  ? [a, b]\n  : x\n", Format::Yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeMismatch { ref path, found: "a list key", .. } if path == "server4"
        ));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = TreeDocument::parse("[server4", Format::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml(_)));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("config.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("config.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("/etc/x/config.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("config.json")), None);
        assert_eq!(Format::from_path(Path::new("config")), None);
    }
}
