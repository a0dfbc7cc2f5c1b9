use std::path::{Path, PathBuf};

/// One layer of configuration input, merged by priority.
///
/// Sources are merged in the order given; for the same key, a later source
/// overrides an earlier one. Programmatic crate defaults always sit below the
/// first explicit source.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Programmatic defaults, serialized into the bottom of the stack.
    Defaults(serde_json::Value),

    /// A YAML file. Optional files that do not exist are skipped; a required
    /// file that does not exist fails the load.
    File { path: PathBuf, required: bool },

    /// Environment variables under a prefix. `PREFIX_SECTION__KEY=value`
    /// maps to the nested key `section.key`.
    Env { prefix: String },

    /// An inline YAML document. Useful for embedding and tests.
    Yaml(String),
}

impl ConfigSource {
    /// An optional YAML file layer.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File {
            path: path.as_ref().to_path_buf(),
            required: false,
        }
    }

    /// A YAML file layer that must exist.
    pub fn file_required(path: impl AsRef<Path>) -> Self {
        Self::File {
            path: path.as_ref().to_path_buf(),
            required: true,
        }
    }

    /// An environment-variable layer under `prefix`.
    pub fn env(prefix: impl Into<String>) -> Self {
        Self::Env {
            prefix: prefix.into(),
        }
    }

    /// An inline YAML layer.
    pub fn yaml(document: impl Into<String>) -> Self {
        Self::Yaml(document.into())
    }

    /// A defaults layer from any serializable value.
    pub fn defaults(value: serde_json::Value) -> Self {
        Self::Defaults(value)
    }

    /// Human-readable description used in provenance and error output.
    pub fn describe(&self) -> String {
        match self {
            Self::Defaults(_) => "programmatic defaults".to_string(),
            Self::File { path, .. } => format!("file {}", path.display()),
            Self::Env { prefix } => format!("environment ({prefix}*)"),
            Self::Yaml(_) => "inline YAML".to_string(),
        }
    }
}
