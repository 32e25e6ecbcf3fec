//! Project manifest (iconsprite.yaml) parsing.
//!
//! Every field is optional; a project without a manifest uses the
//! defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpriteError};

/// Project manifest loaded from iconsprite.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory holding monochrome icons.
    pub source: PathBuf,

    /// Name of the colour icon directory, resolved inside `source`.
    pub color_dir: PathBuf,

    /// Destination root. Removed and recreated on every build.
    pub output: PathBuf,

    /// URL of the sprite as seen from the generated stylesheets.
    pub sprite_url: String,

    /// File name patterns to skip (`*` matches any run of characters).
    pub excludes: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            source: PathBuf::from("icons-source"),
            color_dir: PathBuf::from("color"),
            output: PathBuf::from("dist"),
            sprite_url: "./icons/icons.svg".to_string(),
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from an iconsprite.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SpriteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SpriteError::Manifest {
            message: e.to_string(),
            help: Some("Check iconsprite.yaml syntax".to_string()),
        })
    }

    /// Check whether a source file should be skipped.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.excludes.iter().any(|pattern| glob_match(pattern, name))
    }
}

/// Match `name` against a pattern where `*` stands for any run of
/// characters.
fn glob_match(pattern: &str, name: &str) -> bool {
    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or_default();
    let Some(mut rest) = name.strip_prefix(first) else {
        return false;
    };

    let tail: Vec<&str> = parts.collect();
    let Some((last, middle)) = tail.split_last() else {
        // No wildcard at all.
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(*part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }

    rest.len() >= last.len() && rest.ends_with(*last)
}
