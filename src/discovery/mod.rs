//! Project discovery.
//!
//! Resolves where icons are read from and where artifacts go, either from
//! defaults or from an `iconsprite.yaml` manifest in the project root.
//!
//! ```text
//! <root>/
//! ├── iconsprite.yaml        (optional)
//! ├── icons-source/          mono icons
//! │   └── color/             colour icons
//! └── dist/                  reset on every build
//!     ├── _icons-mixin.scss
//!     ├── _icons.scss
//!     └── icons/
//!         ├── icons.svg
//!         ├── icons.json
//!         └── index.html
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::catalog::IconGroup;
use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::{is_icon_file, scan_icon_dir, ICON_EXTENSION};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "iconsprite.yaml";

/// Subdirectory of the output root that holds the sprite, catalog and
/// preview.
pub const SPRITE_DIR: &str = "icons";

/// Destination paths of every generated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub sprite: PathBuf,
    pub catalog: PathBuf,
    pub preview: PathBuf,
    pub mixins: PathBuf,
    pub styles: PathBuf,
}

/// Resolved source and destination directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    pub root: PathBuf,
    pub mono_dir: PathBuf,
    pub color_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl SourceLayout {
    /// Resolve manifest paths against the project root.
    pub fn new(root: &Path, manifest: &Manifest) -> Self {
        let mono_dir = root.join(&manifest.source);
        let color_dir = mono_dir.join(&manifest.color_dir);

        Self {
            root: root.to_path_buf(),
            mono_dir,
            color_dir,
            output_dir: root.join(&manifest.output),
        }
    }

    /// Source directory of a group.
    pub fn group_dir(&self, group: IconGroup) -> &Path {
        match group {
            IconGroup::Mono => &self.mono_dir,
            IconGroup::Color => &self.color_dir,
        }
    }

    pub fn sprite_dir(&self) -> PathBuf {
        self.output_dir.join(SPRITE_DIR)
    }

    pub fn artifacts(&self) -> ArtifactPaths {
        let sprite_dir = self.sprite_dir();
        ArtifactPaths {
            sprite: sprite_dir.join("icons.svg"),
            catalog: sprite_dir.join("icons.json"),
            preview: sprite_dir.join("index.html"),
            mixins: self.output_dir.join("_icons-mixin.scss"),
            styles: self.output_dir.join("_icons.scss"),
        }
    }
}

/// A discovered project.
#[derive(Debug, Clone)]
pub struct Project {
    pub manifest: Manifest,

    /// Whether an iconsprite.yaml manifest was found.
    pub has_manifest: bool,

    pub layout: SourceLayout,
}

/// Discover the project rooted at `root`.
pub fn discover(root: impl AsRef<Path>) -> Result<Project> {
    let root = root.as_ref();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.is_file() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let layout = SourceLayout::new(root, &manifest);

    Ok(Project {
        manifest,
        has_manifest,
        layout,
    })
}
