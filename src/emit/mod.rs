//! Artifact emitters.
//!
//! Every artifact is rendered from the same [`CompositeLayout`], so the
//! sprite, catalog and stylesheets always agree on ids, order and
//! geometry. Rendering is pure; [`write_artifacts`] does the I/O.

mod catalog;
mod preview;
mod sprite;
mod stylesheet;

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::ArtifactPaths;
use crate::error::{Result, SpriteError};
use crate::layout::CompositeLayout;

pub use catalog::render_catalog;
pub use preview::render_preview;
pub use sprite::render_sprite;
pub use stylesheet::{render_mixins, render_styles};

/// Banner placed at the top of generated files.
pub(crate) const GENERATED_NOTICE: &str = "This file is auto generated. Do not edit directly.";

/// Render and write every artifact. Returns the written paths in write
/// order.
///
/// Files are written independently: a failure leaves the earlier ones in
/// place.
pub fn write_artifacts(
    layout: &CompositeLayout<'_>,
    paths: &ArtifactPaths,
    sprite_url: &str,
) -> Result<Vec<PathBuf>> {
    write_artifact(&paths.sprite, &render_sprite(layout))?;
    write_artifact(&paths.mixins, &render_mixins(layout, sprite_url))?;
    write_artifact(&paths.styles, &render_styles(layout))?;

    let catalog = render_catalog(layout).map_err(|e| SpriteError::Write {
        path: paths.catalog.clone(),
        message: e.to_string(),
    })?;
    write_artifact(&paths.catalog, &catalog)?;

    write_artifact(&paths.preview, &render_preview(layout))?;

    Ok(vec![
        paths.sprite.clone(),
        paths.mixins.clone(),
        paths.styles.clone(),
        paths.catalog.clone(),
        paths.preview.clone(),
    ])
}

/// Write one artifact, creating its parent directory if needed.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    let failed = |e: std::io::Error| SpriteError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(failed)?;
    }
    fs::write(path, contents).map_err(failed)
}
