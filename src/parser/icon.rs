//! Icon parsing.
//!
//! Turns one source file into an [`IconRecord`]: computes its name and
//! namespaced id, runs the optimizer, then reads geometry and body from the
//! optimized document.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, ParsingOptions};
use serde::Serialize;

use crate::catalog::IconGroup;
use crate::error::{Result, SpriteError};
use crate::optimizer::{OptimizeOptions, Optimizer};

use super::defs::split_defs;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_]+").unwrap());

/// One normalized icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRecord {
    /// Origin file, for diagnostics.
    pub source_path: PathBuf,
    pub name: String,
    pub is_color: bool,
    /// Namespaced id, unique across the whole sprite.
    pub id: String,
    /// Fragment identifier of the icon's `<view>` in the sprite.
    pub view_id: String,
    pub view_box: String,
    pub width: f64,
    pub height: f64,
    pub is_rectangular: bool,
    pub body_markup: String,
    pub body_markup_no_defs: String,
    pub defs_markup: String,
}

impl IconRecord {
    /// Width over height, used for width overrides of rectangular icons.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Whether stylesheets should widen this icon relative to its height.
    /// Flat icons (zero height) have no usable ratio and never do.
    pub fn needs_width_override(&self) -> bool {
        self.is_rectangular && self.height > 0.0
    }
}

/// Icon name from a file path: the stem, with runs of whitespace and
/// underscores collapsed to one hyphen, lower-cased.
pub fn icon_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    SEPARATORS.replace_all(&stem, "-").to_lowercase()
}

/// Namespaced id for an icon of `group` called `name`.
pub fn icon_id(group: IconGroup, name: &str) -> String {
    format!("{}-{}", group.id_prefix(), name)
}

/// Read and parse one icon file.
pub fn load_icon(path: &Path, group: IconGroup, optimizer: &dyn Optimizer) -> Result<IconRecord> {
    let source = fs::read_to_string(path).map_err(|e| SpriteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read icon: {}", e),
    })?;

    parse_icon(path, &source, group, optimizer)
}

/// Parse an icon from its raw markup.
///
/// A missing `viewBox` or negative or non-finite geometry is fatal: sprite geometry
/// depends on every icon, so skipping one would silently shift the rest.
pub fn parse_icon(
    path: &Path,
    source: &str,
    group: IconGroup,
    optimizer: &dyn Optimizer,
) -> Result<IconRecord> {
    let name = icon_name(path);
    let id = icon_id(group, &name);

    let optimized = optimizer
        .optimize(source, &OptimizeOptions::new(&id, group.mode()))
        .map_err(|e| SpriteError::Optimize {
            path: path.to_path_buf(),
            message: e.message,
        })?;

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(&optimized, options).map_err(|e| SpriteError::Markup {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let root = doc.root_element();

    let view_box = root
        .attribute("viewBox")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SpriteError::MissingViewBox {
            path: path.to_path_buf(),
        })?;
    let (width, height) = parse_dimensions(view_box, path)?;

    let split = split_defs(&optimized, root);

    Ok(IconRecord {
        source_path: path.to_path_buf(),
        view_id: format!("{id}-view"),
        name,
        is_color: group.is_color(),
        id,
        view_box: view_box.to_string(),
        width,
        height,
        is_rectangular: width != height,
        body_markup: split.body,
        body_markup_no_defs: split.body_without_defs,
        defs_markup: split.defs,
    })
}

/// Width and height from the third and fourth viewBox components.
fn parse_dimensions(view_box: &str, path: &Path) -> Result<(f64, f64)> {
    let invalid = |message: String| SpriteError::InvalidGeometry {
        path: path.to_path_buf(),
        view_box: view_box.to_string(),
        message,
    };

    let parts: Vec<&str> = view_box
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 4 {
        return Err(invalid(format!("expected 4 numbers, found {}", parts.len())));
    }

    let dimension = |label: &str, raw: &str| -> Result<f64> {
        let value: f64 = raw
            .parse()
            .map_err(|_| invalid(format!("{} '{}' is not a number", label, raw)))?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(format!("{} must be a non-negative finite number, got {}", label, raw)));
        }
        Ok(value)
    };

    Ok((dimension("width", parts[2])?, dimension("height", parts[3])?))
}
