//! Catalog building.
//!
//! A [`Catalog`] is the ordered set of icons of one source group. Files of
//! a group are parsed in parallel, but the catalog always lists icons in
//! directory enumeration order: layout geometry, and therefore every
//! artifact, depends on it.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use rayon::prelude::*;

use crate::diagnostic::Diagnostic;
use crate::discovery::{scan_icon_dir, Manifest};
use crate::error::{Result, SpriteError};
use crate::optimizer::{Optimizer, PaintMode};
use crate::parser::{load_icon, IconRecord};

/// Source group an icon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconGroup {
    Mono,
    Color,
}

impl IconGroup {
    pub fn is_color(self) -> bool {
        self == IconGroup::Color
    }

    /// Optimizer mode for icons of this group.
    pub fn mode(self) -> PaintMode {
        match self {
            IconGroup::Mono => PaintMode::Mono,
            IconGroup::Color => PaintMode::Color,
        }
    }

    /// Leading part of every icon id in this group.
    pub fn id_prefix(self) -> &'static str {
        match self {
            IconGroup::Mono => "icon",
            IconGroup::Color => "icon-color",
        }
    }

    /// Human-readable group title.
    pub fn title(self) -> &'static str {
        match self {
            IconGroup::Mono => "Monochromatic icons",
            IconGroup::Color => "Colored icons",
        }
    }
}

impl fmt::Display for IconGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mode().name())
    }
}

/// Ordered icons of one group. No two share an id.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    group: IconGroup,
    icons: Vec<IconRecord>,
}

impl Catalog {
    /// Create a catalog, rejecting duplicate ids.
    pub fn new(group: IconGroup, icons: Vec<IconRecord>) -> Result<Self> {
        ensure_unique_ids(&icons)?;
        Ok(Self { group, icons })
    }

    pub fn empty(group: IconGroup) -> Self {
        Self {
            group,
            icons: Vec::new(),
        }
    }

    pub fn group(&self) -> IconGroup {
        self.group
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IconRecord> {
        self.icons.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a IconRecord;
    type IntoIter = std::slice::Iter<'a, IconRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.icons.iter()
    }
}

/// A built catalog plus the warnings raised while building it.
#[derive(Debug)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the catalog of one group directory.
///
/// A missing directory is not an error: the group is empty and a warning
/// is returned. Any icon failing to parse fails the whole group.
pub fn build_catalog(
    dir: &Path,
    group: IconGroup,
    manifest: &Manifest,
    optimizer: &dyn Optimizer,
) -> Result<CatalogBuild> {
    let Some(files) = scan_icon_dir(dir, manifest)? else {
        let warning = Diagnostic::warning(
            "iconsprite::source::missing-dir",
            format!("Path to {} source SVG files not found: {}", group, dir.display()),
        )
        .with_help("The group is treated as empty");

        return Ok(CatalogBuild {
            catalog: Catalog::empty(group),
            diagnostics: vec![warning],
        });
    };

    // Indexed parallel collect keeps enumeration order.
    let icons = files
        .par_iter()
        .map(|path| load_icon(path, group, optimizer))
        .collect::<Result<Vec<_>>>()?;

    Ok(CatalogBuild {
        catalog: Catalog::new(group, icons)?,
        diagnostics: vec![],
    })
}

/// Check that no two icons across `catalogs` share an id.
pub fn ensure_unique_across(catalogs: &[Catalog]) -> Result<()> {
    ensure_unique_ids(catalogs.iter().flat_map(Catalog::iter))
}

fn ensure_unique_ids<'a>(icons: impl IntoIterator<Item = &'a IconRecord>) -> Result<()> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();

    for icon in icons {
        if let Some(first) = seen.insert(&icon.id, &icon.source_path) {
            return Err(SpriteError::DuplicateId {
                id: icon.id.clone(),
                first: first.to_path_buf(),
                second: icon.source_path.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::optimizer::Normalizer;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// A minimal record for layout and emitter tests.
    pub(crate) fn icon(name: &str, group: IconGroup, width: f64, height: f64) -> IconRecord {
        let id = crate::parser::icon_id(group, name);
        IconRecord {
            source_path: PathBuf::from(format!("{name}.svg")),
            name: name.to_string(),
            is_color: group.is_color(),
            view_id: format!("{id}-view"),
            id,
            view_box: format!("0 0 {width} {height}"),
            width,
            height,
            is_rectangular: width != height,
            body_markup: r#"<path d="M0 0"/>"#.to_string(),
            body_markup_no_defs: r#"<path d="M0 0"/>"#.to_string(),
            defs_markup: String::new(),
        }
    }

    fn write_icon(dir: &Path, file: &str, width: u32, height: u32) {
        fs::write(
            dir.join(file),
            format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}"><path d="M0 0h{width}v{height}H0z"/></svg>"#
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_group_ids_and_modes() {
        assert_eq!(IconGroup::Mono.id_prefix(), "icon");
        assert_eq!(IconGroup::Color.id_prefix(), "icon-color");
        assert!(IconGroup::Color.is_color());
        assert_eq!(IconGroup::Mono.to_string(), "mono");
    }

    #[test]
    fn test_build_catalog_missing_directory_is_empty() {
        let build = build_catalog(
            Path::new("/nonexistent/icons/color"),
            IconGroup::Color,
            &Manifest::default(),
            &Normalizer,
        )
        .unwrap();

        assert!(build.catalog.is_empty());
        assert_eq!(build.catalog.group(), IconGroup::Color);
        assert_eq!(build.diagnostics.len(), 1);
        assert_eq!(build.diagnostics[0].code, "iconsprite::source::missing-dir");
    }

    #[test]
    fn test_build_catalog_preserves_enumeration_order() {
        let dir = tempdir().unwrap();
        let names = ["delta", "alpha", "charlie", "bravo", "echo", "foxtrot", "golf", "hotel"];
        for (i, name) in names.iter().enumerate() {
            write_icon(dir.path(), &format!("{name}.svg"), 10 + i as u32, 12);
        }

        let first = build_catalog(dir.path(), IconGroup::Mono, &Manifest::default(), &Normalizer).unwrap();
        let ids: Vec<&str> = first.catalog.iter().map(|i| i.id.as_str()).collect();

        let mut expected: Vec<String> = names.iter().map(|n| format!("icon-{n}")).collect();
        expected.sort();
        assert_eq!(ids, expected);
        assert!(first.diagnostics.is_empty());

        // Same order on every run.
        for _ in 0..5 {
            let again = build_catalog(dir.path(), IconGroup::Mono, &Manifest::default(), &Normalizer).unwrap();
            assert_eq!(again.catalog, first.catalog);
        }
    }

    #[test]
    fn test_build_catalog_fails_on_bad_icon() {
        let dir = tempdir().unwrap();
        write_icon(dir.path(), "good.svg", 24, 24);
        fs::write(dir.path().join("bad.svg"), r#"<svg><path d="M0 0"/></svg>"#).unwrap();

        let err = build_catalog(dir.path(), IconGroup::Mono, &Manifest::default(), &Normalizer).unwrap_err();

        match err {
            SpriteError::MissingViewBox { path } => assert_eq!(path, dir.path().join("bad.svg")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_build_catalog_rejects_colliding_names() {
        let dir = tempdir().unwrap();
        write_icon(dir.path(), "arrow left.svg", 24, 24);
        write_icon(dir.path(), "arrow_left.svg", 24, 24);

        let err = build_catalog(dir.path(), IconGroup::Mono, &Manifest::default(), &Normalizer).unwrap_err();

        assert!(matches!(err, SpriteError::DuplicateId { ref id, .. } if id == "icon-arrow-left"));
    }

    #[test]
    fn test_unique_across_groups() {
        let mono = Catalog::new(IconGroup::Mono, vec![icon("color-flag", IconGroup::Mono, 24.0, 24.0)]).unwrap();
        let color = Catalog::new(IconGroup::Color, vec![icon("flag", IconGroup::Color, 24.0, 24.0)]).unwrap();

        let err = ensure_unique_across(&[mono.clone(), color]).unwrap_err();
        assert!(matches!(err, SpriteError::DuplicateId { ref id, .. } if id == "icon-color-flag"));

        let other = Catalog::new(IconGroup::Color, vec![icon("other", IconGroup::Color, 24.0, 24.0)]).unwrap();
        assert!(ensure_unique_across(&[mono, other]).is_ok());
    }
}
