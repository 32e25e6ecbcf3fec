//! Build orchestration.
//!
//! A run resets the output area, builds the mono and colour catalogs in
//! parallel, lays both out in one coordinate space and writes every
//! artifact. Nothing is cached between runs. The first fatal error stops
//! the run.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::catalog::{build_catalog, ensure_unique_across, Catalog, IconGroup};
use crate::diagnostic::Diagnostic;
use crate::discovery::{Project, SourceLayout};
use crate::emit::write_artifacts;
use crate::error::{Result, SpriteError};
use crate::layout::layout;
use crate::optimizer::Optimizer;

/// Outcome of a build or check.
#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    pub mono_count: usize,
    pub color_count: usize,
    /// Sprite dimensions.
    pub width: f64,
    pub height: f64,
    /// Artifacts written, empty for a check or a run without icons.
    pub written: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildSummary {
    pub fn icon_count(&self) -> usize {
        self.mono_count + self.color_count
    }
}

/// Run the whole pipeline for `project`.
pub fn run(project: &Project, optimizer: &dyn Optimizer) -> Result<BuildSummary> {
    reset_output(&project.layout)?;

    let (catalogs, mut diagnostics) = build_catalogs(project, optimizer)?;
    let sprite = layout(&catalogs);

    let mut summary = summarize(&catalogs, sprite.width, sprite.height);
    if sprite.is_empty() {
        diagnostics.push(no_icons_warning(&project.layout));
        summary.diagnostics = diagnostics;
        return Ok(summary);
    }

    let paths = project.layout.artifacts();
    summary.written = write_artifacts(&sprite, &paths, &project.manifest.sprite_url)?;
    summary.diagnostics = diagnostics;
    Ok(summary)
}

/// Parse, namespace and lay out every icon without touching the output
/// area.
pub fn check(project: &Project, optimizer: &dyn Optimizer) -> Result<BuildSummary> {
    let (catalogs, mut diagnostics) = build_catalogs(project, optimizer)?;
    let sprite = layout(&catalogs);

    let mut summary = summarize(&catalogs, sprite.width, sprite.height);
    if sprite.is_empty() {
        diagnostics.push(no_icons_warning(&project.layout));
    }
    summary.diagnostics = diagnostics;
    Ok(summary)
}

/// Build both group catalogs, mono first.
pub fn build_catalogs(project: &Project, optimizer: &dyn Optimizer) -> Result<(Vec<Catalog>, Vec<Diagnostic>)> {
    let build = |group: IconGroup| {
        build_catalog(
            project.layout.group_dir(group),
            group,
            &project.manifest,
            optimizer,
        )
    };

    let (mono, color) = rayon::join(|| build(IconGroup::Mono), || build(IconGroup::Color));
    let (mono, color) = (mono?, color?);

    let diagnostics = mono.diagnostics.into_iter().chain(color.diagnostics).collect();
    let catalogs = vec![mono.catalog, color.catalog];
    ensure_unique_across(&catalogs)?;

    Ok((catalogs, diagnostics))
}

/// Remove the output directory if present and create it empty.
///
/// Refuses to touch the project root, a filesystem root, or any directory
/// containing icon sources.
pub fn reset_output(layout: &SourceLayout) -> Result<()> {
    let output = normalize(&layout.output_dir)?;
    let unsafe_output = |message: &str| SpriteError::UnsafeOutput {
        path: layout.output_dir.clone(),
        message: message.to_string(),
    };

    if output.parent().is_none() {
        return Err(unsafe_output("it is a filesystem root"));
    }
    if output == normalize(&layout.root)? {
        return Err(unsafe_output("it is the project root"));
    }
    for source in [&layout.mono_dir, &layout.color_dir] {
        if normalize(source)?.starts_with(&output) {
            return Err(unsafe_output("it contains the icon sources"));
        }
    }

    let io_error = |e: io::Error| SpriteError::Io {
        path: layout.output_dir.clone(),
        message: format!("Failed to reset output directory: {}", e),
    };

    match fs::remove_dir_all(&layout.output_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_error(e)),
    }
    fs::create_dir_all(&layout.output_dir).map_err(io_error)
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| SpriteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to resolve path: {}", e),
    })?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

fn summarize(catalogs: &[Catalog], width: f64, height: f64) -> BuildSummary {
    let count = |group: IconGroup| -> usize {
        catalogs
            .iter()
            .filter(|c| c.group() == group)
            .map(Catalog::len)
            .sum()
    };

    BuildSummary {
        mono_count: count(IconGroup::Mono),
        color_count: count(IconGroup::Color),
        width,
        height,
        ..Default::default()
    }
}

fn no_icons_warning(layout: &SourceLayout) -> Diagnostic {
    Diagnostic::warning(
        "iconsprite::source::empty",
        "No icons found, skipping icons files generation",
    )
    .with_help(format!("Add .svg files to {}", layout.mono_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{discover, MANIFEST_FILENAME};
    use crate::optimizer::Normalizer;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::{tempdir, TempDir};

    const NO_ICONS: &[(&str, &str)] = &[];

    fn project_with(mono: &[(&str, &str)], color: Option<&[(&str, &str)]>) -> TempDir {
        let dir = tempdir().unwrap();
        let mono_dir = dir.path().join("icons-source");
        fs::create_dir_all(&mono_dir).unwrap();
        for (name, svg) in mono {
            fs::write(mono_dir.join(name), svg).unwrap();
        }
        if let Some(color) = color {
            let color_dir = mono_dir.join("color");
            fs::create_dir_all(&color_dir).unwrap();
            for (name, svg) in color {
                fs::write(color_dir.join(name), svg).unwrap();
            }
        }
        dir
    }

    fn square(size: u32) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}"><path fill="red" d="M0 0h{size}v{size}H0z"/></svg>"#
        )
    }

    const GRADIENT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 32 16">
  <defs><linearGradient id="a"><stop offset="0" stop-color="#f00"/></linearGradient></defs>
  <rect fill="url(#a)" width="32" height="16"/>
  <use xlink:href="#icon-shared"/>
</svg>"##;

    fn build(dir: &TempDir) -> Result<BuildSummary> {
        run(&discover(dir.path()).unwrap(), &Normalizer)
    }

    fn read(dir: &TempDir, path: &str) -> String {
        fs::read_to_string(dir.path().join(path)).unwrap()
    }

    #[test]
    fn test_full_build_writes_all_artifacts() {
        let dir = project_with(&[("a.svg", square(24).as_str())], Some(&[("flag.svg", GRADIENT)]));

        let summary = build(&dir).unwrap();

        assert_eq!((summary.mono_count, summary.color_count), (1, 1));
        assert_eq!((summary.width, summary.height), (32.0, 24.0 + 10.0 + 16.0 + 10.0));
        assert!(summary.diagnostics.is_empty());
        for artifact in [
            "dist/icons/icons.svg",
            "dist/icons/icons.json",
            "dist/icons/index.html",
            "dist/_icons-mixin.scss",
            "dist/_icons.scss",
        ] {
            assert!(dir.path().join(artifact).is_file(), "{artifact} missing");
        }

        let sprite = read(&dir, "dist/icons/icons.svg");
        assert!(sprite.contains(r#"<view id="icon-a-view" viewBox="0 0 24 24" />"#));
        assert!(sprite.contains(r#"<view id="icon-color-flag-view" viewBox="0 34 32 16" />"#));
        // Mono paint is stripped, colour paint and namespaced references kept.
        assert!(!sprite.contains(r#"fill="red""#));
        assert!(sprite.contains(r##"fill="url(#icon-color-flag__a)""##));
        assert!(sprite.contains(r#"<linearGradient id="icon-color-flag__a">"#));
        assert!(sprite.contains(r##"xlink:href="#icon-shared""##));
    }

    #[test]
    fn test_empty_color_directory() {
        let dir = project_with(&[("a.svg", square(24).as_str())], Some(NO_ICONS));

        let summary = build(&dir).unwrap();

        assert_eq!((summary.mono_count, summary.color_count), (1, 0));
        assert!(summary.diagnostics.is_empty());

        let sprite = read(&dir, "dist/icons/icons.svg");
        assert_eq!(sprite.matches("<view ").count(), 1);
        assert!(sprite.contains(r#"<g id="icon-a">"#));
        assert!(!sprite.contains("icon-color-"));
    }

    #[test]
    fn test_missing_color_directory_warns() {
        let dir = project_with(&[("a.svg", square(24).as_str())], None);

        let summary = build(&dir).unwrap();

        assert_eq!(summary.color_count, 0);
        assert_eq!(summary.diagnostics.len(), 1);
        assert_eq!(summary.diagnostics[0].code, "iconsprite::source::missing-dir");
        assert!(dir.path().join("dist/icons/icons.svg").is_file());
    }

    #[test]
    fn test_missing_view_box_aborts() {
        let dir = project_with(
            &[
                ("a.svg", square(24).as_str()),
                ("broken.svg", r#"<svg width="24" height="24"><path d="M0 0"/></svg>"#),
            ],
            None,
        );

        let err = build(&dir).unwrap_err();

        match &err {
            SpriteError::MissingViewBox { path } => {
                assert_eq!(path, &dir.path().join("icons-source/broken.svg"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("broken.svg"));
        assert!(!dir.path().join("dist/icons/icons.svg").exists());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let icons: Vec<(String, String)> = (0..24)
            .map(|i| (format!("icon {:02}.svg", 23 - i), square(8 + i)))
            .collect();
        let icons: Vec<(&str, &str)> = icons.iter().map(|(n, s)| (n.as_str(), s.as_str())).collect();
        let dir = project_with(&icons, Some(&[("flag.svg", GRADIENT)]));

        build(&dir).unwrap();
        let first_json = read(&dir, "dist/icons/icons.json");
        let first_sprite = read(&dir, "dist/icons/icons.svg");

        build(&dir).unwrap();
        assert_eq!(read(&dir, "dist/icons/icons.json"), first_json);
        assert_eq!(read(&dir, "dist/icons/icons.svg"), first_sprite);

        let catalog: Value = serde_json::from_str(&first_json).unwrap();
        let ids: Vec<&str> = catalog
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids.first(), Some(&"icon-icon-00"));
        assert_eq!(ids.last(), Some(&"icon-color-flag"));
        let mut sorted = ids[..24].to_vec();
        sorted.sort();
        assert_eq!(&ids[..24], sorted.as_slice());
    }

    #[test]
    fn test_zero_icons_writes_nothing() {
        let dir = project_with(NO_ICONS, Some(NO_ICONS));
        let stale = dir.path().join("dist/icons/icons.svg");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        let summary = build(&dir).unwrap();

        assert_eq!(summary.icon_count(), 0);
        assert!(summary.written.is_empty());
        assert_eq!(summary.diagnostics.last().unwrap().code, "iconsprite::source::empty");
        assert!(!stale.exists());
        assert!(dir.path().join("dist").is_dir());
    }

    #[test]
    fn test_check_writes_nothing() {
        let dir = project_with(&[("a.svg", square(24).as_str())], Some(NO_ICONS));
        let stale = dir.path().join("dist/keep.txt");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "keep").unwrap();

        let summary = check(&discover(dir.path()).unwrap(), &Normalizer).unwrap();

        assert_eq!(summary.mono_count, 1);
        assert!(summary.written.is_empty());
        assert!(stale.exists());
        assert!(!dir.path().join("dist/icons").exists());
    }

    #[test]
    fn test_manifest_relocates_sources_and_output() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("svg")).unwrap();
        fs::write(dir.path().join("svg/home.svg"), square(16)).unwrap();
        fs::write(dir.path().join("svg/draft-home.svg"), "not svg").unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "source: svg\noutput: public\nsprite_url: /assets/icons.svg\nexcludes: [\"draft-*\"]\n",
        )
        .unwrap();

        let summary = run(&discover(dir.path()).unwrap(), &Normalizer).unwrap();

        assert_eq!(summary.mono_count, 1);
        let mixins = fs::read_to_string(dir.path().join("public/_icons-mixin.scss")).unwrap();
        assert!(mixins.contains("url('/assets/icons.svg#icon-home-view')"));
    }

    #[test]
    fn test_reset_refuses_unsafe_outputs() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        for output in [".", "icons-source", "..", "/"] {
            let project = discover(root).unwrap();
            let mut layout = project.layout;
            layout.output_dir = root.join(output);

            let err = reset_output(&layout).unwrap_err();
            assert!(matches!(err, SpriteError::UnsafeOutput { .. }), "{output}: {err:?}");
        }
        assert!(root.is_dir());
    }

    #[test]
    fn test_reset_creates_missing_output() {
        let dir = tempdir().unwrap();
        let layout = discover(dir.path()).unwrap().layout;

        reset_output(&layout).unwrap();
        reset_output(&layout).unwrap();

        assert!(layout.output_dir.is_dir());
    }

    #[test]
    fn test_duplicate_ids_abort() {
        let icon = square(8);
        let dir = project_with(&[("arrow left.svg", icon.as_str()), ("arrow_left.svg", icon.as_str())], None);

        let err = build(&dir).unwrap_err();

        assert!(matches!(err, SpriteError::DuplicateId { .. }));
    }

    const INKSCAPE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" sodipodi:docname="star.svg">
  <sodipodi:namedview id="namedview1" inkscape:zoom="8"/>
  <g inkscape:label="Layer 1" inkscape:groupmode="layer" id="layer1">
    <path d="M12 2l3 7h7z"/>
  </g>
</svg>"#;

    const ILLUSTRATOR: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!-- Generator: Adobe Illustrator 24.0.0, SVG Export Plug-In . SVG Version: 6.00 Build 0)  -->
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd" [
	<!ENTITY ns_ai "http://ns.adobe.com/AdobeIllustrator/10.0/">
	<!ENTITY ns_svg "http://www.w3.org/2000/svg">
	<!ENTITY ns_xlink "http://www.w3.org/1999/xlink">
]>
<svg version="1.1" xmlns:i="&ns_ai;" xmlns="&ns_svg;" xmlns:xlink="&ns_xlink;" viewBox="0 0 32 16" xml:space="preserve">
<g i:extraneous="self"><rect x="0" y="0" width="32" height="16"/></g>
</svg>"#;

    #[test]
    fn test_editor_exports_produce_well_formed_sprite() {
        let dir = project_with(&[("star.svg", INKSCAPE)], Some(&[("logo.svg", ILLUSTRATOR)]));

        let summary = build(&dir).unwrap();
        assert_eq!((summary.mono_count, summary.color_count), (1, 1));

        let sprite = read(&dir, "dist/icons/icons.svg");
        let doc = roxmltree::Document::parse(&sprite).unwrap();
        let views = doc.descendants().filter(|n| n.has_tag_name("view")).count();
        assert_eq!(views, 2);
        assert!(!sprite.contains("inkscape"));
        assert!(!sprite.contains("sodipodi"));
        assert!(!sprite.contains("i:extraneous"));
        assert!(sprite.contains(r#"<view id="icon-color-logo-view" viewBox="0 34 32 16" />"#));
    }

    #[test]
    fn test_flat_icon_is_laid_out() {
        let rule = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 0"><path d="M0 0h24"/></svg>"#;
        let dir = project_with(&[("a.svg", square(24).as_str()), ("rule.svg", rule)], None);

        let summary = build(&dir).unwrap();

        assert_eq!(summary.mono_count, 2);
        assert_eq!(summary.height, 24.0 + 10.0 + 0.0 + 10.0);
        let sprite = read(&dir, "dist/icons/icons.svg");
        assert!(sprite.contains(r#"<view id="icon-rule-view" viewBox="0 34 24 0" />"#));
        let mixins = read(&dir, "dist/_icons-mixin.scss");
        assert!(!mixins.contains("math.div(24, 0)"));
    }
}
