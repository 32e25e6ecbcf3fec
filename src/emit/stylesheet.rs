//! SCSS outputs: `_icons-mixin.scss` with one mixin per icon, and
//! `_icons.scss` with one utility class per icon built on those mixins.

use std::fmt::Write;

use crate::layout::CompositeLayout;
use crate::parser::IconRecord;

use super::GENERATED_NOTICE;

const ICON_MIXIN: &str = "@mixin icon() {
  height: 1em;
  line-height: 1em;
  font-size: var(--o-icon-size, 1em);

  &::before {
    content: '';
    display: block;
    line-height: 1em;
    height: 1em;
    width: 1em;
  }
}";

/// Render `_icons-mixin.scss`. `sprite_url` is how the compiled
/// stylesheet reaches the sprite.
pub fn render_mixins(layout: &CompositeLayout<'_>, sprite_url: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "@use 'sass:math';");
    let _ = writeln!(out);
    let _ = writeln!(out, "/* {GENERATED_NOTICE} */");
    let _ = writeln!(out);
    let _ = writeln!(out, "{ICON_MIXIN}");

    for tile in layout.tiles() {
        let _ = writeln!(out);
        write_icon_mixin(&mut out, tile.icon, sprite_url);
    }

    out
}

fn write_icon_mixin(out: &mut String, icon: &IconRecord, sprite_url: &str) {
    let url = format!("{sprite_url}#{}", icon.view_id);

    let _ = writeln!(out, "@mixin {} {{", icon.id);
    if icon.is_color {
        let _ = writeln!(out, "  background-image: url('{url}');");
        let _ = writeln!(out, "  background-repeat: no-repeat;");
        let _ = writeln!(out, "  background-size: contain;");
    } else {
        let _ = writeln!(out, "  mask: url('{url}');");
        let _ = writeln!(out, "  mask-repeat: no-repeat;");
        let _ = writeln!(out, "  mask-size: contain;");
        let _ = writeln!(out, "  background-color: var(--o-icon-color, currentcolor);");
    }
    if icon.needs_width_override() {
        let _ = writeln!(out, "  width: math.div({}, {}) * 1em;", icon.width, icon.height);
    }
    let _ = writeln!(out, "}}");
}

/// Render `_icons.scss`.
pub fn render_styles(layout: &CompositeLayout<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "@use './icons-mixin' as *;");
    let _ = writeln!(out);
    let _ = writeln!(out, "/* {GENERATED_NOTICE} */");
    let _ = writeln!(out);
    let _ = writeln!(out, ".o-icon {{");
    let _ = writeln!(out, "  @include icon();");
    let _ = writeln!(out, "}}");

    for tile in layout.tiles() {
        let _ = writeln!(out);
        let _ = writeln!(out, ".o-icon--{}::before {{", tile.icon.id);
        let _ = writeln!(out, "  @include {}();", tile.icon.id);
        let _ = writeln!(out, "}}");
    }

    out
}
