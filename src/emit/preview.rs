//! HTML preview page listing every icon of the sprite.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::catalog::IconGroup;
use crate::layout::{CompositeLayout, LayoutTile};

const STYLE: &str = "    :root {
      font-size: 62.5%;
    }
    body {
      font-size: 3.6rem;
      background: #f4f4f4;
    }
    h2 {
      display: block;
      margin: 1rem 0;
      width: 100%;
      font-size: 3rem;
    }
    section {
      display: flex;
      gap: 2rem;
      flex-wrap: wrap;
      align-items: center;
      padding: 20px;
    }
    .info {
      font-size: 1.6rem;
      color: #333;
      background: #fff7e3;
      padding: 1rem;
      border: 1px solid #f7d990;
      border-radius: 1rem;
      text-align: center;
    }
    .element {
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      padding: 1rem;
      border: 1px solid #ccc;
      border-radius: 1rem;
      background: #fff;
      color: #333;
    }
    .element:hover {
      color: #0073aa;
    }
    .element__name {
      font-family: monospace;
      font-size: 1.4rem;
      color: currentcolor;
      margin: 1.5rem 0 0.5rem;
    }
    .element__id {
      font-family: monospace;
      font-size: 0.9rem;
      color: #999;
      margin: 0.5rem 0 0;
    }
    .o-icon {
      display: flex;
      align-items: center;
      justify-content: center;
      height: 1em;
      line-height: 1em;
      width: 1em;
      font-size: var(--o-icon-size, 1em);
    }
    .o-icon--color {
      background-repeat: no-repeat;
      background-size: contain;
    }
    .o-icon--mono {
      mask-repeat: no-repeat;
      mask-size: contain;
      background-color: var(--o-icon-color, currentcolor);
    }";

/// Render `index.html`. The page references the sprite by relative URL,
/// so it has to sit next to `icons.svg` and be served over HTTP.
pub fn render_preview(layout: &CompositeLayout<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, r#"<html lang="en">"#);
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, r#"  <meta charset="UTF-8">"#);
    let _ = writeln!(out, r#"  <meta name="viewport" content="width=device-width, initial-scale=1.0">"#);
    let _ = writeln!(out, "  <title>Icons Preview</title>");
    let _ = writeln!(out, "  <style>");
    let _ = writeln!(out, "{STYLE}");
    for tile in layout.tiles().filter(|t| t.icon.needs_width_override()) {
        let _ = writeln!(
            out,
            "    .o-icon--{} {{ width: calc({} * 1em); }}",
            tile.icon.id,
            tile.icon.aspect_ratio()
        );
    }
    let _ = writeln!(out, "  </style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(
        out,
        r#"  <p class="info">To properly display this file, it shouldn't be opened directly in the browser, but it should be served.</p>"#
    );

    // Colour icons first.
    for group in [IconGroup::Color, IconGroup::Mono] {
        write_section(&mut out, layout, group);
    }

    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

fn write_section(out: &mut String, layout: &CompositeLayout<'_>, group: IconGroup) {
    let _ = writeln!(out, "  <section>");
    let _ = writeln!(out, "    <h2>{}</h2>", group.title());
    if let Some(tiles) = layout.group(group).map(|g| &g.tiles) {
        for tile in tiles {
            write_element(out, tile);
        }
    }
    let _ = writeln!(out, "  </section>");
}

fn write_element(out: &mut String, tile: &LayoutTile<'_>) {
    let icon = tile.icon;
    let id = escape(&icon.id);
    let view_id = escape(&icon.view_id);
    let usage = escape(icon.id.strip_prefix("icon-").unwrap_or(&icon.id));

    let (class, property) = if icon.is_color {
        ("o-icon--color", "background-image")
    } else {
        ("o-icon--mono", "mask-image")
    };

    let _ = writeln!(out, r#"    <div class="element">"#);
    let _ = writeln!(
        out,
        r#"      <i class="o-icon {class} o-icon--{id}" style="{property}: url(./icons.svg#{view_id});"></i>"#
    );
    let _ = writeln!(out, r#"      <p class="element__name" title="Usage name">{usage}</p>"#);
    let _ = writeln!(out, r#"      <p class="element__id">View ID: {view_id}</p>"#);
    let _ = writeln!(out, "    </div>");
}
