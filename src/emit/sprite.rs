//! Sprite document.
//!
//! ```text
//! <!-- notice -->
//! <svg viewBox="0 0 W H">
//!   <defs>  shared definitions of every icon  </defs>
//!   <!-- group title -->
//!   <view id="<viewId>" viewBox="0 y w h" />   one per icon
//!   <svg y="y"><g id="<id>"> body </g></svg>   one per icon
//! </svg>
//! ```

use std::fmt::Write;

use crate::layout::{CompositeLayout, GroupLayout};

use super::GENERATED_NOTICE;

/// Render the sprite document.
pub fn render_sprite(layout: &CompositeLayout<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "<!-- {GENERATED_NOTICE} -->");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        r#"<svg version="1.1" viewBox="{}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">"#,
        layout.view_box()
    );

    let defs: Vec<&str> = layout
        .tiles()
        .map(|tile| tile.icon.defs_markup.as_str())
        .filter(|defs| !defs.is_empty())
        .collect();
    if !defs.is_empty() {
        let _ = writeln!(out, "  <defs>");
        for block in defs {
            let _ = writeln!(out, "    {block}");
        }
        let _ = writeln!(out, "  </defs>");
    }

    for group in layout.groups.iter().filter(|g| !g.is_empty()) {
        write_group(&mut out, group);
    }

    out.push_str("</svg>\n");
    out
}

fn write_group(out: &mut String, group: &GroupLayout<'_>) {
    let _ = writeln!(out);
    let _ = writeln!(out, "  <!-- {} -->", group.group.title());

    for tile in &group.tiles {
        let _ = writeln!(
            out,
            r#"  <view id="{}" viewBox="{}" />"#,
            tile.icon.view_id,
            tile.view_box()
        );
    }

    for tile in &group.tiles {
        let _ = writeln!(out);
        let _ = writeln!(out, r#"  <svg y="{}">"#, tile.y_offset);
        let _ = writeln!(out, r#"    <g id="{}">"#, tile.icon.id);
        if !tile.icon.body_markup_no_defs.is_empty() {
            let _ = writeln!(out, "      {}", tile.icon.body_markup_no_defs);
        }
        let _ = writeln!(out, "    </g>");
        let _ = writeln!(out, "  </svg>");
    }
}
