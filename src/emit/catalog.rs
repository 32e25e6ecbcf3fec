//! JSON catalog of every icon record.

use crate::layout::CompositeLayout;
use crate::parser::IconRecord;

/// Render `icons.json`: a pretty-printed array in sprite order.
pub fn render_catalog(layout: &CompositeLayout<'_>) -> serde_json::Result<String> {
    let icons: Vec<&IconRecord> = layout.tiles().map(|tile| tile.icon).collect();
    let mut json = serde_json::to_string_pretty(&icons)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::icon;
    use crate::catalog::{Catalog, IconGroup};
    use crate::layout::layout;
    use serde_json::Value;

    #[test]
    fn test_catalog_order_and_keys() {
        let catalogs = [
            Catalog::new(IconGroup::Mono, vec![icon("b", IconGroup::Mono, 24.0, 24.0)]).unwrap(),
            Catalog::new(IconGroup::Color, vec![icon("a", IconGroup::Color, 32.0, 16.0)]).unwrap(),
        ];

        let json = render_catalog(&layout(&catalogs)).unwrap();
        assert!(json.ends_with("]\n"));

        let value: Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0]["id"], "icon-b");
        assert_eq!(entries[1]["id"], "icon-color-a");
        assert_eq!(entries[1]["viewId"], "icon-color-a-view");
        assert_eq!(entries[1]["isColor"], true);
        assert_eq!(entries[1]["isRectangular"], true);
        assert_eq!(entries[1]["width"], 32.0);
        assert_eq!(entries[1]["sourcePath"], "a.svg");
        assert_eq!(entries[0]["bodyMarkupNoDefs"], r#"<path d="M0 0"/>"#);
        assert_eq!(entries[0]["defsMarkup"], "");
    }

    #[test]
    fn test_empty_catalog() {
        let json = render_catalog(&layout(&[])).unwrap();
        assert_eq!(json, "[]\n");
    }
}
