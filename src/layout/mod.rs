//! Sprite layout.
//!
//! Stacks icons vertically in one shared coordinate space. Every icon
//! gets its own tile, separated from the next by [`GAP`] units, and
//! groups are laid out one after another with the cursor carried over,
//! so no two tiles overlap regardless of which group they came from.

use crate::catalog::{Catalog, IconGroup};
use crate::parser::IconRecord;

/// Vertical space left below every tile.
pub const GAP: f64 = 10.0;

/// One icon placed in the sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTile<'a> {
    pub icon: &'a IconRecord,
    pub y_offset: f64,
}

impl LayoutTile<'_> {
    /// The tile's box within the sprite: `"0 <y> <width> <height>"`.
    pub fn view_box(&self) -> String {
        format!("0 {} {} {}", self.y_offset, self.icon.width, self.icon.height)
    }
}

/// Tiles of one catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout<'a> {
    pub group: IconGroup,
    pub tiles: Vec<LayoutTile<'a>>,
    /// Widest icon of the group, 0 when empty.
    pub max_width: f64,
    /// Sum of `height + GAP` over the group.
    pub total_height: f64,
    /// Where the next group starts.
    pub cursor: f64,
}

impl GroupLayout<'_> {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Lay out one catalog starting at `start`.
pub fn layout_group(catalog: &Catalog, start: f64) -> GroupLayout<'_> {
    let mut tiles = Vec::with_capacity(catalog.len());
    let mut cursor = start;
    let mut max_width: f64 = 0.0;
    let mut total_height = 0.0;

    for icon in catalog {
        tiles.push(LayoutTile {
            icon,
            y_offset: cursor,
        });

        cursor += icon.height + GAP;
        total_height += icon.height + GAP;
        max_width = max_width.max(icon.width);
    }

    GroupLayout {
        group: catalog.group(),
        tiles,
        max_width,
        total_height,
        cursor,
    }
}

/// All groups laid out in one coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLayout<'a> {
    pub groups: Vec<GroupLayout<'a>>,
    /// Widest icon across all groups.
    pub width: f64,
    /// Sum of every group's total height.
    pub height: f64,
}

impl<'a> CompositeLayout<'a> {
    /// The sprite's own viewBox.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    /// Every tile, in sprite order.
    pub fn tiles(&self) -> impl Iterator<Item = &LayoutTile<'a>> {
        self.groups.iter().flat_map(|g| g.tiles.iter())
    }

    /// Layout of one group, if it was part of the input.
    pub fn group(&self, group: IconGroup) -> Option<&GroupLayout<'a>> {
        self.groups.iter().find(|g| g.group == group)
    }

    pub fn icon_count(&self) -> usize {
        self.groups.iter().map(|g| g.tiles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.icon_count() == 0
    }
}

/// Lay out `groups` in order, each continuing from the previous group's
/// cursor.
pub fn layout(groups: &[Catalog]) -> CompositeLayout<'_> {
    let mut cursor = 0.0;
    let mut width: f64 = 0.0;
    let mut height = 0.0;

    let groups = groups
        .iter()
        .map(|catalog| {
            let group = layout_group(catalog, cursor);
            cursor = group.cursor;
            width = width.max(group.max_width);
            height += group.total_height;
            group
        })
        .collect();

    CompositeLayout {
        groups,
        width,
        height,
    }
}
