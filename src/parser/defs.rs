//! Shared definition extraction.
//!
//! Pulls every `<defs>` block out of an icon body so the sprite can hoist
//! them into one document-level definitions block. Blocks are found by
//! walking the parsed tree, at any depth, in document order. A `<defs>`
//! nested inside another one belongs to its outer block.

use std::ops::Range;

use roxmltree::{Document, Node};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// An element's content split into body and definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefsSplit {
    /// Full inner markup, trimmed.
    pub body: String,
    /// Inner markup with every `<defs>` block removed.
    pub body_without_defs: String,
    /// Trimmed contents of each `<defs>` block, newline-joined.
    pub defs: String,
}

/// Extract definition blocks from a markup fragment.
///
/// The fragment may have several top-level elements. Running this again on
/// `body_without_defs` finds nothing.
pub fn extract_defs(markup: &str) -> Result<DefsSplit, roxmltree::Error> {
    let wrapped = format!(r#"<svg xmlns="{SVG_NS}" xmlns:xlink="{XLINK_NS}">{markup}</svg>"#);
    let doc = Document::parse(&wrapped)?;
    Ok(split_defs(&wrapped, doc.root_element()))
}

/// Split the content of `parent`, which must belong to a document parsed
/// from `text`.
pub(crate) fn split_defs(text: &str, parent: Node<'_, '_>) -> DefsSplit {
    let range = inner_range(parent);
    let inner = &text[range.clone()];
    let body = inner.trim();
    let offset = range.start + (inner.len() - inner.trim_start().len());

    let blocks: Vec<Node> = parent
        .descendants()
        .skip(1)
        .filter(|node| is_defs(node) && !has_defs_ancestor(*node, parent))
        .collect();

    let mut defs = Vec::with_capacity(blocks.len());
    let mut without = String::with_capacity(body.len());
    let mut cursor = 0;

    for block in &blocks {
        let content = text[inner_range(*block)].trim();
        if !content.is_empty() {
            defs.push(content);
        }

        let block_range = block.range();
        without.push_str(&body[cursor..block_range.start - offset]);
        cursor = block_range.end - offset;
    }
    without.push_str(&body[cursor..]);

    DefsSplit {
        body: body.to_string(),
        body_without_defs: without.trim().to_string(),
        defs: defs.join("\n"),
    }
}

/// Byte range of an element's content, between its start and end tags.
pub(crate) fn inner_range(node: Node<'_, '_>) -> Range<usize> {
    match (node.first_child(), node.last_child()) {
        (Some(first), Some(last)) => first.range().start..last.range().end,
        _ => node.range().end..node.range().end,
    }
}

fn is_defs(node: &Node<'_, '_>) -> bool {
    node.is_element() && node.tag_name().name() == "defs"
}

fn has_defs_ancestor(node: Node<'_, '_>, stop: Node<'_, '_>) -> bool {
    node.ancestors()
        .skip(1)
        .take_while(|ancestor| *ancestor != stop)
        .any(|ancestor| is_defs(&ancestor))
}
