//! Built-in optimizer.
//!
//! A single streaming pass over the markup with `quick-xml`. It does not
//! try to minify path data; it only performs the rewrites the sprite
//! needs and drops nodes that carry no rendering information.
//!
//! Elements and attributes outside the SVG, XLink and XML namespaces are
//! editor metadata (Inkscape, Sodipodi, Illustrator). They are dropped with
//! their `xmlns:*` declarations: the root element that declares them does
//! not survive into the sprite, so keeping them would leave unbound
//! prefixes behind.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use quick_xml::events::{BytesCData, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::{Captures, Regex};

use super::prefix::{prefix_class_list, prefix_css, prefix_reference, prefix_urls};
use super::{OptimizeError, OptimizeOptions, Optimizer, PaintMode};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

static ENTITY_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+([A-Za-z_][\w.:-]*)\s+(?:"([^"]*)"|'([^']*)')\s*>"#).unwrap()
});

static ENTITY_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&([A-Za-z_][\w.:-]*);").unwrap());

/// Namespacing and paint-stripping optimizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Optimizer for Normalizer {
    fn optimize(&self, markup: &str, options: &OptimizeOptions<'_>) -> Result<String, OptimizeError> {
        let mut reader = Reader::from_str(markup);
        let mut writer = Writer::new(Vec::with_capacity(markup.len()));
        let mut entities = Entities::default();
        let mut scopes = Scopes::default();
        let mut in_style = false;
        let mut after_ref = false;
        let mut pending_blank = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| OptimizeError::new(format!("XML error: {}", e)))?;

            // quick-xml reports entity references as their own events, so a
            // blank run is only ignorable when no reference borders it.
            let is_ref = matches!(event, Event::GeneralRef(_));
            if let Some(blank) = pending_blank.take() {
                if is_ref {
                    write(&mut writer, Event::Text(blank))?;
                }
            }

            match event {
                Event::Start(start) => {
                    let is_root = scopes.depth() == 0;
                    match rewrite_element(&start, is_root, &scopes, &entities, options)? {
                        Some((rewritten, bindings)) => {
                            in_style = start.local_name().as_ref() == b"style";
                            scopes.push(bindings);
                            write(&mut writer, Event::Start(rewritten))?;
                        }
                        None => {
                            reader
                                .read_to_end(start.name())
                                .map_err(|e| OptimizeError::new(format!("XML error: {}", e)))?;
                        }
                    }
                }
                Event::Empty(start) => {
                    let is_root = scopes.depth() == 0;
                    if let Some((rewritten, _)) = rewrite_element(&start, is_root, &scopes, &entities, options)? {
                        write(&mut writer, Event::Empty(rewritten))?;
                    }
                }
                Event::End(end) => {
                    scopes.pop();
                    in_style = false;
                    write(&mut writer, Event::End(end))?;
                }
                Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => {
                    if after_ref {
                        write(&mut writer, Event::Text(text))?;
                    } else {
                        pending_blank = Some(text);
                    }
                }
                Event::Text(text) => {
                    if in_style {
                        let css = utf8(&text)?;
                        let css = prefix_css(css, options.id_prefix);
                        write(&mut writer, Event::Text(BytesText::from_escaped(css)))?;
                    } else {
                        write(&mut writer, Event::Text(text))?;
                    }
                }
                Event::CData(data) if in_style => {
                    let css = prefix_css(utf8(&data)?, options.id_prefix);
                    write(&mut writer, Event::CData(BytesCData::new(css)))?;
                }
                Event::GeneralRef(reference) => match entities.get(utf8(&reference)?) {
                    Some(value) => write(&mut writer, Event::Text(BytesText::from_escaped(value.to_string())))?,
                    None => write(&mut writer, Event::GeneralRef(reference))?,
                },
                Event::DocType(doctype) => entities = Entities::from_doctype(utf8(&doctype)?),
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) => {}
                Event::Eof => break,
                other => write(&mut writer, other)?,
            }

            after_ref = is_ref;
        }

        String::from_utf8(writer.into_inner())
            .map_err(|e| OptimizeError::new(format!("Optimized markup is not UTF-8: {}", e)))
    }
}

/// Internal entities declared in the document type, as Illustrator emits
/// for its namespace URIs (`xmlns="&ns_svg;"`). The doctype itself is
/// dropped, so references to these are expanded during the rewrite.
#[derive(Debug, Default)]
struct Entities(HashMap<String, String>);

impl Entities {
    fn from_doctype(doctype: &str) -> Self {
        let entities = ENTITY_DECL
            .captures_iter(doctype)
            .map(|caps| {
                let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
                (caps[1].to_string(), value.to_string())
            })
            .collect();
        Self(entities)
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn expand<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.0.is_empty() {
            return Cow::Borrowed(value);
        }
        ENTITY_REF.replace_all(value, |caps: &Captures| match self.get(&caps[1]) {
            Some(expansion) => expansion.to_string(),
            None => caps[0].to_string(),
        })
    }
}

/// `(prefix, uri)` pairs declared on one element. An empty prefix is the
/// default namespace.
type Bindings = Vec<(String, String)>;

/// Namespace bindings of the open elements, innermost last.
#[derive(Debug, Default)]
struct Scopes(Vec<Bindings>);

impl Scopes {
    fn depth(&self) -> usize {
        self.0.len()
    }

    fn push(&mut self, bindings: Bindings) {
        self.0.push(bindings);
    }

    fn pop(&mut self) {
        self.0.pop();
    }

    /// Resolve `prefix`, looking at `own` (the element's declarations) first.
    fn resolve<'a>(&'a self, own: &'a [(String, String)], prefix: &str) -> Option<&'a str> {
        if prefix == "xml" {
            return Some(XML_NS);
        }
        own.iter()
            .chain(self.0.iter().rev().flatten())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }
}

fn is_svg_namespace(uri: &str) -> bool {
    matches!(uri, SVG_NS | XLINK_NS | XML_NS)
}

/// Split a qualified name into prefix and local part.
fn split_name(name: &[u8]) -> (Option<&[u8]>, &[u8]) {
    match name.iter().position(|&b| b == b':') {
        Some(i) => (Some(&name[..i]), &name[i + 1..]),
        None => (None, name),
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), OptimizeError> {
    writer
        .write_event(event)
        .map_err(|e| OptimizeError::new(format!("Failed to write markup: {}", e)))
}

fn utf8(bytes: &[u8]) -> Result<&str, OptimizeError> {
    std::str::from_utf8(bytes).map_err(|e| OptimizeError::new(format!("Invalid UTF-8: {}", e)))
}

/// Rebuild an element's attribute list with the namespacing rules applied.
///
/// Returns `None` for an element outside the SVG namespaces, which is
/// dropped with its content. Otherwise returns the rewritten element and
/// the namespace bindings it declares.
fn rewrite_element(
    start: &BytesStart<'_>,
    is_root: bool,
    scopes: &Scopes,
    entities: &Entities,
    options: &OptimizeOptions<'_>,
) -> Result<Option<(BytesStart<'static>, Bindings)>, OptimizeError> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| OptimizeError::new(format!("Bad attribute: {}", e)))?;
        let key = utf8(attr.key.as_ref())?.to_string();
        let value = entities.expand(utf8(&attr.value)?).into_owned();
        attributes.push((key, value));
    }

    let bindings: Bindings = attributes
        .iter()
        .filter_map(|(key, value)| match key.as_str() {
            "xmlns" => Some((String::new(), value.clone())),
            _ => key
                .strip_prefix("xmlns:")
                .map(|prefix| (prefix.to_string(), value.clone())),
        })
        .collect();

    let name = start.name();
    let (element_prefix, element) = split_name(name.as_ref());
    let element_prefix = element_prefix.map(utf8).transpose()?.unwrap_or("");
    // Unqualified markup without a default namespace is taken as SVG.
    let element_ns = scopes.resolve(&bindings, element_prefix).unwrap_or(if element_prefix.is_empty() {
        SVG_NS
    } else {
        ""
    });
    if !is_svg_namespace(element_ns) {
        return Ok(None);
    }

    let is_path = element == b"path";
    // Dimensions are redundant once the root has a viewBox.
    let has_view_box = is_root && attributes.iter().any(|(key, _)| key == "viewBox");

    let mut rewritten = start.to_owned();
    rewritten.clear_attributes();

    for (key, value) in &attributes {
        if key == "xmlns" || key.starts_with("xmlns:") {
            if !is_svg_namespace(value) {
                continue;
            }
        } else if let Some((prefix, _)) = key.split_once(':') {
            // Undeclared `xlink:` is bound by the sprite root.
            let uri = scopes.resolve(&bindings, prefix).or((prefix == "xlink").then_some(XLINK_NS));
            if !uri.is_some_and(is_svg_namespace) {
                continue;
            }
        }

        if has_view_box && (key == "width" || key == "height") {
            continue;
        }
        if options.mode == PaintMode::Mono && (key == "fill" || (is_path && key == "stroke")) {
            continue;
        }

        let local = key.rsplit(':').next().unwrap_or(key);
        let value = rewrite_value(key, local, value, options.id_prefix).replace('"', "&quot;");
        rewritten.push_attribute((key.as_bytes(), value.as_bytes()));
    }

    Ok(Some((rewritten, bindings)))
}

fn rewrite_value(key: &str, local: &str, value: &str, prefix: &str) -> String {
    match key {
        "id" => format!("{prefix}__{value}"),
        "class" => prefix_class_list(value, prefix),
        _ if local == "href" => match value.strip_prefix('#') {
            Some(target) => format!("#{}", prefix_reference(target, prefix)),
            None => value.to_string(),
        },
        _ => prefix_urls(value, prefix).into_owned(),
    }
}
