//! Minimal locators over the markup `alma-plot generate` emits.
//!
//! These are not a general HTML parser: they only recognise the exact element
//! shapes written by the document writer.

use std::ops::Range;

/// Byte range of an element's text content.
pub fn element_content(html: &str, open_prefix: &str, close: &str) -> Option<Range<usize>> {
    let start = html.find(open_prefix)?;
    let open_end = start + html[start..].find('>')? + 1;
    let content_end = open_end + html[open_end..].find(close)?;
    Some(open_end..content_end)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RootElement {
    /// Whole element, opening tag through closing tag.
    pub span: Range<usize>,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RootLookup {
    Found(RootElement),
    NoMarker,
    Malformed(String),
}

/// Locates the root element. Only the body is searched, so the marker text
/// may appear in the title or head without being mistaken for the root.
pub fn find_root(html: &str, marker_attr: &str) -> RootLookup {
    let body = html.find("<body").unwrap_or(0);
    let Some(marker) = html[body..].find(marker_attr).map(|pos| body + pos) else {
        return RootLookup::NoMarker;
    };
    let Some(start) = html[..marker].rfind("<div") else {
        return RootLookup::Malformed("marker is not on a <div> element".to_string());
    };
    let Some(tag_len) = html[start..].find('>') else {
        return RootLookup::Malformed("unterminated root tag".to_string());
    };
    let tag_end = start + tag_len + 1;
    let tag = &html[start..tag_end];
    let Some(id) = attr_value(tag, "id") else {
        return RootLookup::Malformed("root element has no id".to_string());
    };
    let end = if tag.ends_with("/>") {
        tag_end
    } else {
        match html[tag_end..].find("</div>") {
            Some(pos) => tag_end + pos + "</div>".len(),
            None => return RootLookup::Malformed("root element is not closed".to_string()),
        }
    };
    RootLookup::Found(RootElement {
        span: start..end,
        id: id.to_string(),
    })
}

/// Value of a double-quoted attribute inside a single tag.
pub fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}
