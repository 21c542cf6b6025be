//! Lenient markup scanner.
//!
//! Produces an element tree from raw markup text. Recovery-first: mismatched
//! close tags are skipped, unclosed elements end at end of input. Hard errors
//! are reserved for input that cannot be tokenized at all (unterminated
//! quoted attributes, truncated tags).

use crate::error::{MarkupError, MarkupResult};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element(MarkupElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkupElement {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<MarkupNode>,
}

impl MarkupElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn element_children(&self) -> impl Iterator<Item = &MarkupElement> {
        self.children.iter().filter_map(|child| match child {
            MarkupNode::Element(el) => Some(el),
            MarkupNode::Text(_) => None,
        })
    }

    /// Concatenated text of this element's descendants, whitespace-collapsed.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        collect_text(&self.children, &mut parts);
        parts.join(" ")
    }
}

fn collect_text(children: &[MarkupNode], out: &mut Vec<String>) {
    for child in children {
        match child {
            MarkupNode::Text(text) => {
                let trimmed = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !trimmed.is_empty() {
                    out.push(trimmed);
                }
            }
            MarkupNode::Element(el) => collect_text(&el.children, out),
        }
    }
}

/// Elements that never take children.
fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

/// Elements whose content is raw text up to the matching close tag.
fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

pub fn parse_markup(source: &str) -> MarkupResult<Vec<MarkupNode>> {
    let mut scanner = Scanner::new(source);
    let nodes = scanner.parse_nodes(None)?;
    Ok(nodes)
}

struct Scanner<'src> {
    source: &'src str,
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.source[self.pos..].starts_with(prefix)
    }

    /// Parse sibling nodes until end of input or the close tag of
    /// `enclosing` is reached (close tag left unconsumed for the caller).
    fn parse_nodes(&mut self, enclosing: Option<&str>) -> MarkupResult<Vec<MarkupNode>> {
        let mut nodes = Vec::new();

        while !self.is_at_end() {
            if self.starts_with("</") {
                let close_tag = self.peek_close_tag_name();
                match (enclosing, close_tag) {
                    (Some(open), Some(close)) if open == close => break,
                    (_, Some(_)) => {
                        // Stray or mismatched close tag: skip it and move on.
                        self.consume_close_tag()?;
                        continue;
                    }
                    (_, None) => {
                        return Err(MarkupError::UnexpectedEof { pos: self.pos });
                    }
                }
            }

            if self.starts_with("<!--") {
                self.skip_comment();
            } else if self.starts_with("<!") || self.starts_with("<?") {
                self.skip_until(b'>');
            } else if self.at_tag_open() {
                let element = self.parse_element()?;
                nodes.push(MarkupNode::Element(element));
            } else {
                let text = self.parse_text();
                if !text.trim().is_empty() {
                    nodes.push(MarkupNode::Text(text));
                }
            }
        }

        Ok(nodes)
    }

    fn parse_element(&mut self) -> MarkupResult<MarkupElement> {
        self.pos += 1; // '<'
        let tag = self.parse_name();
        if tag.is_empty() {
            return Err(MarkupError::invalid_syntax(self.pos, "expected tag name"));
        }

        let attributes = self.parse_attributes()?;

        let self_closing = self.starts_with("/>");
        if self_closing {
            self.pos += 2;
        } else if self.peek() == Some(b'>') {
            self.pos += 1;
        } else {
            return Err(MarkupError::UnexpectedEof { pos: self.pos });
        }

        let mut element = MarkupElement {
            tag: tag.clone(),
            attributes,
            children: Vec::new(),
        };

        if self_closing || is_void_tag(&tag) {
            return Ok(element);
        }

        if is_raw_text_tag(&tag) {
            self.skip_raw_text(&tag);
            return Ok(element);
        }

        element.children = self.parse_nodes(Some(&tag))?;

        // Consume our own close tag if present; EOF closes implicitly.
        if self.starts_with("</") {
            self.consume_close_tag()?;
        }

        Ok(element)
    }

    fn parse_attributes(&mut self) -> MarkupResult<BTreeMap<String, String>> {
        let mut attributes = BTreeMap::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(MarkupError::UnexpectedEof { pos: self.pos }),
                Some(b'>') | Some(b'/') => return Ok(attributes),
                _ => {}
            }

            let name = self.parse_name();
            if name.is_empty() {
                return Err(MarkupError::invalid_syntax(self.pos, "expected attribute name"));
            }

            self.skip_whitespace();
            let value = if self.peek() == Some(b'=') {
                self.pos += 1;
                self.skip_whitespace();
                self.parse_attribute_value()?
            } else {
                // Bare attribute (disabled, required).
                "true".to_string()
            };

            attributes.insert(name.to_ascii_lowercase(), value);
        }
    }

    fn parse_attribute_value(&mut self) -> MarkupResult<String> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while let Some(ch) = self.peek() {
                    if ch == quote {
                        let value = &self.source[start..self.pos];
                        self.pos += 1;
                        return Ok(decode_entities(value));
                    }
                    self.pos += 1;
                }
                Err(MarkupError::invalid_syntax(start, "unterminated attribute value"))
            }
            Some(_) => {
                let start = self.pos;
                while let Some(ch) = self.peek() {
                    if ch.is_ascii_whitespace() || ch == b'>' || ch == b'/' {
                        break;
                    }
                    self.pos += 1;
                }
                Ok(self.source[start..self.pos].to_string())
            }
            None => Err(MarkupError::UnexpectedEof { pos: self.pos }),
        }
    }

    /// A '<' that actually opens markup (tag, close tag, comment, doctype).
    /// Anything else, like a stray "a < b", reads as text.
    fn at_tag_open(&self) -> bool {
        if self.peek() != Some(b'<') {
            return false;
        }
        matches!(
            self.bytes.get(self.pos + 1),
            Some(ch) if ch.is_ascii_alphabetic() || *ch == b'/' || *ch == b'!' || *ch == b'?'
        )
    }

    fn parse_text(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == b'<' && self.at_tag_open() {
                break;
            }
            self.pos += 1;
        }
        decode_entities(&self.source[start..self.pos])
    }

    fn parse_name(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'-' || ch == b'_' || ch == b':' {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.source[start..self.pos].to_ascii_lowercase()
    }

    /// Tag name of a `</...>` sequence without consuming it.
    fn peek_close_tag_name(&self) -> Option<String> {
        let rest = &self.source[self.pos + 2..];
        let end = rest.find('>')?;
        Some(rest[..end].trim().to_ascii_lowercase())
    }

    fn consume_close_tag(&mut self) -> MarkupResult<()> {
        match self.source[self.pos..].find('>') {
            Some(offset) => {
                self.pos += offset + 1;
                Ok(())
            }
            None => Err(MarkupError::UnexpectedEof { pos: self.pos }),
        }
    }

    fn skip_comment(&mut self) {
        match self.source[self.pos + 4..].find("-->") {
            Some(offset) => self.pos += 4 + offset + 3,
            None => self.pos = self.bytes.len(),
        }
    }

    fn skip_raw_text(&mut self, tag: &str) {
        let close = format!("</{tag}");
        match self.source[self.pos..].to_ascii_lowercase().find(&close) {
            Some(offset) => {
                self.pos += offset;
                // Drop the close tag itself.
                let _ = self.consume_close_tag();
            }
            None => self.pos = self.bytes.len(),
        }
    }

    fn skip_until(&mut self, target: u8) {
        while let Some(ch) = self.peek() {
            self.pos += 1;
            if ch == target {
                break;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    // `&amp;` decodes last so it cannot fabricate new entities.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_element(nodes: &[MarkupNode]) -> &MarkupElement {
        match &nodes[0] {
            MarkupNode::Element(el) => el,
            MarkupNode::Text(_) => panic!("expected element"),
        }
    }

    #[test]
    fn test_parse_nested_elements() {
        let nodes = parse_markup("<div><h1>Hi</h1><p>There</p></div>").unwrap();
        assert_eq!(nodes.len(), 1);
        let div = first_element(&nodes);
        assert_eq!(div.tag, "div");
        assert_eq!(div.element_children().count(), 2);
    }

    #[test]
    fn test_parse_attributes_and_entities() {
        let nodes =
            parse_markup(r#"<img src="/a.png" alt="Tom &amp; Jerry" hidden>"#).unwrap();
        let img = first_element(&nodes);
        assert_eq!(img.attr("src"), Some("/a.png"));
        assert_eq!(img.attr("alt"), Some("Tom & Jerry"));
        assert_eq!(img.attr("hidden"), Some("true"));
    }

    #[test]
    fn test_void_and_self_closing() {
        let nodes = parse_markup("<div><br><hr/><input type=text></div>").unwrap();
        let div = first_element(&nodes);
        assert_eq!(div.element_children().count(), 3);
    }

    #[test]
    fn test_comments_and_doctype_skipped() {
        let nodes = parse_markup("<!DOCTYPE html><!-- hello --><p>text</p>").unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(first_element(&nodes).tag, "p");
    }

    #[test]
    fn test_raw_text_script_has_no_children() {
        let nodes = parse_markup("<script>if (a < b) { run(); }</script><p>ok</p>").unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(first_element(&nodes).children.is_empty());
    }

    #[test]
    fn test_mismatched_close_tag_skipped() {
        let nodes = parse_markup("<div><p>one</span></p></div>").unwrap();
        let div = first_element(&nodes);
        assert_eq!(div.element_children().count(), 1);
    }

    #[test]
    fn test_unclosed_element_ends_at_eof() {
        let nodes = parse_markup("<div><p>dangling").unwrap();
        let div = first_element(&nodes);
        assert_eq!(div.element_children().count(), 1);
    }

    #[test]
    fn test_unterminated_attribute_is_error() {
        assert!(parse_markup(r#"<div class="x"#).is_err());
    }

    #[test]
    fn test_text_content_collapses_whitespace() {
        let nodes = parse_markup("<p>  Hello\n   <b>big</b> world </p>").unwrap();
        assert_eq!(first_element(&nodes).text_content(), "Hello big world");
    }
}
