//! Element-expression parser.
//!
//! Parses the nested component-call expression a script returns: elements,
//! fragments, string-valued attributes and text children. Expression
//! containers are skipped with balanced-brace tracking; only string literals
//! inside them are kept. Nothing is ever evaluated.

use crate::error::{ScriptError, ScriptResult};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum JsxNode {
    Element(JsxElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<JsxNode>,
}

impl JsxElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Concatenated text of all descendant text children.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        collect_text(&self.children, &mut parts);
        parts.join(" ")
    }
}

fn collect_text(children: &[JsxNode], out: &mut Vec<String>) {
    for child in children {
        match child {
            JsxNode::Text(text) => out.push(text.clone()),
            JsxNode::Element(el) => collect_text(&el.children, out),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxRoot {
    Element(JsxElement),
    Fragment(Vec<JsxNode>),
}

/// Parse the element tree starting at the leading '<'. Trailing source after
/// the root element is ignored.
pub fn parse_jsx(source: &str) -> ScriptResult<JsxRoot> {
    let mut parser = JsxParser::new(source);
    parser.parse_root()
}

struct JsxParser<'src> {
    source: &'src str,
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> JsxParser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.source[self.pos..].starts_with(prefix)
    }

    fn expect(&mut self, ch: u8) -> ScriptResult<()> {
        if self.peek() == Some(ch) {
            self.pos += 1;
            Ok(())
        } else if self.peek().is_none() {
            Err(ScriptError::UnexpectedEof { pos: self.pos })
        } else {
            Err(ScriptError::invalid_syntax(
                self.pos,
                format!("expected '{}'", ch as char),
            ))
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

    fn parse_root(&mut self) -> ScriptResult<JsxRoot> {
        self.skip_whitespace();
        self.expect(b'<')?;

        if self.peek() == Some(b'>') {
            self.pos += 1;
            let children = self.parse_children()?;
            if !self.starts_with("</>") {
                return Err(ScriptError::invalid_syntax(self.pos, "unterminated fragment"));
            }
            self.pos += 3;
            return Ok(JsxRoot::Fragment(children));
        }

        let element = self.parse_element_after_angle()?;
        Ok(JsxRoot::Element(element))
    }

    /// Parse an element whose '<' has already been consumed.
    fn parse_element_after_angle(&mut self) -> ScriptResult<JsxElement> {
        let name = self.parse_name();
        if name.is_empty() {
            return Err(ScriptError::invalid_syntax(self.pos, "expected element name"));
        }

        let attributes = self.parse_attributes()?;

        if self.starts_with("/>") {
            self.pos += 2;
            return Ok(JsxElement {
                name,
                attributes,
                children: Vec::new(),
            });
        }

        self.expect(b'>')?;
        let children = self.parse_children()?;

        // Matching close tag is required; element expressions are strict.
        if !self.starts_with("</") {
            return Err(ScriptError::UnexpectedEof { pos: self.pos });
        }
        self.pos += 2;
        let close_name = self.parse_name();
        if close_name != name {
            return Err(ScriptError::invalid_syntax(
                self.pos,
                format!("mismatched close tag: expected '{name}', found '{close_name}'"),
            ));
        }
        self.skip_whitespace();
        self.expect(b'>')?;

        Ok(JsxElement {
            name,
            attributes,
            children,
        })
    }

    fn parse_children(&mut self) -> ScriptResult<Vec<JsxNode>> {
        let mut children = Vec::new();

        loop {
            match self.peek() {
                None => return Err(ScriptError::UnexpectedEof { pos: self.pos }),
                Some(b'<') if self.starts_with("</") => return Ok(children),
                Some(b'<') => {
                    self.pos += 1;
                    if self.peek() == Some(b'>') {
                        // Nested fragment: splice its children in place.
                        self.pos += 1;
                        let mut nested = self.parse_children()?;
                        if !self.starts_with("</>") {
                            return Err(ScriptError::invalid_syntax(
                                self.pos,
                                "unterminated fragment",
                            ));
                        }
                        self.pos += 3;
                        children.append(&mut nested);
                    } else {
                        children.push(JsxNode::Element(self.parse_element_after_angle()?));
                    }
                }
                Some(b'{') => {
                    if let Some(text) = self.parse_expression_container()? {
                        children.push(JsxNode::Text(text));
                    }
                }
                Some(_) => {
                    let text = self.parse_text();
                    if !text.is_empty() {
                        children.push(JsxNode::Text(text));
                    }
                }
            }
        }
    }

    fn parse_text(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == b'<' || ch == b'{' {
                break;
            }
            self.pos += 1;
        }
        self.source[start..self.pos]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn parse_name(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'$' || ch == b'.' || ch == b'-' {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.source[start..self.pos].to_string()
    }

    fn parse_attributes(&mut self) -> ScriptResult<BTreeMap<String, String>> {
        let mut attributes = BTreeMap::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ScriptError::UnexpectedEof { pos: self.pos }),
                Some(b'>') | Some(b'/') => return Ok(attributes),
                Some(b'{') => {
                    // Spread attribute: dynamic, skipped.
                    self.parse_expression_container()?;
                    continue;
                }
                _ => {}
            }

            let name = self.parse_name();
            if name.is_empty() {
                return Err(ScriptError::invalid_syntax(self.pos, "expected attribute name"));
            }

            self.skip_whitespace();
            if self.peek() != Some(b'=') {
                // Bare boolean attribute.
                attributes.insert(name, "true".to_string());
                continue;
            }
            self.pos += 1;
            self.skip_whitespace();

            match self.peek() {
                Some(b'"') | Some(b'\'') => {
                    let value = self.parse_string_literal()?;
                    attributes.insert(name, value);
                }
                Some(b'{') => {
                    // Only literal string containers carry over.
                    if let Some(value) = self.parse_expression_container()? {
                        attributes.insert(name, value);
                    }
                }
                _ => {
                    return Err(ScriptError::invalid_syntax(
                        self.pos,
                        "expected attribute value",
                    ));
                }
            }
        }
    }

    fn parse_string_literal(&mut self) -> ScriptResult<String> {
        let quote = self.peek().ok_or(ScriptError::UnexpectedEof { pos: self.pos })?;
        self.pos += 1;
        let start = self.pos;

        while let Some(ch) = self.peek() {
            if ch == b'\\' {
                self.pos += 2;
                continue;
            }
            if ch == quote {
                let raw = &self.source[start..self.pos];
                self.pos += 1;
                return Ok(unescape(raw));
            }
            self.pos += 1;
        }

        Err(ScriptError::UnexpectedEof { pos: start })
    }

    /// Skip a balanced `{ ... }` container. Returns the contained value only
    /// when the expression is a lone string literal; computed expressions
    /// yield None and are dropped, never evaluated.
    fn parse_expression_container(&mut self) -> ScriptResult<Option<String>> {
        self.expect(b'{')?;
        self.skip_whitespace();

        if matches!(self.peek(), Some(b'"') | Some(b'\'')) {
            let value = self.parse_string_literal()?;
            self.skip_whitespace();
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Some(value));
            }
            // String followed by more expression ("a" + x): dynamic.
            self.skip_balanced(1)?;
            return Ok(None);
        }

        self.skip_balanced(1)?;
        Ok(None)
    }

    /// Consume input until the brace depth returns to zero, honoring nested
    /// braces and string/template literals.
    fn skip_balanced(&mut self, mut depth: usize) -> ScriptResult<()> {
        while depth > 0 {
            match self.peek() {
                None => return Err(ScriptError::UnexpectedEof { pos: self.pos }),
                Some(b'{') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(b'}') => {
                    depth -= 1;
                    self.pos += 1;
                }
                Some(quote @ (b'"' | b'\'' | b'`')) => {
                    self.pos += 1;
                    while let Some(ch) = self.peek() {
                        if ch == b'\\' {
                            self.pos += 2;
                        } else if ch == quote {
                            self.pos += 1;
                            break;
                        } else {
                            self.pos += 1;
                        }
                    }
                }
                Some(_) => self.pos += 1,
            }
        }
        Ok(())
    }
}

fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_element(source: &str) -> JsxElement {
        match parse_jsx(source).unwrap() {
            JsxRoot::Element(el) => el,
            JsxRoot::Fragment(_) => panic!("expected element root"),
        }
    }

    #[test]
    fn test_parse_simple_element() {
        let el = parse_element(r#"<Button label="Save">Go</Button>"#);
        assert_eq!(el.name, "Button");
        assert_eq!(el.attr("label"), Some("Save"));
        assert_eq!(el.children, vec![JsxNode::Text("Go".into())]);
    }

    #[test]
    fn test_parse_self_closing_and_nesting() {
        let el = parse_element(r#"<div className="flex"><img src="/x.png"/><span>hi</span></div>"#);
        assert_eq!(el.children.len(), 2);
        match &el.children[0] {
            JsxNode::Element(img) => assert_eq!(img.attr("src"), Some("/x.png")),
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn test_expression_container_string_kept() {
        let el = parse_element(r#"<Button label={"Delete"}>{"Click me"}</Button>"#);
        assert_eq!(el.attr("label"), Some("Delete"));
        assert_eq!(el.children, vec![JsxNode::Text("Click me".into())]);
    }

    #[test]
    fn test_dynamic_expressions_dropped() {
        let el = parse_element(r#"<div onClick={() => fire({deep: true})} title={user.name}>{count}</div>"#);
        assert_eq!(el.attr("onClick"), None);
        assert_eq!(el.attr("title"), None);
        assert!(el.children.is_empty());
    }

    #[test]
    fn test_spread_attribute_skipped() {
        let el = parse_element(r#"<div {...props} id="a">x</div>"#);
        assert_eq!(el.attr("id"), Some("a"));
    }

    #[test]
    fn test_fragment_root() {
        let root = parse_jsx("<><p>a</p><p>b</p></>").unwrap();
        match root {
            JsxRoot::Fragment(children) => assert_eq!(children.len(), 2),
            JsxRoot::Element(_) => panic!("expected fragment"),
        }
    }

    #[test]
    fn test_mismatched_close_is_error() {
        assert!(parse_jsx("<div><p>x</div></p>").is_err());
    }

    #[test]
    fn test_unterminated_is_eof_error() {
        assert!(matches!(
            parse_jsx("<div><p>x"),
            Err(ScriptError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_text_whitespace_collapsed() {
        let el = parse_element("<p>\n   Hello   big\n   world\n</p>");
        assert_eq!(el.children, vec![JsxNode::Text("Hello big world".into())]);
    }
}
