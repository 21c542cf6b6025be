//! Markup element tree -> Screen Spec conversion.
//!
//! Leaf tags map through the shared tag table; generic containers classify
//! from their inline display signals; everything unrecognized degrades to a
//! Section or is dropped, so one bad element never aborts an import.

use crate::error::{MarkupError, MarkupResult};
use crate::scanner::{parse_markup, MarkupElement, MarkupNode};
use screenspec_common::ImportResponse;
use screenspec_schema::node::{Node, NodeKind, PropValue};
use screenspec_schema::registry::{
    heading_level, is_dropped_tag, is_generic_container_tag, tag_to_kind,
};
use screenspec_schema::style::{filter_style, parse_declarations};
use screenspec_schema::{IdGenerator, ScreenSpec, ROOT_ID};
use std::collections::BTreeMap;
use tracing::debug;

/// Route assigned to markup imports; the host renames it on save.
const IMPORT_ROUTE: &str = "/imported";

/// Import raw markup text. Input-shape failures (nothing tokenizable, no
/// element content) are errors; per-element gaps degrade.
pub fn import_markup(source: &str) -> MarkupResult<ScreenSpec> {
    let nodes = parse_markup(source)?;

    let mut ctx = ImportContext::new();
    let mut roots = Vec::new();
    for node in &nodes {
        if let MarkupNode::Element(el) = node {
            if let Some(converted) = convert_element(el, &mut ctx) {
                roots.push(converted);
            }
        }
    }

    let tree = match roots.len() {
        0 => return Err(MarkupError::NoContent),
        1 => {
            let mut root = roots.remove(0);
            root.id = ROOT_ID.to_string();
            root
        }
        _ => Node::new(ROOT_ID, NodeKind::Stack)
            .with_prop("direction", "column")
            .with_children(roots),
    };

    Ok(ScreenSpec::new(IMPORT_ROUTE, tree))
}

/// Boundary wrapper: never raises, returns `{ spec }` or `{ error }`.
pub fn import_markup_response(source: &str) -> ImportResponse {
    ImportResponse::from_result(import_markup(source))
}

struct ImportContext {
    ids: IdGenerator,
}

impl ImportContext {
    fn new() -> Self {
        Self {
            ids: IdGenerator::new("markup"),
        }
    }
}

fn convert_element(el: &MarkupElement, ctx: &mut ImportContext) -> Option<Node> {
    if is_dropped_tag(&el.tag) {
        debug!(tag = %el.tag, "dropping non-visual element");
        return None;
    }

    let raw_style = el
        .attr("style")
        .map(parse_declarations)
        .unwrap_or_default();

    let node = if let Some(kind) = tag_to_kind(&el.tag) {
        convert_leaf(el, kind, ctx)
    } else if is_generic_container_tag(&el.tag) {
        convert_container(el, &raw_style, ctx)
    } else if el.element_children().next().is_some() {
        // Unknown tag with children: keep the children under a Section.
        debug!(tag = %el.tag, "unknown tag, wrapping as Section");
        Node::new(ctx.ids.next_id(), NodeKind::Section)
            .with_children(convert_children(el, ctx))
    } else {
        debug!(tag = %el.tag, "dropping unknown childless tag");
        return None;
    };

    Some(node.with_style(filter_style(&raw_style)))
}

fn convert_leaf(el: &MarkupElement, kind: NodeKind, ctx: &mut ImportContext) -> Node {
    let id = ctx.ids.next_id();
    match kind {
        NodeKind::Heading => {
            let level = heading_level(&el.tag).unwrap_or(2);
            Node::new(id, kind)
                .with_prop("text", el.text_content())
                .with_prop("level", PropValue::Number(level as f64))
        }
        NodeKind::Text => Node::new(id, kind).with_prop("text", el.text_content()),
        NodeKind::Image => Node::new(id, kind)
            .with_prop("src", el.attr("src").unwrap_or_default())
            .with_prop("alt", el.attr("alt").unwrap_or_default()),
        NodeKind::Input => {
            let mut node = Node::new(id, kind);
            if let Some(placeholder) = el.attr("placeholder") {
                node = node.with_prop("placeholder", placeholder);
            }
            if let Some(name) = el.attr("name") {
                node = node.with_prop("name", name);
            }
            if el.tag == "input" {
                node = node.with_prop("inputType", el.attr("type").unwrap_or("text"));
            }
            node
        }
        NodeKind::Link => {
            let mut node = Node::new(id, kind).with_prop("text", el.text_content());
            if let Some(href) = el.attr("href") {
                node = node.with_prop("href", href);
            }
            node
        }
        NodeKind::Button => Node::new(id, kind).with_prop("label", el.text_content()),
        NodeKind::List => {
            let items: Vec<String> = el
                .element_children()
                .filter(|child| child.tag == "li")
                .map(|child| child.text_content())
                .collect();
            Node::new(id, kind)
                .with_prop("items", PropValue::StringList(items))
                .with_prop("ordered", el.tag == "ol")
        }
        NodeKind::Divider => Node::new(id, kind),
        NodeKind::Nav => {
            let children = convert_children(el, ctx);
            Node::new(id, kind).with_children(children)
        }
        // Container kinds never come out of the leaf tag table.
        _ => Node::new(id, kind),
    }
}

/// Effective layout role of a div-equivalent: grid signal -> Grid, flex
/// signal -> Stack with its declared direction, neither -> Section. Signals
/// come from inline style first, class hints second.
fn convert_container(
    el: &MarkupElement,
    raw_style: &BTreeMap<String, String>,
    ctx: &mut ImportContext,
) -> Node {
    let id = ctx.ids.next_id();
    let children = convert_children(el, ctx);

    let display = raw_style.get("display").map(String::as_str);
    let class = el.attr("class").unwrap_or_default();
    let classes: Vec<&str> = class.split_whitespace().collect();

    let is_grid = display == Some("grid") || classes.contains(&"grid");
    let is_flex = display == Some("flex") || classes.contains(&"flex");

    if is_grid {
        return Node::new(id, NodeKind::Grid).with_children(children);
    }

    if is_flex {
        let column = raw_style
            .get("flexDirection")
            .map(|dir| dir.starts_with("column"))
            .unwrap_or_else(|| classes.contains(&"flex-col") || classes.contains(&"flex-column"));
        let direction = if column { "column" } else { "row" };
        return Node::new(id, NodeKind::Stack)
            .with_prop("direction", direction)
            .with_children(children);
    }

    // A div-equivalent holding only text is content, not structure.
    if children.is_empty() {
        let text = el.text_content();
        if !text.is_empty() {
            return Node::new(id, NodeKind::Text).with_prop("text", text);
        }
    }

    Node::new(id, NodeKind::Section).with_children(children)
}

fn convert_children(el: &MarkupElement, ctx: &mut ImportContext) -> Vec<Node> {
    el.element_children()
        .filter_map(|child| convert_element(child, ctx))
        .collect()
}
