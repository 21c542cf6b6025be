//! Component-call tree -> Screen Spec conversion.
//!
//! Capitalized names resolve against a fixed well-known component set;
//! lowercase names reuse the shared leaf tag table. Generic markup elements
//! classify from the class-name attribute (flex / flex-col / grid, plus an
//! explicit gap step). Unrecognized components degrade to a Section.

use crate::error::{ScriptError, ScriptResult};
use crate::jsx::{parse_jsx, JsxElement, JsxNode, JsxRoot};
use crate::scan::find_return_tree;
use screenspec_common::ImportResponse;
use screenspec_schema::node::{Node, NodeKind, PropValue};
use screenspec_schema::registry::{is_dropped_tag, is_generic_container_tag, tag_to_kind};
use screenspec_schema::style::{filter_style, parse_declarations};
use screenspec_schema::{IdGenerator, ScreenSpec, ROOT_ID};
use tracing::debug;

const IMPORT_ROUTE: &str = "/imported";

/// Import component-script source text.
pub fn import_script(source: &str) -> ScriptResult<ScreenSpec> {
    let start = find_return_tree(source)?;
    let root = parse_jsx(&source[start..])?;

    let mut ctx = ImportContext::new();
    let tree = match root {
        JsxRoot::Element(el) => {
            let mut node = convert_node(&JsxNode::Element(el), &mut ctx)
                .ok_or(ScriptError::EmptyTree)?;
            node.id = ROOT_ID.to_string();
            node
        }
        JsxRoot::Fragment(children) => {
            let converted: Vec<Node> = children
                .iter()
                .filter_map(|child| convert_node(child, &mut ctx))
                .collect();
            if converted.is_empty() {
                return Err(ScriptError::EmptyTree);
            }
            Node::new(ROOT_ID, NodeKind::Stack)
                .with_prop("direction", "column")
                .with_children(converted)
        }
    };

    Ok(ScreenSpec::new(IMPORT_ROUTE, tree))
}

/// Boundary wrapper: never raises, returns `{ spec }` or `{ error }`.
pub fn import_script_response(source: &str) -> ImportResponse {
    ImportResponse::from_result(import_script(source))
}

struct ImportContext {
    ids: IdGenerator,
}

impl ImportContext {
    fn new() -> Self {
        Self {
            ids: IdGenerator::new("script"),
        }
    }
}

/// Fixed set of well-known component names mapped straight to built-ins.
fn well_known_component(name: &str) -> Option<NodeKind> {
    match name {
        "Button" => Some(NodeKind::Button),
        "Card" => Some(NodeKind::Card),
        "Divider" => Some(NodeKind::Divider),
        "Input" => Some(NodeKind::Input),
        "Image" | "Img" => Some(NodeKind::Image),
        "Text" => Some(NodeKind::Text),
        "Heading" => Some(NodeKind::Heading),
        "Stack" => Some(NodeKind::Stack),
        "Grid" => Some(NodeKind::Grid),
        "Section" | "Container" => Some(NodeKind::Section),
        "Nav" | "Navbar" => Some(NodeKind::Nav),
        "Link" => Some(NodeKind::Link),
        "List" => Some(NodeKind::List),
        _ => None,
    }
}

fn convert_node(node: &JsxNode, ctx: &mut ImportContext) -> Option<Node> {
    match node {
        JsxNode::Text(text) => {
            Some(Node::new(ctx.ids.next_id(), NodeKind::Text).with_prop("text", text.as_str()))
        }
        JsxNode::Element(el) => convert_element(el, ctx),
    }
}

fn convert_element(el: &JsxElement, ctx: &mut ImportContext) -> Option<Node> {
    // Member expressions (UI.Button) resolve by their final segment.
    let local = el.name.rsplit('.').next().unwrap_or(&el.name);

    let raw_style = el
        .attr("style")
        .map(parse_declarations)
        .unwrap_or_default();

    let node = if local.starts_with(|ch: char| ch.is_ascii_uppercase()) {
        match well_known_component(local) {
            Some(kind) => convert_known(el, kind, ctx),
            None => {
                debug!(name = %el.name, "unknown component, degrading to Section");
                Node::new(ctx.ids.next_id(), NodeKind::Section)
                    .with_children(convert_children(el, ctx))
            }
        }
    } else if is_dropped_tag(local) {
        debug!(tag = %local, "dropping non-visual element");
        return None;
    } else if let Some(kind) = tag_to_kind(local) {
        convert_markup_leaf(el, local, kind, ctx)
    } else if is_generic_container_tag(local) {
        convert_container(el, ctx)
    } else if !el.children.is_empty() {
        debug!(tag = %local, "unknown tag, wrapping as Section");
        Node::new(ctx.ids.next_id(), NodeKind::Section).with_children(convert_children(el, ctx))
    } else {
        debug!(tag = %local, "dropping unknown childless tag");
        return None;
    };

    Some(node.with_style(filter_style(&raw_style)))
}

fn convert_known(el: &JsxElement, kind: NodeKind, ctx: &mut ImportContext) -> Node {
    let id = ctx.ids.next_id();
    match kind {
        NodeKind::Button => {
            let label = el
                .attr("label")
                .map(str::to_string)
                .unwrap_or_else(|| el.text_content());
            Node::new(id, kind).with_prop("label", label)
        }
        NodeKind::Heading => {
            let text = el
                .attr("text")
                .map(str::to_string)
                .unwrap_or_else(|| el.text_content());
            let level = el
                .attr("level")
                .and_then(|raw| raw.parse::<f64>().ok())
                .unwrap_or(2.0);
            Node::new(id, kind)
                .with_prop("text", text)
                .with_prop("level", PropValue::Number(level))
        }
        NodeKind::Text => {
            let text = el
                .attr("text")
                .map(str::to_string)
                .unwrap_or_else(|| el.text_content());
            Node::new(id, kind).with_prop("text", text)
        }
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
            node
        }
        NodeKind::Link => {
            let mut node = Node::new(id, kind).with_prop("text", el.text_content());
            if let Some(href) = el.attr("href") {
                node = node.with_prop("href", href);
            }
            node
        }
        NodeKind::List => {
            let items: Vec<String> = el
                .children
                .iter()
                .filter_map(|child| match child {
                    JsxNode::Element(item) => Some(item.text_content()),
                    JsxNode::Text(text) => Some(text.clone()),
                })
                .filter(|text| !text.is_empty())
                .collect();
            Node::new(id, kind).with_prop("items", PropValue::StringList(items))
        }
        NodeKind::Divider => Node::new(id, kind),
        NodeKind::Stack => {
            let direction = el.attr("direction").unwrap_or("column");
            let mut node = Node::new(id, kind).with_prop("direction", direction);
            if let Some(gap) = el.attr("gap") {
                node = node.with_prop("gap", gap);
            }
            node.with_children(convert_children(el, ctx))
        }
        NodeKind::Grid => {
            let mut node = Node::new(id, kind);
            if let Some(columns) = el.attr("columns").and_then(|raw| raw.parse::<f64>().ok()) {
                node = node.with_prop("columns", PropValue::Number(columns));
            }
            if let Some(gap) = el.attr("gap") {
                node = node.with_prop("gap", gap);
            }
            node.with_children(convert_children(el, ctx))
        }
        _ => Node::new(id, kind).with_children(convert_children(el, ctx)),
    }
}

/// Lowercase leaf tags share the markup importer's extraction rules.
fn convert_markup_leaf(el: &JsxElement, tag: &str, kind: NodeKind, ctx: &mut ImportContext) -> Node {
    let id = ctx.ids.next_id();
    match kind {
        NodeKind::Heading => {
            let level = tag.strip_prefix('h').and_then(|n| n.parse::<f64>().ok()).unwrap_or(2.0);
            Node::new(id, kind)
                .with_prop("text", el.text_content())
                .with_prop("level", PropValue::Number(level))
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
            if tag == "input" {
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
                .children
                .iter()
                .filter_map(|child| match child {
                    JsxNode::Element(item) if item.name == "li" => Some(item.text_content()),
                    _ => None,
                })
                .collect();
            Node::new(id, kind)
                .with_prop("items", PropValue::StringList(items))
                .with_prop("ordered", tag == "ol")
        }
        NodeKind::Divider => Node::new(id, kind),
        NodeKind::Nav => Node::new(id, kind).with_children(convert_children(el, ctx)),
        _ => Node::new(id, kind),
    }
}

/// Layout role of a div-equivalent, mined from its class attribute: a grid
/// hint beats a flex hint, direction comes from flex-col, and a `gap-<n>`
/// step carries over as the gap prop.
fn convert_container(el: &JsxElement, ctx: &mut ImportContext) -> Node {
    let id = ctx.ids.next_id();
    let children = convert_children(el, ctx);

    let class = el.attr("className").or_else(|| el.attr("class")).unwrap_or_default();
    let classes: Vec<&str> = class.split_whitespace().collect();

    let gap = classes
        .iter()
        .find_map(|cls| cls.strip_prefix("gap-"))
        .filter(|step| step.chars().all(|ch| ch.is_ascii_digit()));

    if classes.contains(&"grid") {
        let mut node = Node::new(id, NodeKind::Grid);
        if let Some(gap) = gap {
            node = node.with_prop("gap", gap);
        }
        return node.with_children(children);
    }

    if classes.contains(&"flex") {
        let column = classes.contains(&"flex-col") || classes.contains(&"flex-column");
        let mut node = Node::new(id, NodeKind::Stack)
            .with_prop("direction", if column { "column" } else { "row" });
        if let Some(gap) = gap {
            node = node.with_prop("gap", gap);
        }
        return node.with_children(children);
    }

    if children.is_empty() {
        let text = el.text_content();
        if !text.is_empty() {
            return Node::new(id, NodeKind::Text).with_prop("text", text);
        }
    }

    Node::new(id, NodeKind::Section).with_children(children)
}

fn convert_children(el: &JsxElement, ctx: &mut ImportContext) -> Vec<Node> {
    el.children
        .iter()
        .filter_map(|child| convert_node(child, ctx))
        .collect()
}
