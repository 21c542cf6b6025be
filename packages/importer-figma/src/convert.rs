//! Design-tool node graph -> Screen Spec conversion.
//!
//! Mapping order for frame-like nodes: the name heuristic is consulted
//! before the generic auto-layout mapping, so a frame named "Primary Button"
//! becomes a Button even when it carries a layout. Auto-layout spacing and
//! text sizes are bucketed into the token scale / heading levels through
//! fixed breakpoints.

use crate::api::{FigmaFile, FigmaNode, FigmaNodeKind, LayoutMode};
use crate::error::{FigmaError, FigmaResult};
use screenspec_common::slugify;
use screenspec_schema::node::{Node, NodeKind, PropValue};
use screenspec_schema::registry::is_container;
use screenspec_schema::{IdGenerator, ScreenSpec, ROOT_ID};
use serde::Serialize;
use tracing::debug;

const IMPORT_ROUTE: &str = "/imported";

/// Bucket an auto-layout item spacing into the nearest token-scale step.
pub fn bucket_spacing(spacing: f64) -> &'static str {
    if spacing <= 2.0 {
        "1"
    } else if spacing <= 6.0 {
        "2"
    } else if spacing <= 12.0 {
        "3"
    } else if spacing <= 20.0 {
        "4"
    } else if spacing <= 32.0 {
        "6"
    } else {
        "8"
    }
}

/// Font size at which a text run reads as a heading.
const HEADING_MIN_SIZE: f64 = 18.0;

/// Bucket a heading-sized font into a heading level.
pub fn bucket_heading_level(size: f64) -> u8 {
    if size >= 36.0 {
        1
    } else if size >= 28.0 {
        2
    } else if size >= 22.0 {
        3
    } else {
        4
    }
}

/// Case-insensitive domain-word match on a node's declared name. Matching is
/// substring-based and checked in a fixed order.
fn name_heuristic(name: &str) -> Option<NodeKind> {
    let lower = name.to_lowercase();
    if lower.contains("card") {
        Some(NodeKind::Card)
    } else if lower.contains("button") || lower.contains("btn") {
        Some(NodeKind::Button)
    } else if lower.contains("input") || lower.contains("field") {
        Some(NodeKind::Input)
    } else if lower.contains("nav") || lower.contains("header") {
        Some(NodeKind::Nav)
    } else {
        None
    }
}

/// Deepest text run under a node; ties break toward document order.
fn deepest_text(node: &FigmaNode) -> Option<&str> {
    fn walk<'doc>(node: &'doc FigmaNode, depth: usize) -> Option<(usize, &'doc str)> {
        if node.kind == FigmaNodeKind::Text {
            return node.characters.as_deref().map(|text| (depth, text));
        }
        let mut best: Option<(usize, &'doc str)> = None;
        for child in &node.children {
            if let Some((found_depth, text)) = walk(child, depth + 1) {
                if best.map_or(true, |(best_depth, _)| found_depth > best_depth) {
                    best = Some((found_depth, text));
                }
            }
        }
        best
    }

    walk(node, 0).map(|(_, text)| text)
}

struct ImportContext {
    ids: IdGenerator,
}

impl ImportContext {
    fn new() -> Self {
        Self {
            ids: IdGenerator::new("figma"),
        }
    }
}

fn convert_node(fig: &FigmaNode, ctx: &mut ImportContext) -> Option<Node> {
    if fig.kind.is_frame_like() {
        return Some(convert_frame_like(fig, ctx));
    }

    match fig.kind {
        FigmaNodeKind::Text => Some(convert_text(fig, ctx)),
        FigmaNodeKind::Rectangle | FigmaNodeKind::Ellipse => {
            let id = ctx.ids.next_id();
            if fig.has_image_fill() {
                // The asset itself lives behind the design service; the host
                // resolves the address after import.
                Some(
                    Node::new(id, NodeKind::Image)
                        .with_prop("src", "")
                        .with_prop("alt", fig.name.as_str()),
                )
            } else {
                Some(Node::new(id, NodeKind::Divider))
            }
        }
        kind if kind.is_vector_like() => Some(Node::new(ctx.ids.next_id(), NodeKind::Divider)),
        FigmaNodeKind::Document | FigmaNodeKind::Canvas => Some(
            Node::new(ctx.ids.next_id(), NodeKind::Section)
                .with_children(convert_children(fig, ctx)),
        ),
        _ => {
            debug!(name = %fig.name, "dropping unmapped node kind");
            None
        }
    }
}

fn convert_frame_like(fig: &FigmaNode, ctx: &mut ImportContext) -> Node {
    if let Some(kind) = name_heuristic(&fig.name) {
        let id = ctx.ids.next_id();
        let node = match kind {
            NodeKind::Button => {
                let label = deepest_text(fig).unwrap_or(&fig.name);
                Node::new(id, kind).with_prop("label", label)
            }
            NodeKind::Input => Node::new(id, kind).with_prop("placeholder", fig.name.as_str()),
            _ => Node::new(id, kind),
        };

        // Children only where the target kind can hold them.
        return if is_container(kind) {
            node.with_children(convert_children(fig, ctx))
        } else {
            node
        };
    }

    let id = ctx.ids.next_id();
    if fig.has_auto_layout() {
        let direction = match fig.layout_mode {
            LayoutMode::Horizontal => "row",
            _ => "column",
        };
        return Node::new(id, NodeKind::Stack)
            .with_prop("direction", direction)
            .with_prop("gap", bucket_spacing(fig.item_spacing))
            .with_children(convert_children(fig, ctx));
    }

    Node::new(id, NodeKind::Section).with_children(convert_children(fig, ctx))
}

fn convert_text(fig: &FigmaNode, ctx: &mut ImportContext) -> Node {
    let id = ctx.ids.next_id();
    let text = fig
        .characters
        .clone()
        .filter(|chars| !chars.is_empty())
        .unwrap_or_else(|| fig.name.clone());

    let size = fig.font_size();
    if size >= HEADING_MIN_SIZE {
        Node::new(id, NodeKind::Heading)
            .with_prop("text", text)
            .with_prop("level", PropValue::Number(bucket_heading_level(size) as f64))
    } else {
        Node::new(id, NodeKind::Text).with_prop("text", text)
    }
}

fn convert_children(fig: &FigmaNode, ctx: &mut ImportContext) -> Vec<Node> {
    fig.children
        .iter()
        .filter_map(|child| convert_node(child, ctx))
        .collect()
}

/// Convert a fetched file. With a target node id, that frame becomes the
/// root and the route comes from its name; otherwise every top-level frame
/// of the first page lands under a synthetic column Stack.
pub fn convert_file(file: &FigmaFile, node_id: Option<&str>) -> FigmaResult<ScreenSpec> {
    let mut ctx = ImportContext::new();

    if let Some(target) = node_id {
        let frame = find_node(&file.document, target)
            .ok_or_else(|| FigmaError::FrameNotFound(target.to_string()))?;
        let mut root = convert_node(frame, &mut ctx)
            .ok_or_else(|| FigmaError::InvalidDocument(format!(
                "node '{}' has no importable content",
                target
            )))?;
        root.id = ROOT_ID.to_string();
        return Ok(ScreenSpec::new(slugify(&frame.name), root));
    }

    let first_page = file
        .document
        .children
        .first()
        .ok_or(FigmaError::EmptyDocument)?;

    let frames: Vec<Node> = first_page
        .children
        .iter()
        .filter(|child| child.kind.is_frame_like())
        .filter_map(|child| convert_node(child, &mut ctx))
        .collect();

    if frames.is_empty() {
        return Err(FigmaError::EmptyDocument);
    }

    let root = Node::new(ROOT_ID, NodeKind::Stack)
        .with_prop("direction", "column")
        .with_children(frames);

    Ok(ScreenSpec::new(IMPORT_ROUTE, root))
}

fn find_node<'doc>(node: &'doc FigmaNode, id: &str) -> Option<&'doc FigmaNode> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_node(child, id))
}

/// One selectable top-level frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameInfo {
    pub id: String,
    pub name: String,
    pub page: String,
}

/// Read-only listing for the frame picker: document -> pages -> first-level
/// frame/component children, never recursive.
pub fn list_frames(document: &FigmaNode) -> Vec<FrameInfo> {
    let mut frames = Vec::new();

    for page in &document.children {
        if page.kind != FigmaNodeKind::Canvas {
            continue;
        }
        for child in &page.children {
            if child.kind.is_frame_like() {
                frames.push(FrameInfo {
                    id: child.id.clone(),
                    name: child.name.clone(),
                    page: page.name.clone(),
                });
            }
        }
    }

    frames
}
