//! Node-type registry.
//!
//! Prop shapes and container flags are configuration data, not code: every
//! importer consults this table to decide legal nesting and required props,
//! so adding a built-in kind never touches importer logic.

use crate::node::{NodeKind, PropValue};

/// Primitive kind a prop value must conform to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    String,
    Number,
    Bool,
    StringList,
}

/// Declared shape of one prop field.
#[derive(Debug, Clone, Copy)]
pub struct PropSpec {
    pub name: &'static str,
    pub kind: PropKind,
    pub required: bool,
    pub default: Option<&'static str>,
    pub options: &'static [&'static str],
}

const fn prop(name: &'static str, kind: PropKind) -> PropSpec {
    PropSpec {
        name,
        kind,
        required: false,
        default: None,
        options: &[],
    }
}

const fn required(name: &'static str, kind: PropKind) -> PropSpec {
    PropSpec {
        name,
        kind,
        required: true,
        default: None,
        options: &[],
    }
}

const NO_PROPS: &[PropSpec] = &[];

const STACK_PROPS: &[PropSpec] = &[
    PropSpec {
        name: "direction",
        kind: PropKind::String,
        required: false,
        default: Some("column"),
        options: &["row", "column"],
    },
    prop("gap", PropKind::String),
];

const GRID_PROPS: &[PropSpec] = &[prop("columns", PropKind::Number), prop("gap", PropKind::String)];

const HEADING_PROPS: &[PropSpec] = &[
    required("text", PropKind::String),
    PropSpec {
        name: "level",
        kind: PropKind::Number,
        required: false,
        default: Some("2"),
        options: &[],
    },
];

const TEXT_PROPS: &[PropSpec] = &[required("text", PropKind::String)];

const BUTTON_PROPS: &[PropSpec] = &[required("label", PropKind::String)];

const LINK_PROPS: &[PropSpec] = &[required("text", PropKind::String), prop("href", PropKind::String)];

const IMAGE_PROPS: &[PropSpec] = &[required("src", PropKind::String), prop("alt", PropKind::String)];

const INPUT_PROPS: &[PropSpec] = &[
    prop("placeholder", PropKind::String),
    prop("name", PropKind::String),
    PropSpec {
        name: "inputType",
        kind: PropKind::String,
        required: false,
        default: Some("text"),
        options: &["text", "email", "password", "number", "checkbox", "radio"],
    },
];

const LIST_PROPS: &[PropSpec] = &[prop("items", PropKind::StringList), prop("ordered", PropKind::Bool)];

const COMPONENT_PROPS: &[PropSpec] = &[required("componentId", PropKind::String)];

/// Prop schema for a built-in kind.
pub fn prop_schema(kind: NodeKind) -> &'static [PropSpec] {
    match kind {
        NodeKind::Section | NodeKind::Card | NodeKind::Nav | NodeKind::Divider => NO_PROPS,
        NodeKind::Stack => STACK_PROPS,
        NodeKind::Grid => GRID_PROPS,
        NodeKind::Heading => HEADING_PROPS,
        NodeKind::Text => TEXT_PROPS,
        NodeKind::Button => BUTTON_PROPS,
        NodeKind::Link => LINK_PROPS,
        NodeKind::Image => IMAGE_PROPS,
        NodeKind::Input => INPUT_PROPS,
        NodeKind::List => LIST_PROPS,
        NodeKind::Component => COMPONENT_PROPS,
    }
}

/// Whether the kind may declare children.
pub fn is_container(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Section
            | NodeKind::Stack
            | NodeKind::Grid
            | NodeKind::Card
            | NodeKind::Nav
            | NodeKind::Component
    )
}

/// Leaf tag-to-kind table shared by the markup and component-script
/// importers. Generic containers (div-equivalents) are deliberately absent;
/// their role is inferred from layout signals by each importer.
pub fn tag_to_kind(tag: &str) -> Option<NodeKind> {
    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(NodeKind::Heading),
        "p" => Some(NodeKind::Text),
        "img" => Some(NodeKind::Image),
        "input" | "textarea" | "select" => Some(NodeKind::Input),
        "a" => Some(NodeKind::Link),
        "button" => Some(NodeKind::Button),
        "ul" | "ol" => Some(NodeKind::List),
        "hr" => Some(NodeKind::Divider),
        "nav" | "header" => Some(NodeKind::Nav),
        _ => None,
    }
}

/// Generic container tags whose layout role comes from style/class signals.
pub fn is_generic_container_tag(tag: &str) -> bool {
    matches!(
        tag,
        "div" | "section" | "article" | "main" | "aside" | "footer" | "figure" | "form" | "span"
    )
}

/// Tags dropped outright: scripting and non-visual metadata.
pub fn is_dropped_tag(tag: &str) -> bool {
    matches!(
        tag,
        "script" | "style" | "head" | "meta" | "link" | "title" | "base" | "noscript" | "template"
    )
}

/// Heading level from a heading tag's numeric suffix.
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Check one prop value against its declared kind.
pub fn prop_matches_kind(value: &PropValue, kind: PropKind) -> bool {
    matches!(
        (value, kind),
        (PropValue::String(_), PropKind::String)
            | (PropValue::Number(_), PropKind::Number)
            | (PropValue::Bool(_), PropKind::Bool)
            | (PropValue::StringList(_), PropKind::StringList)
    )
}
