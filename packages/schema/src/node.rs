use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Style property map. Values are either literals ("16px", "#336699") or
/// token references: a `$`-prefixed dot path into the token table
/// ("$color.primary"). References are resolved at render time, never here.
pub type StyleMap = BTreeMap<String, String>;

/// Sigil marking a style value as a token reference.
pub const TOKEN_SIGIL: char = '$';

/// Closed set of built-in node kinds.
///
/// A `Component` node is a placeholder for a user-defined composite: it
/// carries a `componentId` prop and per-instance overrides; resolving the
/// definition is the host application's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Section,
    Stack,
    Grid,
    Card,
    Nav,
    Heading,
    Text,
    Button,
    Link,
    Image,
    Input,
    List,
    Divider,
    Component,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Section => "Section",
            NodeKind::Stack => "Stack",
            NodeKind::Grid => "Grid",
            NodeKind::Card => "Card",
            NodeKind::Nav => "Nav",
            NodeKind::Heading => "Heading",
            NodeKind::Text => "Text",
            NodeKind::Button => "Button",
            NodeKind::Link => "Link",
            NodeKind::Image => "Image",
            NodeKind::Input => "Input",
            NodeKind::List => "List",
            NodeKind::Divider => "Divider",
            NodeKind::Component => "Component",
        }
    }
}

/// A prop value. Shape per field is declared in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    String(String),
    Number(f64),
    Bool(bool),
    StringList(Vec<String>),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

/// Event binding on a node. Importers never emit these; editors attach them
/// and they must survive serialization untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub trigger: InteractionTrigger,

    /// Action descriptor, e.g. "navigate:/checkout" or "submit".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Visibility rule expression for `Visible` triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionTrigger {
    Click,
    Change,
    Visible,
}

/// Data binding for list-like nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    Static { items: Vec<String> },
    Mock { count: u32 },
    Remote { url: String },
}

/// One element of a Screen Spec tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, PropValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,

    /// Breakpoint name -> partial style shadowing the base style under that
    /// breakpoint. "base" is implicit and never appears as a key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<BTreeMap<String, StyleMap>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Vec<Interaction>>,

    #[serde(rename = "dataSource", default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            props: BTreeMap::new(),
            children: Vec::new(),
            style: None,
            overrides: None,
            interactions: None,
            data_source: None,
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        if !style.is_empty() {
            self.style = Some(style);
        }
        self
    }

    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(|v| v.as_str())
    }

    /// Depth-first walk over this node and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// True if the value is a token reference rather than a literal.
pub fn is_token_reference(value: &str) -> bool {
    value.starts_with(TOKEN_SIGIL)
}
