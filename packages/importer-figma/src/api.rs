//! Serde model of the slice of the design service's document API this
//! importer reads. Unknown node kinds deserialize to `Unknown` so a new
//! upstream node type degrades per-node instead of failing the whole fetch.

use serde::Deserialize;

/// Response of `GET /v1/files/<key>`.
#[derive(Debug, Clone, Deserialize)]
pub struct FigmaFile {
    pub name: String,
    pub document: FigmaNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FigmaNodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Line,
    Vector,
    Star,
    RegularPolygon,
    BooleanOperation,
    #[serde(other)]
    Unknown,
}

impl FigmaNodeKind {
    /// Frame-like containers that participate in layout mapping.
    pub fn is_frame_like(&self) -> bool {
        matches!(
            self,
            FigmaNodeKind::Frame
                | FigmaNodeKind::Group
                | FigmaNodeKind::Component
                | FigmaNodeKind::ComponentSet
                | FigmaNodeKind::Instance
        )
    }

    /// Vector-ish primitives with no dedicated mapping.
    pub fn is_vector_like(&self) -> bool {
        matches!(
            self,
            FigmaNodeKind::Line
                | FigmaNodeKind::Vector
                | FigmaNodeKind::Star
                | FigmaNodeKind::RegularPolygon
                | FigmaNodeKind::BooleanOperation
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
}

impl Default for LayoutMode {
    fn default() -> Self {
        LayoutMode::None
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNode {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: FigmaNodeKind,

    #[serde(default)]
    pub children: Vec<FigmaNode>,

    #[serde(default)]
    pub layout_mode: LayoutMode,

    #[serde(default)]
    pub item_spacing: f64,

    /// Text content of TEXT nodes.
    #[serde(default)]
    pub characters: Option<String>,

    #[serde(default)]
    pub style: Option<TypeStyle>,

    #[serde(default)]
    pub fills: Vec<Paint>,
}

impl FigmaNode {
    pub fn has_auto_layout(&self) -> bool {
        self.layout_mode != LayoutMode::None
    }

    pub fn has_image_fill(&self) -> bool {
        self.fills
            .iter()
            .any(|fill| fill.kind == "IMAGE" && fill.visible.unwrap_or(true))
    }

    pub fn font_size(&self) -> f64 {
        self.style
            .as_ref()
            .and_then(|style| style.font_size)
            .unwrap_or(14.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default)]
    pub font_size: Option<f64>,

    #[serde(default)]
    pub font_weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub visible: Option<bool>,

    #[serde(default)]
    pub image_ref: Option<String>,
}
