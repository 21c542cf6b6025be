use crate::node::{Node, NodeKind};
use crate::registry::{is_container, prop_matches_kind, prop_schema};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Only supported document version.
pub const SPEC_VERSION: u32 = 1;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid spec document: {0}")]
    Parse(String),

    #[error("Unsupported spec version {found}, expected {SPEC_VERSION}")]
    UnsupportedVersion { found: u32 },

    #[error("Spec route must be a non-empty string")]
    EmptyRoute,

    #[error("Spec tree root must carry an id")]
    MissingRootId,
}

/// Serialized Screen Spec document: `{ version, route, meta?, tree }`.
///
/// This is the one shape persistence and the renderer accept; every importer
/// converges on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSpec {
    pub version: u32,

    pub route: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,

    pub tree: Node,
}

impl ScreenSpec {
    pub fn new(route: impl Into<String>, tree: Node) -> Self {
        Self {
            version: SPEC_VERSION,
            route: route.into(),
            meta: None,
            tree,
        }
    }

    /// Parse and shape-check a serialized spec.
    pub fn from_json_str(json: &str) -> DocumentResult<Self> {
        let spec: ScreenSpec =
            serde_json::from_str(json).map_err(|e| DocumentError::Parse(e.to_string()))?;

        if spec.version != SPEC_VERSION {
            return Err(DocumentError::UnsupportedVersion { found: spec.version });
        }
        if spec.route.trim().is_empty() {
            return Err(DocumentError::EmptyRoute);
        }
        if spec.tree.id.is_empty() {
            return Err(DocumentError::MissingRootId);
        }

        Ok(spec)
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).expect("spec serialization is infallible")
    }

    pub fn to_json_string_pretty(&self) -> String {
        serde_json::to_string_pretty(self).expect("spec serialization is infallible")
    }

    /// Structural validation beyond parse-time shape: duplicate ids, children
    /// on leaf kinds, prop values that contradict the registry. Returns a
    /// diagnostics list rather than failing on first issue.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut seen_ids: HashSet<&str> = HashSet::new();

        self.tree.walk(&mut |node| {
            if !seen_ids.insert(node.id.as_str()) {
                diagnostics.push(Diagnostic::error(
                    "duplicate-id",
                    format!("Node id '{}' appears more than once", node.id),
                    Some(node.id.clone()),
                ));
            }

            if !node.children.is_empty() && !is_container(node.kind) {
                diagnostics.push(Diagnostic::error(
                    "children-on-leaf",
                    format!("{} nodes cannot declare children", node.kind.as_str()),
                    Some(node.id.clone()),
                ));
            }

            let schema = prop_schema(node.kind);
            for spec in schema {
                match node.props.get(spec.name) {
                    Some(value) => {
                        if !prop_matches_kind(value, spec.kind) {
                            diagnostics.push(Diagnostic::error(
                                "prop-shape",
                                format!(
                                    "Prop '{}' on {} has the wrong shape",
                                    spec.name,
                                    node.kind.as_str()
                                ),
                                Some(node.id.clone()),
                            ));
                        } else if !spec.options.is_empty() {
                            if let Some(s) = value.as_str() {
                                if !spec.options.contains(&s) {
                                    diagnostics.push(Diagnostic::warning(
                                        "prop-option",
                                        format!(
                                            "Prop '{}' value '{}' is not one of the declared options",
                                            spec.name, s
                                        ),
                                        Some(node.id.clone()),
                                    ));
                                }
                            }
                        }
                    }
                    None if spec.required => {
                        diagnostics.push(Diagnostic::error(
                            "missing-prop",
                            format!(
                                "Required prop '{}' missing on {}",
                                spec.name,
                                node.kind.as_str()
                            ),
                            Some(node.id.clone()),
                        ));
                    }
                    None => {}
                }
            }

            // Component instances carry their per-instance override values as
            // extra props; only built-in kinds have a closed prop set.
            if node.kind != NodeKind::Component {
                for name in node.props.keys() {
                    if !schema.iter().any(|spec| spec.name == name) {
                        diagnostics.push(Diagnostic::warning(
                            "unknown-prop",
                            format!("Prop '{}' is not declared for {}", name, node.kind.as_str()),
                            Some(node.id.clone()),
                        ));
                    }
                }
            }
        });

        diagnostics
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// A validation finding tied to a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub rule: String,
    pub message: String,
    pub node_id: Option<String>,
}

impl Diagnostic {
    pub fn error(rule: impl Into<String>, message: impl Into<String>, node_id: Option<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            rule: rule.into(),
            message: message.into(),
            node_id,
        }
    }

    pub fn warning(
        rule: impl Into<String>,
        message: impl Into<String>,
        node_id: Option<String>,
    ) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            rule: rule.into(),
            message: message.into(),
            node_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, PropValue};

    fn sample_spec() -> ScreenSpec {
        let tree = Node::new("root", NodeKind::Stack)
            .with_prop("direction", "column")
            .with_child(
                Node::new("n-1", NodeKind::Heading)
                    .with_prop("text", "Welcome")
                    .with_prop("level", PropValue::Number(1.0)),
            )
            .with_child(Node::new("n-2", NodeKind::Text).with_prop("text", "Hello"));
        ScreenSpec::new("/home", tree)
    }

    #[test]
    fn test_round_trip() {
        let spec = sample_spec();
        let json = spec.to_json_string();
        let parsed = ScreenSpec::from_json_str(&json).unwrap();
        assert_eq!(spec, parsed);
    }

    #[test]
    fn test_version_must_match() {
        let mut spec = sample_spec();
        spec.version = 2;
        let json = spec.to_json_string();
        assert!(matches!(
            ScreenSpec::from_json_str(&json),
            Err(DocumentError::UnsupportedVersion { found: 2 })
        ));
    }

    #[test]
    fn test_empty_route_rejected() {
        let mut spec = sample_spec();
        spec.route = "  ".to_string();
        let json = spec.to_json_string();
        assert!(matches!(
            ScreenSpec::from_json_str(&json),
            Err(DocumentError::EmptyRoute)
        ));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"version":1,"route":"/x","tree":{"id":"root","type":"Blob"}}"#;
        assert!(matches!(
            ScreenSpec::from_json_str(json),
            Err(DocumentError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_clean_spec() {
        assert!(sample_spec().validate().is_empty());
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let tree = Node::new("root", NodeKind::Section)
            .with_child(Node::new("dup", NodeKind::Divider))
            .with_child(Node::new("dup", NodeKind::Divider));
        let diags = ScreenSpec::new("/x", tree).validate();
        assert!(diags.iter().any(|d| d.rule == "duplicate-id"));
    }

    #[test]
    fn test_validate_children_on_leaf() {
        let tree = Node::new("root", NodeKind::Section).with_child(
            Node::new("n-1", NodeKind::Text)
                .with_prop("text", "hi")
                .with_child(Node::new("n-2", NodeKind::Divider)),
        );
        let diags = ScreenSpec::new("/x", tree).validate();
        assert!(diags.iter().any(|d| d.rule == "children-on-leaf"));
    }

    #[test]
    fn test_validate_component_instance_overrides() {
        let tree = Node::new("root", NodeKind::Section).with_child(
            Node::new("n-1", NodeKind::Component)
                .with_prop("componentId", "cmp-pricing-card")
                .with_prop("title", "Pro plan")
                .with_prop("highlighted", true),
        );
        assert!(ScreenSpec::new("/x", tree).validate().is_empty());
    }

    #[test]
    fn test_validate_missing_required_prop() {
        let tree = Node::new("root", NodeKind::Section)
            .with_child(Node::new("n-1", NodeKind::Image).with_prop("alt", "logo"));
        let diags = ScreenSpec::new("/x", tree).validate();
        assert!(diags
            .iter()
            .any(|d| d.rule == "missing-prop" && d.message.contains("src")));
    }
}
