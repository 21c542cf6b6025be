//! Token resolution and breakpoint layering.
//!
//! Resolution is deliberately forgiving: a reference that does not land on a
//! token degrades to its literal textual form. Missing tokens are a normal
//! state while a table is being edited, so nothing in this module can fail.

use crate::table::{TokenGroup, TokenTable};
use screenspec_schema::node::{Node, StyleMap, TOKEN_SIGIL};
use serde::Serialize;

/// Breakpoint name that always means "no override layer".
pub const BASE_BREAKPOINT: &str = "base";

/// Resolve one style value against the table. Literals pass through
/// unchanged; `$`-references walk the dot path and fall back to the original
/// reference string when the path misses.
pub fn resolve(value: &str, table: &TokenTable) -> String {
    let Some(path) = value.strip_prefix(TOKEN_SIGIL) else {
        return value.to_string();
    };

    match table.lookup(path) {
        Some(def) => def.value.to_string(),
        None => value.to_string(),
    }
}

/// Apply `resolve` to every value of a style map.
pub fn resolve_style(style: &StyleMap, table: &TokenTable) -> StyleMap {
    style
        .iter()
        .map(|(name, value)| (name.clone(), resolve(value, table)))
        .collect()
}

/// Effective style of a node under a breakpoint: base style with the named
/// override's keys shadowing it. Keys absent from the override fall through
/// to base, never to another breakpoint.
pub fn effective_style(node: &Node, breakpoint: &str) -> StyleMap {
    let mut style = node.style.clone().unwrap_or_default();

    if breakpoint == BASE_BREAKPOINT {
        return style;
    }

    if let Some(overrides) = &node.overrides {
        if let Some(layer) = overrides.get(breakpoint) {
            for (name, value) in layer {
                style.insert(name.clone(), value.clone());
            }
        }
    }

    style
}

/// One pick-list entry for a token category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenEntry {
    pub name: String,
    pub value: String,
    pub reference: String,
}

/// All tokens under a (possibly dotted) category, flattened in name order,
/// for driving property-panel pick-lists. Unknown categories yield an empty
/// list.
pub fn tokens_for_category(category: &str, table: &TokenTable) -> Vec<TokenEntry> {
    let mut entries = Vec::new();
    if let Some(group) = table.group(category) {
        collect_entries(category, group, &mut entries);
    }
    entries
}

fn collect_entries(prefix: &str, group: &TokenGroup, out: &mut Vec<TokenEntry>) {
    match group {
        TokenGroup::Tokens(tokens) => {
            for (name, def) in tokens {
                out.push(TokenEntry {
                    name: name.clone(),
                    value: def.value.to_string(),
                    reference: format!("{}{}.{}", TOKEN_SIGIL, prefix, name),
                });
            }
        }
        TokenGroup::Nested(groups) => {
            for (name, nested) in groups {
                collect_entries(&format!("{prefix}.{name}"), nested, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenspec_schema::node::NodeKind;
    use std::collections::BTreeMap;

    fn table() -> TokenTable {
        TokenTable::from_json_str(
            r##"{
                "color": {
                    "primary": { "value": "#336699", "type": "color" }
                },
                "spacing": {
                    "2": { "value": "8px" },
                    "4": { "value": "16px" }
                },
                "typography": {
                    "fontSize": {
                        "lg": { "value": "20px" }
                    }
                }
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_literal_passes_through() {
        let t = table();
        assert_eq!(resolve("16px", &t), "16px");
        assert_eq!(resolve("#fff", &t), "#fff");
    }

    #[test]
    fn test_reference_resolves() {
        let t = table();
        assert_eq!(resolve("$color.primary", &t), "#336699");
        assert_eq!(resolve("$typography.fontSize.lg", &t), "20px");
    }

    #[test]
    fn test_missing_reference_degrades() {
        let t = table();
        assert_eq!(resolve("$color.accent", &t), "$color.accent");
        assert_eq!(resolve("$shadow.lg", &t), "$shadow.lg");
        assert_eq!(resolve("$", &t), "$");
    }

    fn node_with_override() -> Node {
        let mut node = Node::new("n-1", NodeKind::Section);
        let mut base = BTreeMap::new();
        base.insert("color".to_string(), "$color.primary".to_string());
        base.insert("paddingTop".to_string(), "16px".to_string());
        node.style = Some(base);

        let mut mobile = BTreeMap::new();
        mobile.insert("paddingTop".to_string(), "8px".to_string());
        let mut overrides = BTreeMap::new();
        overrides.insert("mobile".to_string(), mobile);
        node.overrides = Some(overrides);
        node
    }

    #[test]
    fn test_effective_style_base_is_verbatim() {
        let node = node_with_override();
        let style = effective_style(&node, "base");
        assert_eq!(style, node.style.clone().unwrap());
    }

    #[test]
    fn test_effective_style_override_shadows() {
        let node = node_with_override();
        let style = effective_style(&node, "mobile");
        assert_eq!(style.get("paddingTop").map(String::as_str), Some("8px"));
        // Absent keys fall through to base.
        assert_eq!(
            style.get("color").map(String::as_str),
            Some("$color.primary")
        );
    }

    #[test]
    fn test_effective_style_unknown_breakpoint_is_base() {
        let node = node_with_override();
        assert_eq!(effective_style(&node, "tablet"), node.style.clone().unwrap());
    }

    #[test]
    fn test_tokens_for_category() {
        let t = table();
        let entries = tokens_for_category("spacing", &t);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].reference, "$spacing.2");
        assert_eq!(entries[0].value, "8px");
    }

    #[test]
    fn test_tokens_for_nested_category() {
        let t = table();
        let entries = tokens_for_category("typography", &t);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].reference, "$typography.fontSize.lg");
    }

    #[test]
    fn test_tokens_for_missing_category_is_empty() {
        let t = table();
        assert!(tokens_for_category("shadow", &t).is_empty());
    }
}
