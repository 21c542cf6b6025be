//! Inline style handling shared by the importers: the allow-list of style
//! properties a node may carry, CSS declaration parsing, and shorthand
//! expansion. Canonical property names are camelCase.

use crate::node::StyleMap;
use std::collections::BTreeMap;

/// Style properties a node may carry. Anything else is silently dropped.
/// Layout-classification signals (`display`, `flexDirection`) are consumed by
/// the importers and are intentionally not carried on nodes.
pub const STYLE_ALLOW_LIST: &[&str] = &[
    "alignItems",
    "background",
    "backgroundColor",
    "border",
    "borderColor",
    "borderRadius",
    "borderWidth",
    "boxShadow",
    "color",
    "fontFamily",
    "fontSize",
    "fontWeight",
    "gap",
    "height",
    "justifyContent",
    "letterSpacing",
    "lineHeight",
    "marginBottom",
    "marginLeft",
    "marginRight",
    "marginTop",
    "maxHeight",
    "maxWidth",
    "minHeight",
    "minWidth",
    "opacity",
    "overflow",
    "paddingBottom",
    "paddingLeft",
    "paddingRight",
    "paddingTop",
    "textAlign",
    "width",
];

/// Parse a raw inline declaration list ("display: flex; gap: 8px") into a
/// camelCased property map. No filtering happens here so the caller can read
/// classification signals before they are discarded.
pub fn parse_declarations(css: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    for decl in css.split(';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = camel_case(name.trim());
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            continue;
        }
        out.insert(name, value.to_string());
    }

    out
}

/// Reduce a raw declaration map to the canonical node style: expand
/// `padding`/`margin` shorthands into per-side longhands, then keep only
/// allow-listed properties.
pub fn filter_style(raw: &BTreeMap<String, String>) -> StyleMap {
    let mut expanded = BTreeMap::new();

    for (name, value) in raw {
        match name.as_str() {
            "padding" => expand_box_shorthand("padding", value, &mut expanded),
            "margin" => expand_box_shorthand("margin", value, &mut expanded),
            _ => {
                expanded.insert(name.clone(), value.clone());
            }
        }
    }

    expanded
        .into_iter()
        .filter(|(name, _)| STYLE_ALLOW_LIST.contains(&name.as_str()))
        .collect()
}

/// Expand a box shorthand value (1-4 space-separated parts) into the four
/// per-side longhands, CSS ordering: top, right, bottom, left.
fn expand_box_shorthand(base: &str, value: &str, out: &mut BTreeMap<String, String>) {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let (top, right, bottom, left) = match parts.as_slice() {
        [all] => (*all, *all, *all, *all),
        [v, h] => (*v, *h, *v, *h),
        [t, h, b] => (*t, *h, *b, *h),
        [t, r, b, l] => (*t, *r, *b, *l),
        _ => return,
    };

    out.insert(format!("{base}Top"), top.to_string());
    out.insert(format!("{base}Right"), right.to_string());
    out.insert(format!("{base}Bottom"), bottom.to_string());
    out.insert(format!("{base}Left"), left.to_string());
}

fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations_camel_cases() {
        let raw = parse_declarations("display: flex; flex-direction: column; gap: 8px");
        assert_eq!(raw.get("display").map(String::as_str), Some("flex"));
        assert_eq!(raw.get("flexDirection").map(String::as_str), Some("column"));
        assert_eq!(raw.get("gap").map(String::as_str), Some("8px"));
    }

    #[test]
    fn test_filter_drops_unlisted() {
        let raw = parse_declarations("color: red; display: flex; cursor: pointer");
        let style = filter_style(&raw);
        assert_eq!(style.get("color").map(String::as_str), Some("red"));
        assert!(!style.contains_key("display"));
        assert!(!style.contains_key("cursor"));
    }

    #[test]
    fn test_padding_shorthand_two_values() {
        let raw = parse_declarations("padding: 4px 8px");
        let style = filter_style(&raw);
        assert_eq!(style.get("paddingTop").map(String::as_str), Some("4px"));
        assert_eq!(style.get("paddingRight").map(String::as_str), Some("8px"));
        assert_eq!(style.get("paddingBottom").map(String::as_str), Some("4px"));
        assert_eq!(style.get("paddingLeft").map(String::as_str), Some("8px"));
        assert!(!style.contains_key("padding"));
    }

    #[test]
    fn test_margin_shorthand_full() {
        let raw = parse_declarations("margin: 1px 2px 3px 4px");
        let style = filter_style(&raw);
        assert_eq!(style.get("marginTop").map(String::as_str), Some("1px"));
        assert_eq!(style.get("marginRight").map(String::as_str), Some("2px"));
        assert_eq!(style.get("marginBottom").map(String::as_str), Some("3px"));
        assert_eq!(style.get("marginLeft").map(String::as_str), Some("4px"));
    }

    #[test]
    fn test_malformed_declarations_skipped() {
        let raw = parse_declarations("color red; : 4px; width: 100px;;");
        assert_eq!(raw.len(), 1);
        assert_eq!(raw.get("width").map(String::as_str), Some("100px"));
    }
}
