use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenTableError {
    #[error("Invalid token table: {0}")]
    Parse(String),
}

/// A token's stored value. Values are opaque; units are never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    String(String),
    Number(f64),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::String(s) => f.write_str(s),
            TokenValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One named token: `{ value, type? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDef {
    pub value: TokenValue,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// A category entry: either a flat map of tokens or a nested group
/// (`typography.fontSize.lg`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenGroup {
    Tokens(BTreeMap<String, TokenDef>),
    Nested(BTreeMap<String, TokenGroup>),
}

/// The design-token table: category name -> tokens. Loaded once per editing
/// session and read-only from this crate's point of view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTable {
    pub categories: BTreeMap<String, TokenGroup>,
}

impl TokenTable {
    pub fn from_json_str(json: &str) -> Result<Self, TokenTableError> {
        serde_json::from_str(json).map_err(|e| TokenTableError::Parse(e.to_string()))
    }

    /// Walk a dot-separated path to a terminal token, if one exists. The
    /// final segment must name a token inside a flat group; anything shorter
    /// or longer misses.
    pub fn lookup(&self, path: &str) -> Option<&TokenDef> {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.len() < 2 {
            return None;
        }

        let mut group = self.categories.get(segments[0])?;
        for (i, segment) in segments[1..].iter().enumerate() {
            let is_last = i + 2 == segments.len();
            match group {
                TokenGroup::Nested(groups) => {
                    group = groups.get(*segment)?;
                    if is_last {
                        return None;
                    }
                }
                TokenGroup::Tokens(tokens) => {
                    return if is_last { tokens.get(*segment) } else { None };
                }
            }
        }

        None
    }

    /// The group at a (possibly dotted) category path.
    pub fn group(&self, category: &str) -> Option<&TokenGroup> {
        let mut segments = category.split('.');
        let mut group = self.categories.get(segments.next()?)?;
        for segment in segments {
            match group {
                TokenGroup::Nested(groups) => group = groups.get(segment)?,
                TokenGroup::Tokens(_) => return None,
            }
        }
        Some(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenTable {
        TokenTable::from_json_str(
            r##"{
                "color": {
                    "primary": { "value": "#336699", "type": "color" },
                    "muted": { "value": "#999999" }
                },
                "spacing": {
                    "3": { "value": "12px" }
                },
                "typography": {
                    "fontSize": {
                        "lg": { "value": "20px" },
                        "sm": { "value": 12 }
                    }
                }
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_flat() {
        let table = sample();
        let def = table.lookup("color.primary").unwrap();
        assert_eq!(def.value, TokenValue::String("#336699".into()));
        assert_eq!(def.token_type.as_deref(), Some("color"));
    }

    #[test]
    fn test_lookup_nested() {
        let table = sample();
        assert_eq!(
            table.lookup("typography.fontSize.lg").unwrap().value.to_string(),
            "20px"
        );
        assert_eq!(
            table.lookup("typography.fontSize.sm").unwrap().value.to_string(),
            "12"
        );
    }

    #[test]
    fn test_lookup_misses() {
        let table = sample();
        assert!(table.lookup("color.accent").is_none());
        assert!(table.lookup("shadow.lg").is_none());
        assert!(table.lookup("typography.fontSize").is_none());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_table_round_trip() {
        let table = sample();
        let json = serde_json::to_string(&table).unwrap();
        let parsed = TokenTable::from_json_str(&json).unwrap();
        assert_eq!(table, parsed);
    }
}
