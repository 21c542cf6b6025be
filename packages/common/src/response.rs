use screenspec_schema::ScreenSpec;
use serde::Serialize;
use std::fmt::Display;

/// Tagged importer boundary result: serializes as `{ "spec": ... }` on
/// success or `{ "error": "..." }` on failure. Importers never panic or
/// raise past this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImportResponse {
    Success { spec: ScreenSpec },
    Failure { error: String },
}

impl ImportResponse {
    pub fn from_result<E: Display>(result: Result<ScreenSpec, E>) -> Self {
        match result {
            Ok(spec) => ImportResponse::Success { spec },
            Err(err) => ImportResponse::Failure {
                error: err.to_string(),
            },
        }
    }

    pub fn spec(&self) -> Option<&ScreenSpec> {
        match self {
            ImportResponse::Success { spec } => Some(spec),
            ImportResponse::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ImportResponse::Success { .. } => None,
            ImportResponse::Failure { error } => Some(error),
        }
    }
}
