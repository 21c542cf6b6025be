//! File-key extraction and the single fetch against the design service.
//!
//! The fetch is one blocking request-response with no retry; a non-2xx
//! answer surfaces as a transport error carrying the upstream status and
//! body. Everything after the fetch is pure.

use crate::api::FigmaFile;
use crate::convert::{convert_file, list_frames, FrameInfo};
use crate::error::{FigmaError, FigmaResult};
use screenspec_schema::ScreenSpec;
use serde::Deserialize;
use tracing::debug;

const API_BASE: &str = "https://api.figma.com";

/// Pull the file key out of a share URL: the path segment following `file`
/// or `design`. Checked before any network I/O.
pub fn extract_file_key(url: &str) -> FigmaResult<String> {
    let path = url.split("://").nth(1).unwrap_or(url);
    let segments: Vec<&str> = path
        .split(|ch| ch == '/' || ch == '?')
        .filter(|s| !s.is_empty())
        .collect();

    for window in segments.windows(2) {
        if (window[0] == "file" || window[0] == "design")
            && window[1].chars().all(|ch| ch.is_ascii_alphanumeric())
            && !window[1].is_empty()
        {
            return Ok(window[1].to_string());
        }
    }

    Err(FigmaError::InvalidFileUrl {
        url: url.to_string(),
    })
}

pub struct FigmaClient {
    token: String,
    base_url: String,
}

impl FigmaClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Point the client at a different host (tests, proxies).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.into(),
        }
    }

    pub fn fetch_file(&self, file_key: &str) -> FigmaResult<FigmaFile> {
        let url = format!("{}/v1/files/{}", self.base_url, file_key);
        debug!(%url, "fetching design document");

        let response = reqwest::blocking::Client::new()
            .get(&url)
            .header("X-Figma-Token", &self.token)
            .send()
            .map_err(|err| FigmaError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FigmaError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .map_err(|err| FigmaError::InvalidDocument(err.to_string()))
    }
}

/// Importer boundary request: `{ fileUrl, accessToken, nodeId?, action }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaImportRequest {
    pub file_url: String,
    pub access_token: String,

    #[serde(default)]
    pub node_id: Option<String>,

    pub action: FigmaAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FigmaAction {
    Import,
    ListFrames,
}

#[derive(Debug)]
pub enum FigmaOutcome {
    Spec(ScreenSpec),
    Frames(Vec<FrameInfo>),
}

/// Handle one boundary request end to end. The URL is validated before the
/// fetch; fetch and mapping failures keep their distinct kinds.
pub fn handle_request(request: &FigmaImportRequest) -> FigmaResult<FigmaOutcome> {
    let file_key = extract_file_key(&request.file_url)?;
    let client = FigmaClient::new(request.access_token.clone());
    let file = client.fetch_file(&file_key)?;

    match request.action {
        FigmaAction::Import => {
            convert_file(&file, request.node_id.as_deref()).map(FigmaOutcome::Spec)
        }
        FigmaAction::ListFrames => Ok(FigmaOutcome::Frames(list_frames(&file.document))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_key_from_file_url() {
        let key = extract_file_key("https://www.figma.com/file/AbC123xyz/Landing-Page").unwrap();
        assert_eq!(key, "AbC123xyz");
    }

    #[test]
    fn test_extract_key_from_design_url() {
        let key =
            extract_file_key("https://www.figma.com/design/ZZtop99/Admin?node-id=1-2").unwrap();
        assert_eq!(key, "ZZtop99");
    }

    #[test]
    fn test_extract_key_rejects_other_urls() {
        assert!(extract_file_key("https://www.figma.com/community/plugin/123").is_err());
        assert!(extract_file_key("not a url").is_err());
        assert!(extract_file_key("https://www.figma.com/file/").is_err());
    }

    #[test]
    fn test_action_parses_kebab_case() {
        let request: FigmaImportRequest = serde_json::from_str(
            r#"{
                "fileUrl": "https://www.figma.com/file/K1/App",
                "accessToken": "figd_secret",
                "action": "list-frames"
            }"#,
        )
        .unwrap();
        assert_eq!(request.action, FigmaAction::ListFrames);
        assert!(request.node_id.is_none());
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result: Result<FigmaImportRequest, _> = serde_json::from_str(
            r#"{
                "fileUrl": "https://www.figma.com/file/K1/App",
                "accessToken": "t",
                "action": "export-pdf"
            }"#,
        );
        assert!(result.is_err());
    }
}
