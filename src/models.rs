// Wire types for the WebSocket and health endpoints

use serde::{Deserialize, Serialize};

use crate::llm::ChatRole;

/// Prefix of every error reply sent to the client
pub const ERROR_PREFIX: &str = "Sorry, there was an error processing your request: ";

// Inbound WebSocket message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    pub content: String,
}

impl AnalysisRequest {
    /// Identifier to fetch; blank ids count as absent
    pub fn spreadsheet_id(&self) -> Option<&str> {
        self.spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

// Outbound WebSocket message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub role: ChatRole,
    pub content: String,
    /// Machine-readable failure kind; absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn answer(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            error: None,
        }
    }

    pub fn failure(code: &str, message: impl std::fmt::Display) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: format!("{}{}", ERROR_PREFIX, message),
            error: Some(code.to_string()),
        }
    }
}

// GET /health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"spreadsheetId":"X","content":"What's the trend?"}"#).unwrap();
        assert_eq!(request.spreadsheet_id(), Some("X"));
        assert_eq!(request.content, "What's the trend?");
    }

    #[test]
    fn test_request_without_spreadsheet() {
        let request: AnalysisRequest = serde_json::from_str(r#"{"content":"Hi"}"#).unwrap();
        assert_eq!(request.spreadsheet_id(), None);
    }

    #[test]
    fn test_blank_spreadsheet_id_counts_as_missing() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"spreadsheetId":"  ","content":"Hi"}"#).unwrap();
        assert_eq!(request.spreadsheet_id(), None);
    }

    #[test]
    fn test_request_requires_content() {
        let result = serde_json::from_str::<AnalysisRequest>(r#"{"spreadsheetId":"X"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_answer_serialization() {
        let value = serde_json::to_value(AnalysisResponse::answer("Up 12%")).unwrap();
        assert_eq!(value, serde_json::json!({"role": "assistant", "content": "Up 12%"}));
    }

    #[test]
    fn test_failure_serialization() {
        let value =
            serde_json::to_value(AnalysisResponse::failure("completion", "quota exceeded")).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(
            value["content"],
            "Sorry, there was an error processing your request: quota exceeded"
        );
        assert_eq!(value["error"], "completion");
    }

    #[test]
    fn test_health_serialization() {
        let serialized = serde_json::to_string(&HealthResponse::ok()).unwrap();
        assert_eq!(serialized, r#"{"status":"ok"}"#);
    }
}
