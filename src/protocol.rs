/// Messages exchanged between the popup and the background worker
use crate::status::TokenStatus;
use serde::{Deserialize, Serialize};

/// A popup request, tagged by `action` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Open the share page for a tab (no usable token)
    SaveArticle {
        #[serde(rename = "tabId")]
        tab_id: i32,
    },
    /// Create the article through the API with the stored token
    SendArticleUrl {
        url: String,
        #[serde(default)]
        title: String,
    },
    CheckToken,
    SaveToken { token: String },
    ClearToken,
}

/// `{success, error?}` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Ack {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Ack {
            success: false,
            error: Some(message.into()),
        }
    }

    /// The error message, or `fallback` when the failure carried none
    pub fn error_or(&self, fallback: &str) -> String {
        self.error
            .clone()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Ack(Ack),
    Status(TokenStatus),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        assert_eq!(
            serde_json::to_value(Request::SaveArticle { tab_id: 42 }).unwrap(),
            json!({"action": "saveArticle", "tabId": 42})
        );
        assert_eq!(
            serde_json::to_value(Request::CheckToken).unwrap(),
            json!({"action": "checkToken"})
        );
        assert_eq!(
            serde_json::to_value(Request::SaveToken { token: "abc123".to_string() }).unwrap(),
            json!({"action": "saveToken", "token": "abc123"})
        );
    }

    #[test]
    fn test_request_parse() {
        let request: Request = serde_json::from_value(json!({
            "action": "sendArticleUrl",
            "url": "https://example.com/a"
        }))
        .unwrap();

        assert_eq!(
            request,
            Request::SendArticleUrl {
                url: "https://example.com/a".to_string(),
                title: String::new(),
            }
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = serde_json::from_value::<Request>(json!({"action": "openDashboard"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_reply_wire_format() {
        assert_eq!(serde_json::to_value(Reply::Ack(Ack::ok())).unwrap(), json!({"success": true}));
        assert_eq!(
            serde_json::to_value(Reply::Ack(Ack::failed("boom"))).unwrap(),
            json!({"success": false, "error": "boom"})
        );
        assert_eq!(
            serde_json::to_value(Reply::Status(TokenStatus::no_token())).unwrap(),
            json!({"valid": false, "error": "no-token"})
        );
    }

    #[test]
    fn test_error_or_fallback() {
        assert_eq!(Ack::failed("Quota exceeded").error_or("fallback"), "Quota exceeded");
        assert_eq!(Ack::failed("").error_or("fallback"), "fallback");
        let bare: Ack = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(bare.error_or("fallback"), "fallback");
    }
}
