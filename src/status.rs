/// Token validity as reported by the gateway
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a token is not usable. Serialized as its wire string,
/// e.g. `"no-pro-plan"` or `"api-error-500"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TokenProblem {
    NoToken,
    InvalidToken,
    NoProPlan,
    NetworkError,
    ApiError(u16),
}

impl fmt::Display for TokenProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenProblem::NoToken => f.write_str("no-token"),
            TokenProblem::InvalidToken => f.write_str("invalid-token"),
            TokenProblem::NoProPlan => f.write_str("no-pro-plan"),
            TokenProblem::NetworkError => f.write_str("network-error"),
            TokenProblem::ApiError(status) => write!(f, "api-error-{}", status),
        }
    }
}

impl FromStr for TokenProblem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no-token" => Ok(TokenProblem::NoToken),
            "invalid-token" => Ok(TokenProblem::InvalidToken),
            "no-pro-plan" => Ok(TokenProblem::NoProPlan),
            "network-error" => Ok(TokenProblem::NetworkError),
            other => other
                .strip_prefix("api-error-")
                .and_then(|code| code.parse::<u16>().ok())
                .map(TokenProblem::ApiError)
                .ok_or_else(|| format!("unknown token error: {}", other)),
        }
    }
}

impl From<TokenProblem> for String {
    fn from(problem: TokenProblem) -> String {
        problem.to_string()
    }
}

impl TryFrom<String> for TokenProblem {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Result of a validity check: `{valid, error?, details?}` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStatus {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TokenProblem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl TokenStatus {
    pub fn valid() -> Self {
        TokenStatus {
            valid: true,
            error: None,
            details: None,
        }
    }

    pub fn invalid(problem: TokenProblem) -> Self {
        TokenStatus {
            valid: false,
            error: Some(problem),
            details: None,
        }
    }

    pub fn no_token() -> Self {
        Self::invalid(TokenProblem::NoToken)
    }

    pub fn network_error(details: impl Into<String>) -> Self {
        TokenStatus {
            valid: false,
            error: Some(TokenProblem::NetworkError),
            details: Some(details.into()),
        }
    }

    /// False only when nothing is stored; a rejected token still counts as present
    pub fn has_token(&self) -> bool {
        self.error != Some(TokenProblem::NoToken)
    }

    /// Wire string of the error, for user-facing messages
    pub fn error_label(&self) -> String {
        self.error
            .map(|problem| problem.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Classify the HTTP status of the authenticated probe request
pub fn classify_probe(status: u16) -> TokenStatus {
    match status {
        200..=299 => TokenStatus::valid(),
        401 => TokenStatus::invalid(TokenProblem::InvalidToken),
        403 => TokenStatus::invalid(TokenProblem::NoProPlan),
        other => TokenStatus::invalid(TokenProblem::ApiError(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_probe() {
        assert_eq!(classify_probe(200), TokenStatus::valid());
        assert_eq!(classify_probe(204), TokenStatus::valid());
        assert_eq!(classify_probe(401), TokenStatus::invalid(TokenProblem::InvalidToken));
        assert_eq!(classify_probe(403), TokenStatus::invalid(TokenProblem::NoProPlan));
        assert_eq!(classify_probe(500), TokenStatus::invalid(TokenProblem::ApiError(500)));
        assert_eq!(classify_probe(302), TokenStatus::invalid(TokenProblem::ApiError(302)));
    }

    #[test]
    fn test_wire_shape() {
        assert_eq!(serde_json::to_value(TokenStatus::valid()).unwrap(), json!({"valid": true}));
        assert_eq!(
            serde_json::to_value(classify_probe(500)).unwrap(),
            json!({"valid": false, "error": "api-error-500"})
        );
        assert_eq!(
            serde_json::to_value(TokenStatus::network_error("Failed to fetch")).unwrap(),
            json!({"valid": false, "error": "network-error", "details": "Failed to fetch"})
        );
    }

    #[test]
    fn test_parse_from_wire() {
        let status: TokenStatus =
            serde_json::from_value(json!({"valid": false, "error": "no-pro-plan"})).unwrap();
        assert_eq!(status, TokenStatus::invalid(TokenProblem::NoProPlan));

        let bad = serde_json::from_value::<TokenStatus>(json!({"valid": false, "error": "api-error-x"}));
        assert!(bad.is_err());
    }

    #[test]
    fn test_has_token() {
        assert!(!TokenStatus::no_token().has_token());
        assert!(TokenStatus::invalid(TokenProblem::InvalidToken).has_token());
        assert!(TokenStatus::valid().has_token());
    }

    #[test]
    fn test_error_label() {
        assert_eq!(TokenStatus::network_error("offline").error_label(), "network-error");
        assert_eq!(TokenStatus::valid().error_label(), "unknown");
    }
}
