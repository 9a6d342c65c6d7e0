use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// RFC 7807 error body returned by both backends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// The human-readable message: `title`, else `detail`. Empty strings count as absent.
    pub fn message(&self) -> Option<&str> {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.detail.as_deref().filter(|d| !d.is_empty()))
    }
}

/// Problem details carrying per-field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationProblemDetails {
    #[serde(flatten)]
    pub problem: ProblemDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_precedence() {
        let both: ProblemDetails = serde_json::from_str(r#"{"title":"Bad","detail":"oops"}"#).unwrap();
        assert_eq!(both.message(), Some("Bad"));

        let detail_only: ProblemDetails = serde_json::from_str(r#"{"detail":"oops"}"#).unwrap();
        assert_eq!(detail_only.message(), Some("oops"));

        let empty_title: ProblemDetails = serde_json::from_str(r#"{"title":"","detail":"oops"}"#).unwrap();
        assert_eq!(empty_title.message(), Some("oops"));

        assert_eq!(ProblemDetails::default().message(), None);
    }

    #[test]
    fn test_validation_problem_details() {
        let body = r#"{
            "type": "https://tools.ietf.org/html/rfc9110#section-15.5.1",
            "title": "One or more validation errors occurred.",
            "status": 400,
            "errors": { "Name": ["The Name field is required."] }
        }"#;
        let parsed: ValidationProblemDetails = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.problem.status, Some(400));
        assert_eq!(parsed.problem.message(), Some("One or more validation errors occurred."));
        assert_eq!(parsed.errors.unwrap()["Name"].len(), 1);
    }
}
