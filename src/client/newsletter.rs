//! Newsletter subscription.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::opt_string;
use crate::{Error, Result};

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

/// Same shape check the signup form applies before posting.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubscribeRequest<'a> {
    pub email: &'a str,
}

impl<'a> SubscribeRequest<'a> {
    pub(crate) fn new(email: &'a str) -> Result<Self> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(Error::InvalidRequest(format!(
                "invalid email address: {email}"
            )));
        }
        Ok(Self { email })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    /// Missing means success; the status code already said so.
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, deserialize_with = "opt_string")]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl SubscribeResponse {
    pub(crate) fn from_body(body: Value) -> Result<Self> {
        match body {
            Value::Null => Ok(Self {
                success: true,
                message: None,
            }),
            Value::String(message) => Ok(Self {
                success: true,
                message: Some(message),
            }),
            other => Ok(serde_json::from_value(other)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("  first.last+tag@sub.example.org "));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_request_rejects_invalid() {
        assert!(matches!(
            SubscribeRequest::new("nope"),
            Err(Error::InvalidRequest(_))
        ));
        assert_eq!(SubscribeRequest::new(" a@b.co ").unwrap().email, "a@b.co");
    }

    #[test]
    fn test_response_shapes() {
        let empty = SubscribeResponse::from_body(Value::Null).unwrap();
        assert!(empty.success);

        let full =
            SubscribeResponse::from_body(json!({"success": false, "message": "Already subscribed"}))
                .unwrap();
        assert!(!full.success);
        assert_eq!(full.message.as_deref(), Some("Already subscribed"));

        let text = SubscribeResponse::from_body(json!("Thanks!")).unwrap();
        assert_eq!(text.message.as_deref(), Some("Thanks!"));
    }
}
