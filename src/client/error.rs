//! Permissive decoding of non-2xx response bodies.

use serde::Deserialize;

use crate::Error;

/// Error body as returned by the API: `{"error": "..."}`,
/// `{"error": {"message": "...", "type": "..."}}` or `{"message": "..."}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorResponse {
    error: Option<ErrorField>,
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Text(String),
    Detail {
        #[serde(default)]
        message: Option<String>,
        #[serde(default, rename = "type")]
        error_type: Option<String>,
    },
}

impl ErrorResponse {
    /// Never fails; unreadable bodies yield an empty response.
    pub(crate) fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub(crate) fn into_error(self, status: reqwest::StatusCode) -> Error {
        let (detail_message, detail_type) = match self.error {
            Some(ErrorField::Text(text)) => (Some(text), None),
            Some(ErrorField::Detail {
                message,
                error_type,
            }) => (message, error_type),
            None => (None, None),
        };

        let message = self
            .message
            .or(detail_message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        Error::Api {
            message,
            status: Some(status.as_u16()),
            error_type: detail_type.or(self.error_type),
        }
    }
}
