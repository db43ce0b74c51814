use derive_more::Display;
use serde::Deserialize;

/// Failure of a single exchange with the HRMS API. Nothing is translated or
/// retried here; callers decide what the user sees.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Network, TLS or body decoding failure.
    #[display(fmt = "request to HRMS API failed: {}", _0)]
    Request(reqwest::Error),

    /// The server answered with a non-2xx status.
    #[display(fmt = "HRMS API responded {}: {}", status, body)]
    Status { status: u16, body: String },
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Request(e) => Some(e),
            ApiError::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Request(e)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Deserialize)]
struct FieldError {
    #[serde(alias = "message")]
    msg: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Server supplied explanation: the `detail` string, or the first
    /// field-validation message when `detail` is a list.
    pub fn detail(&self) -> Option<String> {
        let ApiError::Status { body, .. } = self else {
            return None;
        };

        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            Detail::Message(message) => non_blank(message),
            Detail::Fields(fields) => fields.into_iter().find_map(|f| f.msg.and_then(non_blank)),
        }
    }

    /// Message for the banner: server detail when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or_else(|| fallback.to_string())
    }
}

fn non_blank(message: String) -> Option<String> {
    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}
