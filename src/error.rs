//! Classified failures for Meetup API calls.

use serde_json::Value;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong with a single API call.
///
/// Variants are mutually exclusive and terminal: the client never retries,
/// so every failure reaches the caller exactly as it was classified.
#[derive(Debug)]
pub enum Error {
    /// A `:name` placeholder in a path template had no matching parameter.
    /// Raised before any network I/O happens.
    MissingParameter { name: String, template: String },
    /// The request never produced a response (connection, DNS, timeout).
    Transport { url: String, message: String },
    /// The response body was not valid JSON.
    Decode { url: String, reason: DecodeReason },
    /// The service answered with a non-200 status and a decoded JSON error
    /// body. `message` follows the service's own error shapes: OAuth-style
    /// `error`/`error_description`, resource-style `code`/`problem`/`details`,
    /// or a bare `Status <code>` fallback.
    Api { status: u16, message: String },
    /// A pagination follow-up was requested from a response that carries no
    /// `meta.next` cursor.
    InvalidResponse { message: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingParameter { name, template } => {
                write!(f, "missing parameter '{}' for path '{}'", name, template)
            }
            Error::Transport { url, message } => {
                write!(f, "failed retrieving '{}': {}", url, message)
            }
            Error::Decode { url, reason } => {
                write!(f, "cannot read response from '{}': {}", url, reason)
            }
            Error::Api { status, message } => {
                write!(f, "request rejected with status {}: {}", status, message)
            }
            Error::InvalidResponse { message } => {
                write!(f, "invalid response: {}", message)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Decoder-reported reason for a JSON parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeReason {
    /// No reason was reported.
    Unspecified,
    /// Maximum nesting depth exceeded.
    MaxDepthExceeded,
    /// Underflow: the document ended while structures were still open.
    StateMismatch,
    /// Unexpected control character inside a string.
    ControlCharacter,
    /// Malformed JSON.
    Syntax,
    /// Malformed UTF-8 in the response body.
    InvalidUtf8,
    /// Anything the decoder could not attribute further.
    Unknown,
}

impl DecodeReason {
    /// Recovers a reason code from a `serde_json` error. serde_json folds
    /// most conditions into its `Syntax` category, so the finer-grained
    /// reasons come from the error text.
    pub(crate) fn classify(err: &serde_json::Error) -> Self {
        let text = err.to_string();
        if text.contains("recursion limit") {
            return DecodeReason::MaxDepthExceeded;
        }
        if text.contains("control character") {
            return DecodeReason::ControlCharacter;
        }
        if text.contains("invalid unicode code point") || text.contains("UTF-8") {
            return DecodeReason::InvalidUtf8;
        }
        match err.classify() {
            serde_json::error::Category::Eof => DecodeReason::StateMismatch,
            serde_json::error::Category::Syntax => DecodeReason::Syntax,
            serde_json::error::Category::Data => DecodeReason::Unspecified,
            serde_json::error::Category::Io => DecodeReason::Unknown,
        }
    }
}

impl std::fmt::Display for DecodeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DecodeReason::Unspecified => "no decoder error reported",
            DecodeReason::MaxDepthExceeded => "maximum nesting depth exceeded",
            DecodeReason::StateMismatch => "underflow or truncated document",
            DecodeReason::ControlCharacter => "unexpected control character",
            DecodeReason::Syntax => "syntax error, malformed JSON",
            DecodeReason::InvalidUtf8 => "malformed UTF-8 characters",
            DecodeReason::Unknown => "unknown decode error",
        };
        f.write_str(text)
    }
}

/// Derives the human-readable message for a non-200 response from the shape
/// of its decoded body. OAuth errors win over resource errors; a body that
/// matches neither yields the bare status.
pub(crate) fn api_message(body: &Value, status: u16) -> String {
    if let (Some(error), Some(description)) = (body.get("error"), body.get("error_description")) {
        return format!("{} - {}", field_text(error), field_text(description));
    }
    if let (Some(code), Some(problem), Some(details)) =
        (body.get("code"), body.get("problem"), body.get("details"))
    {
        return format!("{} - {} - {}", field_text(code), field_text(problem), field_text(details));
    }
    format!("Status {}", status)
}

/// Renders a JSON field without quoting strings.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
