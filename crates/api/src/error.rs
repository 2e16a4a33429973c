use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Field validation messages reported by the service with status 422.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationErrors {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn has(&self, field: &str, message: &str) -> bool {
        self.errors
            .get(field)
            .is_some_and(|messages| messages.iter().any(|m| m == message))
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.get(field).is_some_and(|m| !m.is_empty())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        if first {
            f.write_str(self.message.as_deref().unwrap_or("invalid request"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Service unreachable: {0}")]
    Unreachable(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Not authenticated with the service")]
    Unauthenticated,
    #[error("Missing privileges for this operation")]
    Unauthorized,
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    pub fn is_network(&self) -> bool {
        matches!(self, RemoteError::Unreachable(_) | RemoteError::Timeout)
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout
        } else if err.is_decode() {
            RemoteError::InvalidResponse(err.to_string())
        } else {
            RemoteError::Unreachable(err.to_string())
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
