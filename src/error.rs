use crate::api::{Operation, Section};

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    /// No response reached the client (connect failure, timeout).
    #[error("network error calling {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {endpoint}: {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// The backend exposes no such endpoint for this section.
    #[error("{operation} not implemented for section type: {section}")]
    Unsupported { section: Section, operation: Operation },
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            RemoteError::Network { endpoint, .. }
            | RemoteError::Http { endpoint, .. }
            | RemoteError::Decode { endpoint, .. } => Some(endpoint),
            RemoteError::Unsupported { .. } => None,
        }
    }

    /// The backend or transport message, without the endpoint prefix.
    pub fn detail(&self) -> Option<&str> {
        match self {
            RemoteError::Network { message, .. }
            | RemoteError::Http { message, .. }
            | RemoteError::Decode { message, .. } => Some(message),
            RemoteError::Unsupported { .. } => None,
        }
    }
}

/// Failure surfaced by the section CRUD accessor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SectionError {
    #[error("{operation} not implemented for section type: {section}")]
    Unsupported { section: Section, operation: Operation },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let err = RemoteError::Http {
            status: 503,
            endpoint: "/portfolio/akshaj".into(),
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.endpoint(), Some("/portfolio/akshaj"));
        assert_eq!(err.to_string(), "HTTP 503 from /portfolio/akshaj: Service Unavailable");
        assert_eq!(err.detail(), Some("Service Unavailable"));
    }

    #[test]
    fn test_unsupported_message() {
        let err = SectionError::Unsupported {
            section: Section::Education,
            operation: Operation::Update,
        };
        assert_eq!(err.to_string(), "Update not implemented for section type: education");
    }
}
