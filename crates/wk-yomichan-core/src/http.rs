//! Shared HTTP client and runtime.
//!
//! Uses async reqwest internally but presents a blocking interface: callers
//! drive requests through [`SHARED_RUNTIME`] with `block_on`.

use std::sync::LazyLock;

/// Error types for HTTP operations
#[derive(Debug)]
pub enum HttpError {
    /// Transport or status error with optional status code
    Http {
        status: Option<u16>,
        message: String,
    },
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create HTTP error from reqwest error.
    ///
    /// The request URL is stripped: query strings may carry subject ids and
    /// the message ends up in user-facing logs.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
        }
    }

    /// 401 means the API key was rejected
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("wk-yomichan/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared single-threaded tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

#[cfg(test)]
mod tests {
    use super::*;

    fn http_err(status: u16) -> HttpError {
        HttpError::Http {
            status: Some(status),
            message: "test".to_string(),
        }
    }

    #[test]
    fn display_http_with_status() {
        assert_eq!(format!("{}", http_err(404)), "HTTP 404: test");
    }

    #[test]
    fn display_http_without_status() {
        let err = HttpError::Http {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: connection refused");
    }

    #[test]
    fn unauthorized_only_for_401() {
        assert!(http_err(401).is_unauthorized());
        assert!(!http_err(403).is_unauthorized());
        let transport = HttpError::Http {
            status: None,
            message: "reset".to_string(),
        };
        assert!(!transport.is_unauthorized());
    }

    #[test]
    fn status_is_exposed() {
        assert_eq!(http_err(500).status(), Some(500));
    }
}
