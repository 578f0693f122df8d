use thiserror::Error;

/// Top-level error type for the `omada-api` crate.
///
/// Variants group into the failure classes callers branch on:
/// transport (the request never produced a response), protocol (a response
/// arrived but was not the one we expected), authentication, and site
/// resolution. Nothing in this crate retries; every error is terminal for
/// the call that produced it.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The controller rejected the login with a non-zero `errorCode`.
    #[error("Authentication failed (code {code}): {message}")]
    Authentication { code: i64, message: String },

    /// A call needed session state that has not been established yet.
    #[error("Not authenticated: {missing} has not been resolved")]
    NotAuthenticated { missing: &'static str },

    // ── Site resolution ─────────────────────────────────────────────
    /// The named site is absent from the account's privilege list.
    #[error("Site not found: {name}")]
    SiteNotFound { name: String, available: Vec<String> },

    /// The account's privilege list contains no sites at all.
    #[error("Account has no accessible sites")]
    NoSites,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// The controller answered with a non-2xx status.
    #[error("Unexpected HTTP status {status} from {url}")]
    Http { status: u16, url: String },

    /// Non-zero `errorCode` in the `{errorCode, msg, result}` envelope.
    #[error("Controller API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::InvalidUrl(_) | Self::Tls(_))
    }

    /// Returns `true` if the controller answered with something unexpected.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Api { .. } | Self::Deserialization { .. }
        )
    }

    /// Returns `true` for authentication and missing-session errors.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::NotAuthenticated { .. }
        )
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SiteNotFound { .. } | Self::Http { status: 404, .. })
    }

    /// The controller's application-level error code, if any.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Authentication { code, .. } | Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
