//! CLI error types with miette diagnostics.
//!
//! Maps library and config errors into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use omada_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(omada::connection_failed),
        help(
            "Check that the controller is running and accessible.\n\
             URL: {url}\n\
             Try: omada info --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(omada::tls_error),
        help(
            "Omada controllers usually ship a self-signed certificate.\n\
             Use --insecure (-k), set OMADA_DISABLE_HTTPS_VERIFICATION=true,\n\
             or configure ca_cert in your profile."
        )
    )]
    TlsError { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(omada::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Login rejected by controller ({code}): {message}")]
    #[diagnostic(
        code(omada::auth_failed),
        help("Verify OMADA_USERNAME / OMADA_PASSWORD or the profile's credentials.")
    )]
    AuthFailed { code: i64, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(omada::no_credentials),
        help(
            "Set OMADA_USERNAME and OMADA_PASSWORD,\n\
             or add username/password to the profile in your config file."
        )
    )]
    NoCredentials { profile: String },

    #[error("Session is not ready: missing {missing}")]
    #[diagnostic(code(omada::session))]
    SessionNotReady { missing: String },

    // ── Sites ────────────────────────────────────────────────────────

    #[error("Site '{name}' not found")]
    #[diagnostic(
        code(omada::site_not_found),
        help("Available sites: {available}\nRun: omada sites")
    )]
    SiteNotFound { name: String, available: String },

    #[error("The account has access to no sites")]
    #[diagnostic(
        code(omada::no_sites),
        help("Grant the user a site privilege on the controller.")
    )]
    NoSites,

    // ── Protocol ─────────────────────────────────────────────────────

    #[error("HTTP {status} from {url}")]
    #[diagnostic(code(omada::http))]
    Http { status: u16, url: String },

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(omada::api_error))]
    ApiError { code: i64, message: String },

    #[error("Unexpected response from controller: {message}")]
    #[diagnostic(code(omada::protocol))]
    Protocol { message: String },

    // ── Validation / Configuration ───────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(omada::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(code(omada::profile_not_found), help("Available profiles: {available}"))]
    ProfileNotFound { name: String, available: String },

    #[error("No controller configured")]
    #[diagnostic(
        code(omada::no_config),
        help(
            "Pass --controller (or OMADA_CONTROLLER), or create a profile.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(omada::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not serialize output: {0}")]
    #[diagnostic(code(omada::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } | Self::SessionNotReady { .. } => {
                exit_code::AUTH
            }
            Self::Http { status, .. } => match status {
                401 => exit_code::AUTH,
                403 => exit_code::PERMISSION,
                404 => exit_code::NOT_FOUND,
                _ => exit_code::GENERAL,
            },
            Self::SiteNotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::NoSites => exit_code::PERMISSION,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── omada_api::Error → CliError ──────────────────────────────────────

impl From<omada_api::Error> for CliError {
    fn from(err: omada_api::Error) -> Self {
        use omada_api::Error;

        match err {
            Error::Transport(e) if e.is_timeout() => CliError::Timeout,
            Error::Transport(e) => CliError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },
            Error::Tls(reason) => CliError::TlsError { reason },
            Error::InvalidUrl(e) => CliError::Validation {
                field: "controller".into(),
                reason: e.to_string(),
            },
            Error::Authentication { code, message } => CliError::AuthFailed { code, message },
            Error::NotAuthenticated { missing } => CliError::SessionNotReady {
                missing: missing.into(),
            },
            Error::SiteNotFound { name, available } => CliError::SiteNotFound {
                name,
                available: available.join(", "),
            },
            Error::NoSites => CliError::NoSites,
            Error::Http { status, url } => CliError::Http { status, url },
            Error::Api { code, message } => CliError::ApiError { code, message },
            Error::Deserialization { message, .. } => CliError::Protocol { message },
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::ProfileNotFound { name, available } => CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Figment(e) => CliError::Config(e),
        }
    }
}
