//! Shared configuration for Omada tools.
//!
//! TOML profiles, `OMADA_*` environment overrides, credential resolution
//! (env + plaintext), and translation to an [`omada_api::TransportConfig`]
//! plus the login parameters a session needs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use omada_api::{TlsMode, TransportConfig};

/// Username for session login.
pub const USERNAME_ENV: &str = "OMADA_USERNAME";
/// Password for session login.
pub const PASSWORD_ENV: &str = "OMADA_PASSWORD";
/// Boolean toggle that disables certificate verification.
pub const DISABLE_TLS_VERIFY_ENV: &str = "OMADA_DISABLE_HTTPS_VERIFICATION";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// The profile to use: the requested one, else `default_profile`,
    /// else `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.profile_names(),
            })
    }

    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        names.sort();
        names
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named controller profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Controller base URL (e.g., "https://10.0.0.10").
    pub controller: String,

    /// Primary site name, matched exactly against the privilege list.
    #[serde(default = "default_site")]
    pub site: String,

    /// Username for session login.
    pub username: Option<String>,

    /// Plaintext password. `OMADA_PASSWORD` takes precedence.
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

fn default_site() -> String {
    "Default".into()
}

impl Profile {
    /// A profile for `controller` with every other field defaulted.
    pub fn new(controller: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            site: default_site(),
            username: None,
            password: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }

    /// Transport for this profile, falling back to `defaults`.
    pub fn transport(&self, defaults: &Defaults) -> TransportConfig {
        build_transport(
            self.insecure.unwrap_or(defaults.insecure),
            self.ca_cert.as_deref(),
            self.timeout.unwrap_or(defaults.timeout),
        )
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "omada-rs", "omada").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("omada");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file. Layering: defaults, then the TOML file (if
/// present), then `OMADA_*` env vars with `__` separating nested keys
/// (`OMADA_DEFAULTS__TIMEOUT=5`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("OMADA_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Environment toggles ─────────────────────────────────────────────

/// Parse a boolean the way Go's `strconv.ParseBool` does.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Whether `OMADA_DISABLE_HTTPS_VERIFICATION` asks to skip certificate
/// checks. Unset or unparseable values keep verification on.
pub fn https_verification_disabled() -> bool {
    std::env::var(DISABLE_TLS_VERIFY_ENV)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(false)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve username + password for session login.
///
/// `OMADA_USERNAME` / `OMADA_PASSWORD` win over the profile's values.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let username = std::env::var(USERNAME_ENV)
        .ok()
        .filter(|u| !u.is_empty())
        .or_else(|| profile.username.clone())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok((username, SecretString::from(pw)));
    }

    if let Some(ref pw) = profile.password {
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Translation ─────────────────────────────────────────────────────

/// Build the transport for a controller.
///
/// `insecure` wins over a CA path; `OMADA_DISABLE_HTTPS_VERIFICATION`
/// forces insecure on.
pub fn build_transport(insecure: bool, ca_cert: Option<&Path>, timeout_secs: u64) -> TransportConfig {
    let tls = if insecure || https_verification_disabled() {
        TlsMode::DangerAcceptInvalid
    } else if let Some(path) = ca_cert {
        TlsMode::CustomCa(path.to_path_buf())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(timeout_secs),
        cookie_jar: None,
    }
}

/// Everything needed to open an authenticated session.
#[derive(Debug)]
pub struct Connection {
    pub url: Url,
    pub site: String,
    pub username: String,
    pub password: SecretString,
    pub transport: TransportConfig,
}

/// Parse and validate a controller URL.
pub fn parse_controller_url(raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {raw}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "controller".into(),
            reason: format!("expected an http(s) URL, got scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// Build a `Connection` from a profile and the global defaults.
pub fn profile_to_connection(
    profile: &Profile,
    defaults: &Defaults,
    profile_name: &str,
) -> Result<Connection, ConfigError> {
    let url = parse_controller_url(&profile.controller)?;
    let (username, password) = resolve_credentials(profile, profile_name)?;

    Ok(Connection {
        url,
        site: profile.site.clone(),
        username,
        password,
        transport: profile.transport(defaults),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn profile(controller: &str) -> Profile {
        Profile::new(controller)
    }

    #[test]
    fn parse_bool_matches_go_semantics() {
        for v in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        for v in ["", "yes", "on", "tRUE", "2"] {
            assert_eq!(parse_bool(v), None, "{v}");
        }
    }

    #[test]
    fn loads_profiles_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "home"

                [defaults]
                timeout = 10

                [profiles.home]
                controller = "https://10.0.0.10"
                site = "Home"
                username = "admin"
                insecure = true
                "#,
            )?;

            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(config.active_profile_name(None), "home");
            assert_eq!(config.defaults.timeout, 10);
            assert_eq!(config.defaults.output, "table");

            let home = config.profile("home").unwrap();
            assert_eq!(home.site, "Home");
            assert_eq!(home.insecure, Some(true));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[defaults]\ntimeout = 10\n")?;
            jail.set_env("OMADA_DEFAULTS__TIMEOUT", "5");
            jail.set_env("OMADA_DEFAULT_PROFILE", "lab");

            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(config.defaults.timeout, 5);
            assert_eq!(config.active_profile_name(None), "lab");
            assert_eq!(config.active_profile_name(Some("other")), "other");
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = load_config_from(Path::new("absent.toml")).unwrap();
            assert!(config.profiles.is_empty());
            assert_eq!(config.active_profile_name(None), "default");
            Ok(())
        });
    }

    #[test]
    fn unknown_profile_lists_available() {
        let mut config = Config::default();
        config
            .profiles
            .insert("home".into(), profile("https://10.0.0.10"));

        match config.profile("office") {
            Err(ConfigError::ProfileNotFound { name, available }) => {
                assert_eq!(name, "office");
                assert_eq!(available, vec!["home"]);
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn credentials_prefer_env_password() {
        Jail::expect_with(|jail| {
            jail.set_env(PASSWORD_ENV, "from-env");
            let mut p = profile("https://10.0.0.10");
            p.username = Some("admin".into());
            p.password = Some("from-file".into());

            let (user, pass) = resolve_credentials(&p, "home").unwrap();
            assert_eq!(user, "admin");
            assert_eq!(pass.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn credentials_fall_back_to_profile() {
        Jail::expect_with(|jail| {
            let mut p = profile("https://10.0.0.10");
            p.username = Some("admin".into());
            p.password = Some("pw".into());

            let (user, pass) = resolve_credentials(&p, "home").unwrap();
            assert_eq!(user, "admin");
            assert_eq!(pass.expose_secret(), "pw");

            jail.set_env(USERNAME_ENV, "operator");
            let (user, _) = resolve_credentials(&p, "home").unwrap();
            assert_eq!(user, "operator");
            Ok(())
        });
    }

    #[test]
    fn missing_credentials_is_error() {
        Jail::expect_with(|_jail| {
            let p = profile("https://10.0.0.10");
            let err = resolve_credentials(&p, "home").unwrap_err();
            assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "home"));
            Ok(())
        });
    }

    #[test]
    fn env_toggle_disables_verification() {
        Jail::expect_with(|jail| {
            let ca = Path::new("/etc/omada/ca.pem");
            assert_eq!(
                build_transport(false, Some(ca), 30).tls,
                TlsMode::CustomCa(ca.to_path_buf())
            );

            jail.set_env(DISABLE_TLS_VERIFY_ENV, "true");
            let transport = build_transport(false, Some(ca), 12);
            assert_eq!(transport.tls, TlsMode::DangerAcceptInvalid);
            assert_eq!(transport.timeout, Duration::from_secs(12));

            jail.set_env(DISABLE_TLS_VERIFY_ENV, "nonsense");
            assert_eq!(build_transport(false, None, 30).tls, TlsMode::System);
            Ok(())
        });
    }

    #[test]
    fn profile_translates_to_connection() {
        Jail::expect_with(|jail| {
            jail.set_env(PASSWORD_ENV, "pw");
            let mut p = profile("https://omada.lan:8043");
            p.username = Some("admin".into());
            p.timeout = Some(7);

            let conn = profile_to_connection(&p, &Defaults::default(), "home").unwrap();
            assert_eq!(conn.url.as_str(), "https://omada.lan:8043/");
            assert_eq!(conn.site, "Default");
            assert_eq!(conn.transport.timeout, Duration::from_secs(7));
            assert_eq!(conn.transport.tls, TlsMode::System);
            Ok(())
        });
    }

    #[test]
    fn rejects_non_http_controller() {
        let err = parse_controller_url("ftp://10.0.0.10").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(parse_controller_url("not a url").is_err());
    }

    #[test]
    fn config_path_ends_with_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path();
        assert!(path.ends_with("config.toml"));
        // An unrelated empty directory has no config to load.
        let loaded = load_config_from(&dir.path().join("config.toml"));
        assert!(loaded.is_ok());
    }
}
