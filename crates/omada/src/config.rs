//! Profile selection and global flag overrides.
//!
//! Everything file- and env-related lives in `omada-config`; this module
//! only layers the command-line flags on top of the chosen profile.

use clap::ValueEnum;
use omada_config::{Config, ConfigError, Connection, Defaults, Profile};
use url::Url;

use omada_api::TransportConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// The profile a command runs against, with flag overrides applied.
pub struct Resolved {
    pub name: String,
    pub profile: Profile,
    pub defaults: Defaults,
}

/// Fill in `--output` from `defaults.output` when neither the flag nor
/// `OMADA_OUTPUT` chose a format.
pub fn apply_output_default(global: &mut GlobalOpts, defaults: &Defaults) -> Result<(), CliError> {
    if global.output.is_none() {
        let format = OutputFormat::from_str(&defaults.output, true).map_err(|reason| {
            CliError::Validation {
                field: "defaults.output".into(),
                reason,
            }
        })?;
        global.output = Some(format);
    }
    Ok(())
}

/// Pick the active profile and apply `--controller`, `--site`,
/// `--username`, `--insecure` and `--timeout`.
///
/// Without a matching profile, `--controller` alone is enough to build one.
pub fn resolve(global: &GlobalOpts, mut config: Config) -> Result<Resolved, CliError> {
    let name = config.active_profile_name(global.profile.as_deref());

    let mut profile = match config.profiles.remove(&name) {
        Some(profile) => profile,
        None if global.profile.is_some() && global.controller.is_none() => {
            return Err(ConfigError::ProfileNotFound {
                available: config.profile_names(),
                name,
            }
            .into());
        }
        None => {
            let controller = global.controller.clone().ok_or_else(|| CliError::NoConfig {
                path: omada_config::config_path().display().to_string(),
            })?;
            Profile::new(controller)
        }
    };

    if let Some(ref controller) = global.controller {
        profile.controller.clone_from(controller);
    }
    if let Some(ref site) = global.site {
        profile.site.clone_from(site);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok(Resolved {
        name,
        profile,
        defaults: config.defaults,
    })
}

impl Resolved {
    /// Controller URL and transport only; enough for unauthenticated calls.
    pub fn endpoint(&self) -> Result<(Url, TransportConfig), CliError> {
        let url = omada_config::parse_controller_url(&self.profile.controller)?;
        Ok((url, self.profile.transport(&self.defaults)))
    }

    /// Full login parameters, credentials included.
    pub fn connection(&self) -> Result<Connection, CliError> {
        Ok(omada_config::profile_to_connection(
            &self.profile,
            &self.defaults,
            &self.name,
        )?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["omada"];
        argv.extend_from_slice(args);
        argv.push("info");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn defaults(output: &str) -> Defaults {
        Defaults {
            output: output.into(),
            ..Defaults::default()
        }
    }

    #[test]
    fn config_output_fills_missing_flag() {
        let mut g = global(&[]);
        apply_output_default(&mut g, &defaults("json-compact")).unwrap();
        assert!(matches!(g.format(), OutputFormat::JsonCompact));
    }

    #[test]
    fn flag_beats_config_output() {
        let mut g = global(&["-o", "plain"]);
        apply_output_default(&mut g, &defaults("json")).unwrap();
        assert!(matches!(g.format(), OutputFormat::Plain));
    }

    #[test]
    fn unknown_config_output_is_rejected() {
        let mut g = global(&[]);
        let err = apply_output_default(&mut g, &defaults("yaml")).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "defaults.output"));
    }
}
