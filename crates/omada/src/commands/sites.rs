//! Accessible sites.

use omada_api::{OmadaClient, SiteRef};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Primary")]
    primary: String,
}

pub fn handle(client: &OmadaClient, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(scope) = client.session().sites() else {
        return Err(CliError::SessionNotReady {
            missing: "site selection".into(),
        });
    };

    let primary = scope.primary_site_id();
    let out = output::render_list(
        global.format(),
        scope.sites(),
        |s: &SiteRef| SiteRow {
            name: s.name.clone(),
            key: s.key.clone(),
            primary: if s.key == primary { "*".into() } else { String::new() },
        },
        |s| s.key.clone(),
    )?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}
