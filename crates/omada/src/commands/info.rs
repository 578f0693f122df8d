//! Controller identity.

use omada_api::{ControllerInfo, OmadaClient};

use crate::cli::GlobalOpts;
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

fn detail(info: &ControllerInfo) -> String {
    [
        format!("Controller ID:  {}", info.omadac_id),
        format!(
            "Version:        {}",
            info.controller_ver.as_deref().unwrap_or("-")
        ),
        format!("API version:    {}", info.api_ver.as_deref().unwrap_or("-")),
        format!("Configured:     {}", info.configured),
    ]
    .join("\n")
}

pub async fn handle(resolved: &Resolved, global: &GlobalOpts) -> Result<(), CliError> {
    let (url, transport) = resolved.endpoint()?;
    let mut client = OmadaClient::new(url, &transport)?;
    let info = client.resolve_controller_identity().await?;

    let out = output::render_single(global.format(), &info, detail, |i| i.omadac_id.clone())?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}
