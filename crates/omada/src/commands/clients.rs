//! Client listing.

use omada_api::{Client, OmadaClient};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output::{self, or_dash};

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "DNS Name")]
    dns_name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "SSID")]
    ssid: String,
}

impl From<&Client> for ClientRow {
    fn from(c: &Client) -> Self {
        Self {
            name: c.name.clone(),
            dns_name: c.dns_name().to_owned(),
            ip: or_dash(c.address()),
            mac: c.mac.clone(),
            network: or_dash(c.network_name.as_deref()),
            ssid: or_dash(c.ssid.as_deref()),
        }
    }
}

pub async fn handle(
    client: &OmadaClient,
    args: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let clients = if args.all_sites {
        client.list_all_clients().await?
    } else {
        client.clients().await?
    };

    let out = output::render_list(global.format(), &clients, |c| ClientRow::from(c), |c| {
        c.dns_name().to_owned()
    })?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}
