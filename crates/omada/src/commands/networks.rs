//! LAN network listing.

use omada_api::{Network, OmadaClient};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output::{self, or_dash};

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "DNS Name")]
    dns_name: String,
    #[tabled(rename = "Subnet")]
    subnet: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Purpose")]
    purpose: String,
}

impl From<&Network> for NetworkRow {
    fn from(n: &Network) -> Self {
        Self {
            name: n.name.clone(),
            dns_name: n.dns_name().to_owned(),
            subnet: or_dash(n.subnet.as_deref()),
            vlan: n.vlan.map_or_else(|| "-".into(), |v| v.to_string()),
            domain: or_dash(n.domain.as_deref()),
            purpose: or_dash(n.purpose.as_deref()),
        }
    }
}

pub async fn handle(
    client: &OmadaClient,
    args: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let networks = if args.all_sites {
        client.list_all_networks().await?
    } else {
        client.networks().await?
    };

    let out = output::render_list(global.format(), &networks, |n| NetworkRow::from(n), |n| {
        n.name.clone()
    })?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}
