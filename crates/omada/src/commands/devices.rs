//! Device listing.

use omada_api::{Device, OmadaClient};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output::{self, or_dash};

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "DNS Name")]
    dns_name: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "State")]
    state: &'static str,
}

fn state(category: Option<i32>) -> &'static str {
    match category {
        Some(0) => "disconnected",
        Some(1) => "connected",
        Some(2) => "pending",
        _ => "-",
    }
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.name.clone(),
            dns_name: d.dns_name().to_owned(),
            device_type: d.device_type.clone(),
            model: or_dash(d.model.as_deref()),
            ip: or_dash(d.ip.as_deref()),
            mac: d.mac.clone(),
            state: state(d.status_category),
        }
    }
}

pub async fn handle(
    client: &OmadaClient,
    args: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = if args.all_sites {
        client.list_all_devices().await?
    } else {
        client.devices().await?
    };

    let out = output::render_list(global.format(), &devices, |d| DeviceRow::from(d), |d| {
        d.mac.clone()
    })?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}
