//! Command handlers.
//!
//! `info` talks to the controller without logging in; every other command
//! runs inside one authenticated session that is logged out afterwards.

mod clients;
mod devices;
mod info;
mod networks;
mod sites;

use omada_api::OmadaClient;
use tracing::warn;

use crate::cli::{Command, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;

pub async fn dispatch(
    cmd: &Command,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if matches!(cmd, Command::Info) {
        return info::handle(resolved, global).await;
    }

    let mut client = login(resolved).await?;
    let result = match cmd {
        Command::Sites => sites::handle(&client, global),
        Command::Clients(args) => clients::handle(&client, args, global).await,
        Command::Devices(args) => devices::handle(&client, args, global).await,
        Command::Networks(args) => networks::handle(&client, args, global).await,
        Command::Info | Command::Completions(_) => Ok(()),
    };

    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed");
    }
    result
}

/// Open an authenticated session for the resolved profile.
async fn login(resolved: &Resolved) -> Result<OmadaClient, CliError> {
    let conn = resolved.connection()?;
    let mut client = OmadaClient::new(conn.url, &conn.transport)?;
    client
        .authenticate(&conn.username, &conn.password, &conn.site)
        .await?;
    Ok(client)
}
