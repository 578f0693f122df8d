// Client (station) listings
//
// Clients without an IP address are dropped; the rest are sorted by their
// DNS-safe name.

use crate::client::OmadaClient;
use crate::error::Error;
use crate::models::Client;
use crate::resource::SiteResource;

impl SiteResource for Client {
    const KIND: &'static str = "clients";
    const PATH: &'static str = "clients";

    fn display_name(&self) -> &str {
        &self.name
    }

    fn set_dns_name(&mut self, dns_name: String) {
        self.dns_name = dns_name;
    }

    fn sort_key(&self) -> &str {
        &self.dns_name
    }

    fn is_listable(&self) -> bool {
        self.address().is_some()
    }
}

impl OmadaClient {
    /// List clients with an IP address on one site.
    ///
    /// `GET /{controllerId}/api/v2/sites/{site}/clients?currentPage=1&currentPageSize=999`
    pub async fn list_clients(&self, site_id: &str) -> Result<Vec<Client>, Error> {
        self.list_site(site_id).await
    }

    /// List clients on the primary site.
    pub async fn clients(&self) -> Result<Vec<Client>, Error> {
        self.list_primary().await
    }

    /// List clients across every accessible site, sorted by DNS name.
    pub async fn list_all_clients(&self) -> Result<Vec<Client>, Error> {
        self.list_all().await
    }
}
