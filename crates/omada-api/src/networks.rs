// LAN network listings

use crate::client::OmadaClient;
use crate::error::Error;
use crate::models::Network;
use crate::resource::SiteResource;

impl SiteResource for Network {
    const KIND: &'static str = "networks";
    const PATH: &'static str = "setting/lan/networks";

    fn display_name(&self) -> &str {
        &self.name
    }

    fn set_dns_name(&mut self, dns_name: String) {
        self.dns_name = dns_name;
    }

    fn sort_key(&self) -> &str {
        &self.name
    }
}

impl OmadaClient {
    /// List LAN networks on one site.
    ///
    /// `GET /{controllerId}/api/v2/sites/{site}/setting/lan/networks?currentPage=1&currentPageSize=999`
    pub async fn list_networks(&self, site_id: &str) -> Result<Vec<Network>, Error> {
        self.list_site(site_id).await
    }

    pub async fn networks(&self) -> Result<Vec<Network>, Error> {
        self.list_primary().await
    }

    pub async fn list_all_networks(&self) -> Result<Vec<Network>, Error> {
        self.list_all().await
    }
}
