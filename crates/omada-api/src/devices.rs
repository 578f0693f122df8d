// Device listings
//
// The device endpoint returns a bare array rather than a page object.
// Devices are never filtered and sort by their raw name.

use crate::client::OmadaClient;
use crate::error::Error;
use crate::models::Device;
use crate::resource::SiteResource;

impl SiteResource for Device {
    const KIND: &'static str = "devices";
    const PATH: &'static str = "devices";

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
    /// List devices on one site.
    ///
    /// `GET /{controllerId}/api/v2/sites/{site}/devices?currentPage=1&currentPageSize=999`
    pub async fn list_devices(&self, site_id: &str) -> Result<Vec<Device>, Error> {
        self.list_site(site_id).await
    }

    /// List devices on the primary site.
    pub async fn devices(&self) -> Result<Vec<Device>, Error> {
        self.list_primary().await
    }

    /// List devices across every accessible site, sorted by name.
    pub async fn list_all_devices(&self) -> Result<Vec<Device>, Error> {
        self.list_all().await
    }
}
