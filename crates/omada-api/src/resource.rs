// Site-scoped listing shared by clients, devices and networks.
//
// One request per site for the first page of up to PAGE_SIZE rows; more
// rows than that per site are not fetched.

use tracing::{debug, warn};

use crate::aggregate::fetch_all_sites;
use crate::client::OmadaClient;
use crate::dns::dns_safe_name;
use crate::error::Error;
use crate::models::Listing;

/// Rows requested per site.
pub(crate) const PAGE_SIZE: u32 = 999;

/// An entity listed per site.
pub(crate) trait SiteResource: serde::de::DeserializeOwned {
    /// Label used in logs.
    const KIND: &'static str;
    /// Path below `sites/{site}/`.
    const PATH: &'static str;

    /// Name the DNS label is derived from.
    fn display_name(&self) -> &str;

    fn set_dns_name(&mut self, dns_name: String);

    /// Key the listing is sorted by.
    fn sort_key(&self) -> &str;

    /// Whether a fetched record is kept.
    fn is_listable(&self) -> bool {
        true
    }
}

impl OmadaClient {
    /// Fetch, filter, name and sort one site's records.
    pub(crate) async fn list_site<R: SiteResource>(&self, site_id: &str) -> Result<Vec<R>, Error> {
        self.session().require_sites()?;
        let url = self.site_url(site_id, R::PATH)?;
        let request = self
            .authorize(self.get(url))?
            .query(&[("currentPage", 1), ("currentPageSize", PAGE_SIZE)]);

        let listing: Listing<R> = self.send(request).await?.into_result()?;
        if let Some(total) = listing.total_rows().filter(|&t| t > u64::from(PAGE_SIZE)) {
            warn!(
                kind = R::KIND,
                site = site_id,
                total,
                "site has more rows than one page; only the first {PAGE_SIZE} are listed"
            );
        }

        let mut items = listing.into_items();
        let fetched = items.len();
        items.retain(R::is_listable);
        if items.len() < fetched {
            warn!(
                kind = R::KIND,
                site = site_id,
                dropped = fetched - items.len(),
                "dropped records without an address"
            );
        }

        for item in &mut items {
            let dns_name = dns_safe_name(item.display_name());
            item.set_dns_name(dns_name);
        }
        items.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));

        debug!(kind = R::KIND, site = site_id, count = items.len(), "listed");
        Ok(items)
    }

    /// One site's records for the primary site.
    pub(crate) async fn list_primary<R: SiteResource>(&self) -> Result<Vec<R>, Error> {
        let scope = self.session().require_sites()?;
        self.list_site(scope.primary_site_id()).await
    }

    /// Every accessible site's records, merged.
    pub(crate) async fn list_all<R: SiteResource>(&self) -> Result<Vec<R>, Error> {
        let scope = self.session().require_sites()?;
        fetch_all_sites(scope.site_ids(), |site| self.list_site::<R>(site), R::sort_key).await
    }
}
