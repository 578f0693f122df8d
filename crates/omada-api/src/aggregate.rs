// Multi-site aggregation
//
// Runs a site-scoped fetch for every accessible site, one after another,
// and merges the results.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::Error;

/// Fetch from each site in order and merge into one sorted list.
///
/// Fail-fast: the first site that errors aborts the whole call and the
/// records gathered from earlier sites are dropped. There is no
/// partial-success mode. The merged list is sorted once at the end with a
/// stable sort on `sort_key`, the same key the single-site fetch uses.
pub async fn fetch_all_sites<'a, T, F, Fut>(
    site_ids: &'a [String],
    mut fetch: F,
    sort_key: fn(&T) -> &str,
) -> Result<Vec<T>, Error>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<Vec<T>, Error>>,
{
    let mut merged = Vec::new();

    for site_id in site_ids {
        let mut batch = fetch(site_id).await.inspect_err(|e| {
            warn!(site = %site_id, error = %e, "site fetch failed; aborting aggregation");
        })?;
        debug!(site = %site_id, count = batch.len(), "site fetched");
        merged.append(&mut batch);
    }

    merged.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
    Ok(merged)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::future::ready;

    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(sites: &[&str]) -> Vec<String> {
        sites.iter().map(|s| (*s).to_owned()).collect()
    }

    #[allow(clippy::ptr_arg)]
    fn name(s: &String) -> &str {
        s
    }

    fn first(pair: &(String, String)) -> &str {
        &pair.0
    }

    #[tokio::test]
    async fn merges_and_sorts_across_sites() {
        let sites = ids(&["A", "B"]);
        let merged = fetch_all_sites(
            &sites,
            |site| {
                ready(Ok(match site {
                    "A" => vec!["zeta".to_owned(), "alpha".to_owned()],
                    _ => vec!["mid".to_owned()],
                }))
            },
            name,
        )
        .await
        .unwrap();

        assert_eq!(merged, vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn visits_sites_in_order() {
        let sites = ids(&["A", "B", "C"]);
        let visited = RefCell::new(Vec::new());
        fetch_all_sites(
            &sites,
            |site| {
                visited.borrow_mut().push(site.to_owned());
                ready(Ok(Vec::<String>::new()))
            },
            name,
        )
        .await
        .unwrap();

        assert_eq!(visited.into_inner(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn first_failure_discards_everything() {
        let sites = ids(&["A", "B", "C"]);
        let visited = RefCell::new(Vec::new());
        let result = fetch_all_sites(
            &sites,
            |site| {
                visited.borrow_mut().push(site.to_owned());
                ready(if site == "B" {
                    Err(Error::Http {
                        status: 500,
                        url: format!("https://omada.local/sites/{site}"),
                    })
                } else {
                    Ok(vec![format!("from-{site}")])
                })
            },
            name,
        )
        .await;

        assert!(matches!(result, Err(Error::Http { status: 500, .. })));
        assert_eq!(visited.into_inner(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn no_sites_is_empty() {
        let merged = fetch_all_sites(&[], |_| ready(Ok(vec!["x".to_owned()])), name)
            .await
            .unwrap();
        assert!(merged.is_empty());
    }

    #[tokio::test]
    async fn sort_is_stable_for_equal_keys() {
        let sites = ids(&["A", "B"]);
        let merged = fetch_all_sites(
            &sites,
            |site| ready(Ok(vec![("same".to_owned(), site.to_owned())])),
            first,
        )
        .await
        .unwrap();

        let origins: Vec<&str> = merged.iter().map(|p| p.1.as_str()).collect();
        assert_eq!(origins, vec!["A", "B"]);
    }
}
