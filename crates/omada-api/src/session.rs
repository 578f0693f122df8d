// Session state
//
// Everything the authentication flow learns about the controller: its id,
// the bearer token, and the sites the account may access. Only the flow in
// `auth.rs` writes these fields.

use secrecy::SecretString;
use serde::Serialize;
use url::Url;

use crate::error::Error;
use crate::models::SiteRef;

/// Authenticated state for one controller.
///
/// Fields fill in as the flow progresses: `controller_id` after the identity
/// lookup, `token` after login, `sites` after site resolution. A new login
/// clears token and sites first, so a failed login never leaves a stale
/// token behind.
///
/// The token's lifetime is not known and no refresh endpoint is wired up.
/// When the controller stops accepting it, run the whole flow again.
#[derive(Debug)]
pub struct Session {
    base_url: Url,
    controller_id: Option<String>,
    token: Option<SecretString>,
    sites: Option<SiteScope>,
}

impl Session {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            controller_id: None,
            token: None,
            sites: None,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn controller_id(&self) -> Option<&str> {
        self.controller_id.as_deref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn sites(&self) -> Option<&SiteScope> {
        self.sites.as_ref()
    }

    /// Whether site-scoped fetches may be issued.
    pub fn is_ready(&self) -> bool {
        self.controller_id.is_some() && self.token.is_some() && self.sites.is_some()
    }

    // ── Requirements ─────────────────────────────────────────────────

    pub(crate) fn require_controller_id(&self) -> Result<&str, Error> {
        self.controller_id
            .as_deref()
            .ok_or(Error::NotAuthenticated {
                missing: "controller id",
            })
    }

    pub(crate) fn require_token(&self) -> Result<&SecretString, Error> {
        self.token
            .as_ref()
            .ok_or(Error::NotAuthenticated { missing: "token" })
    }

    pub(crate) fn require_sites(&self) -> Result<&SiteScope, Error> {
        self.sites
            .as_ref()
            .ok_or(Error::NotAuthenticated { missing: "site list" })
    }

    // ── Mutation (authentication flow only) ──────────────────────────

    /// Record the controller id. A different id invalidates the login.
    pub(crate) fn set_controller_id(&mut self, id: String) {
        if self.controller_id.as_deref() != Some(id.as_str()) {
            self.invalidate();
        }
        self.controller_id = Some(id);
    }

    pub(crate) fn set_token(&mut self, token: SecretString) {
        self.token = Some(token);
    }

    pub(crate) fn set_sites(&mut self, scope: SiteScope) -> &SiteScope {
        self.sites.insert(scope)
    }

    /// Drop token and site selection, keeping the controller id.
    pub(crate) fn invalidate(&mut self) {
        self.token = None;
        self.sites = None;
    }
}

/// Sites resolved at login: the primary site plus every accessible site in
/// privilege-list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteScope {
    primary_site_id: String,
    site_ids: Vec<String>,
    sites: Vec<SiteRef>,
}

impl SiteScope {
    /// Pick the primary site by exact, case-sensitive name.
    ///
    /// An empty list is `Error::NoSites`; a list without the name is
    /// `Error::SiteNotFound`. Duplicate names resolve to the first entry.
    pub fn select(sites: Vec<SiteRef>, primary_site_name: &str) -> Result<Self, Error> {
        if sites.is_empty() {
            return Err(Error::NoSites);
        }

        let Some(primary_site_id) = sites
            .iter()
            .find(|s| s.name == primary_site_name)
            .map(|s| s.key.clone())
        else {
            return Err(Error::SiteNotFound {
                name: primary_site_name.to_owned(),
                available: sites.into_iter().map(|s| s.name).collect(),
            });
        };

        Ok(Self {
            primary_site_id,
            site_ids: sites.iter().map(|s| s.key.clone()).collect(),
            sites,
        })
    }

    pub fn primary_site_id(&self) -> &str {
        &self.primary_site_id
    }

    pub fn site_ids(&self) -> &[String] {
        &self.site_ids
    }

    pub fn sites(&self) -> &[SiteRef] {
        &self.sites
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn site(name: &str, key: &str) -> SiteRef {
        SiteRef {
            name: name.into(),
            key: key.into(),
        }
    }

    #[test]
    fn selects_primary_and_keeps_order() {
        let scope =
            SiteScope::select(vec![site("Home", "A"), site("Office", "B")], "Home").unwrap();
        assert_eq!(scope.primary_site_id(), "A");
        assert_eq!(scope.site_ids().to_vec(), vec!["A".to_owned(), "B".to_owned()]);
        assert_eq!(scope.sites().len(), 2);
    }

    #[test]
    fn match_is_case_sensitive() {
        let err = SiteScope::select(vec![site("Home", "A")], "home").unwrap_err();
        match err {
            Error::SiteNotFound { name, available } => {
                assert_eq!(name, "home");
                assert_eq!(available, vec!["Home".to_owned()]);
            }
            other => panic!("expected SiteNotFound, got {other:?}"),
        }
    }

    #[test]
    fn empty_list_is_no_sites() {
        let err = SiteScope::select(Vec::new(), "Home").unwrap_err();
        assert!(matches!(err, Error::NoSites));
    }

    #[test]
    fn duplicate_names_pick_first() {
        let scope =
            SiteScope::select(vec![site("Home", "A"), site("Home", "B")], "Home").unwrap();
        assert_eq!(scope.primary_site_id(), "A");
    }

    #[test]
    fn new_controller_id_invalidates_login() {
        let mut session = Session::new(Url::parse("https://omada.local").unwrap());
        session.set_controller_id("c1".into());
        session.set_token(SecretString::from("t".to_owned()));
        session.set_sites(SiteScope::select(vec![site("Home", "A")], "Home").unwrap());
        assert!(session.is_ready());

        session.set_controller_id("c1".into());
        assert!(session.is_ready());

        session.set_controller_id("c2".into());
        assert!(!session.has_token());
        assert!(session.sites().is_none());
        assert_eq!(session.controller_id(), Some("c2"));
    }

    #[test]
    fn requirements_report_what_is_missing() {
        let session = Session::new(Url::parse("https://omada.local").unwrap());
        assert!(matches!(
            session.require_controller_id(),
            Err(Error::NotAuthenticated { missing: "controller id" })
        ));
        assert!(matches!(
            session.require_token(),
            Err(Error::NotAuthenticated { missing: "token" })
        ));
    }
}
