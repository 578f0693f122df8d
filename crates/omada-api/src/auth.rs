// Authentication flow
//
// Controller identity lookup, credential login, and site resolution. Each
// step writes its piece of the session; nothing here refreshes or retries.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info};

use crate::client::OmadaClient;
use crate::error::Error;
use crate::models::{ControllerInfo, CurrentUser, LoginResult};
use crate::session::SiteScope;

impl OmadaClient {
    /// Look up the controller's identity.
    ///
    /// `GET /api/info` (unauthenticated). Stores `omadacId` as the session's
    /// controller id; every later path is scoped under it.
    pub async fn resolve_controller_identity(&mut self) -> Result<ControllerInfo, Error> {
        let url = self.root_url("api/info")?;
        let info: ControllerInfo = self.send(self.get(url)).await?.into_result()?;

        if info.omadac_id.is_empty() {
            return Err(Error::Deserialization {
                message: "controller info carries an empty omadacId".into(),
                body: String::new(),
            });
        }

        debug!(
            controller_id = %info.omadac_id,
            version = info.controller_ver.as_deref().unwrap_or("unknown"),
            "resolved controller identity"
        );
        self.session_mut().set_controller_id(info.omadac_id.clone());
        Ok(info)
    }

    /// Exchange credentials for a token.
    ///
    /// `POST /{controllerId}/api/v2/login` with `{username, password}`.
    /// Any previous token and site selection are dropped before the request,
    /// so a rejected login leaves the session without a token.
    pub async fn login(&mut self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.api_url("login")?;
        self.session_mut().invalidate();

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self.send(self.post(url).json(&body)).await?;
        if !resp.is_success() {
            return Err(Error::Authentication {
                code: resp.error_code,
                message: resp.message(),
            });
        }

        let login: LoginResult = resp.decode()?;
        if login.token.is_empty() {
            return Err(Error::Deserialization {
                message: "login result carries no token".into(),
                body: String::new(),
            });
        }

        debug!(role_type = ?login.role_type, "login accepted");
        self.session_mut().set_token(SecretString::from(login.token));
        info!(username, "logged in");
        Ok(())
    }

    /// Resolve the primary site and every site the account may access.
    ///
    /// `GET /{controllerId}/api/v2/users/current`. The primary site is the
    /// privilege entry whose name equals `primary_site_name` exactly. On
    /// `Error::NoSites` or `Error::SiteNotFound` the session keeps whatever
    /// site selection it had.
    pub async fn resolve_sites(&mut self, primary_site_name: &str) -> Result<&SiteScope, Error> {
        let url = self.api_url("users/current")?;
        let request = self.authorize(self.get(url))?;
        let user: CurrentUser = self.send(request).await?.into_result()?;

        debug!(
            user = user.name.as_deref().unwrap_or("-"),
            all_sites = user.privilege.all,
            last_visited = user.privilege.last_visited.as_deref().unwrap_or("-"),
            count = user.privilege.sites.len(),
            "fetched privilege list"
        );

        let scope = SiteScope::select(user.privilege.sites, primary_site_name)?;
        info!(
            primary = scope.primary_site_id(),
            sites = scope.site_ids().len(),
            "resolved sites"
        );
        Ok(self.session_mut().set_sites(scope))
    }

    /// Run the whole flow: identity (if not known yet), login, sites.
    pub async fn authenticate(
        &mut self,
        username: &str,
        password: &SecretString,
        primary_site_name: &str,
    ) -> Result<&SiteScope, Error> {
        if self.session().controller_id().is_none() {
            self.resolve_controller_identity().await?;
        }
        self.login(username, password).await?;
        self.resolve_sites(primary_site_name).await
    }

    /// End the session on the controller.
    ///
    /// `POST /{controllerId}/api/v2/logout`. Token and site selection are
    /// cleared locally whatever the controller answers.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let url = self.api_url("logout")?;
        let request = self.authorize(self.post(url))?;
        let result = self.send(request).await;
        self.session_mut().invalidate();
        result?.ensure_success()?;
        debug!("logged out");
        Ok(())
    }
}
