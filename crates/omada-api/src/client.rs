// Omada API HTTP client
//
// Wraps `reqwest::Client` with controller-scoped URL construction, the
// `Csrf-Token` credential header, and envelope decoding. The auth flow and
// the per-resource fetchers live in their own files as inherent methods.

use reqwest::RequestBuilder;
use reqwest::header::ACCEPT;
use secrecy::ExposeSecret;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ApiResponse;
use crate::session::Session;
use crate::transport::TransportConfig;

/// Header carrying the login token on every authenticated request.
pub const CSRF_TOKEN_HEADER: &str = "Csrf-Token";

const JSON: &str = "application/json";

/// HTTP client bound to one controller and one [`Session`].
///
/// Authentication methods take `&mut self` and are the only writers of the
/// session; fetchers take `&self`. Requests are issued one at a time, and
/// sharing one client across tasks needs the caller's own synchronisation.
#[derive(Debug)]
pub struct OmadaClient {
    http: reqwest::Client,
    session: Session,
}

impl OmadaClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// A cookie jar is added if the config has none; login sets session
    /// cookies that later requests must carry. `base_url` is the controller
    /// root, e.g. `https://10.0.0.10` or `https://omada.local:8043`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            session: Session::new(base_url),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn base_url(&self) -> &Url {
        self.session.base_url()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/{path}` for controller-wide, unauthenticated endpoints.
    pub(crate) fn root_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url().as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// `{base}/{controllerId}/api/v2/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let controller_id = self.session.require_controller_id()?;
        self.root_url(&format!("{controller_id}/api/v2/{path}"))
    }

    /// `{base}/{controllerId}/api/v2/sites/{site}/{path}`, with `site_id`
    /// percent-encoded as a single path segment.
    pub(crate) fn site_url(&self, site_id: &str, path: &str) -> Result<Url, Error> {
        let mut url = self.api_url("sites")?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(site_id)
            .extend(path.split('/'));
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        debug!("GET {}", url);
        self.http.get(url).header(ACCEPT, JSON)
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        debug!("POST {}", url);
        self.http.post(url).header(ACCEPT, JSON)
    }

    /// Attach the session token. Fails without issuing anything if there
    /// is no token yet.
    pub(crate) fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        let token = self.session.require_token()?;
        Ok(request.header(CSRF_TOKEN_HEADER, token.expose_secret()))
    }

    /// Send a request and decode the `{errorCode, msg, result}` envelope.
    ///
    /// Non-2xx statuses fail before the body is read; the error code inside
    /// the envelope is left for the caller to interpret.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, Error> {
        let resp = request.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
