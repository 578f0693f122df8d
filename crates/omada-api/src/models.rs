// Omada API data contracts
//
// Every response is wrapped in the `ApiResponse` envelope; the `result`
// payload is kept as raw JSON until the caller picks the concrete type.
// Entity structs model the commonly needed fields explicitly and keep
// everything else in `extra`, since payloads vary across firmware versions.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard Omada response envelope.
///
/// ```json
/// { "errorCode": 0, "msg": "Success.", "result": { ... } }
/// ```
///
/// A non-zero `errorCode` is an application-level failure even on HTTP 200.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub error_code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }

    /// The controller's message, or a placeholder built from the code.
    pub fn message(&self) -> String {
        self.msg
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("errorCode={}", self.error_code))
    }

    /// Fail with `Error::Api` unless `errorCode == 0`.
    pub fn ensure_success(&self) -> Result<(), Error> {
        if self.is_success() {
            Ok(())
        } else {
            Err(Error::Api {
                code: self.error_code,
                message: self.message(),
            })
        }
    }

    /// Check the error code, then decode `result` into `T`.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, Error> {
        self.ensure_success()?;
        self.decode()
    }

    /// Decode `result` into `T` without looking at the error code.
    pub(crate) fn decode<T: DeserializeOwned>(self) -> Result<T, Error> {
        let value = self.result.unwrap_or(serde_json::Value::Null);
        T::deserialize(&value).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })
    }
}

/// A listing payload: either a page object or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page(Page<T>),
    Items(Vec<T>),
}

impl<T> Listing<T> {
    /// Rows the controller reports in total, when it says so.
    pub fn total_rows(&self) -> Option<u64> {
        match self {
            Self::Page(page) => Some(page.total_rows),
            Self::Items(_) => None,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.data,
            Self::Items(items) => items,
        }
    }
}

/// Paged listing: `{ totalRows, currentPage, currentSize, data }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub current_page: u64,
    #[serde(default)]
    pub current_size: u64,
    pub data: Vec<T>,
}

// ── Controller & Auth ────────────────────────────────────────────────

/// Unauthenticated controller identity from `/api/info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerInfo {
    #[serde(default)]
    pub controller_ver: Option<String>,
    #[serde(default)]
    pub api_ver: Option<String>,
    #[serde(default)]
    pub configured: bool,
    #[serde(default, rename = "type")]
    pub controller_type: Option<i32>,
    #[serde(default)]
    pub support_app: bool,
    #[serde(default)]
    pub omadac_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResult {
    #[serde(default)]
    pub role_type: Option<i32>,
    #[serde(default)]
    pub token: String,
}

/// Current-user payload from `users/current`. Only the privilege block
/// matters for site resolution.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CurrentUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub privilege: Privilege,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Privilege {
    #[serde(default)]
    pub sites: Vec<SiteRef>,
    #[serde(default)]
    pub last_visited: Option<String>,
    #[serde(default)]
    pub all: bool,
}

/// A site the account may access: display name plus the site key used in
/// site-scoped URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRef {
    pub name: String,
    pub key: String,
}

// ── Client ───────────────────────────────────────────────────────────

/// Connected client from `sites/{site}/clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub wireless: Option<bool>,
    #[serde(default)]
    pub ssid: Option<String>,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub vid: Option<u32>,
    #[serde(default, skip_deserializing)]
    pub(crate) dns_name: String,
    /// Catch-all for fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Client {
    /// DNS-label form of `name`, computed when the client was fetched.
    pub fn dns_name(&self) -> &str {
        &self.dns_name
    }

    /// `ip` when it is present and non-empty.
    pub fn address(&self) -> Option<&str> {
        self.ip.as_deref().filter(|ip| !ip.is_empty())
    }
}

// ── Device ───────────────────────────────────────────────────────────

/// Adopted or pending device from `sites/{site}/devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default, rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    /// 0=disconnected, 1=connected, 2=pending (coarse category).
    #[serde(default)]
    pub status_category: Option<i32>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub uptime_long: Option<i64>,
    #[serde(default)]
    pub last_seen: Option<i64>,
    #[serde(default)]
    pub client_num: Option<u32>,
    #[serde(default)]
    pub need_upgrade: Option<bool>,
    #[serde(default)]
    pub sn: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default, skip_deserializing)]
    pub(crate) dns_name: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Device {
    pub fn dns_name(&self) -> &str {
        &self.dns_name
    }
}

// ── Network ──────────────────────────────────────────────────────────

/// LAN network from `sites/{site}/setting/lan/networks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, rename = "gatewaySubnet")]
    pub subnet: Option<String>,
    #[serde(default)]
    pub vlan: Option<u32>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default, skip_deserializing)]
    pub(crate) dns_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Network {
    pub fn dns_name(&self) -> &str {
        &self.dns_name
    }
}
