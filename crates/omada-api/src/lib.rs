// omada-api: Async Rust client for the Omada controller API
//
// Session lifecycle (controller identity -> login -> site resolution),
// site-scoped listings of clients, devices and networks, and fail-fast
// aggregation across every site the account can access.

pub mod aggregate;
mod auth;
pub mod client;
mod clients;
mod devices;
pub mod dns;
pub mod error;
pub mod models;
mod networks;
mod resource;
pub mod session;
pub mod transport;

pub use aggregate::fetch_all_sites;
pub use client::{CSRF_TOKEN_HEADER, OmadaClient};
pub use dns::dns_safe_name;
pub use error::Error;
pub use models::{Client, ControllerInfo, Device, Network, SiteRef};
pub use session::{Session, SiteScope};
pub use transport::{TlsMode, TransportConfig};
