// ── Runtime portal configuration ──
//
// Describes *where* the records service lives and how to reach it.
// Never touches disk: the CLI/TUI builds a `PortalConfig` and hands it in.

use std::time::Duration;

use url::Url;

use rollbook_api::{TlsMode, TransportConfig};

/// Production records service.
pub const DEFAULT_BASE_URL: &str = "https://dmc-withlogin-backend.onrender.com";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (local test backends with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for one records service.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Service root (e.g., `https://dmc-withlogin-backend.onrender.com`).
    pub base_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout. `None` waits for the transport to resolve.
    pub timeout: Option<Duration>,
}

impl PortalConfig {
    /// Config for `base_url` with strict TLS and a 30 second timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: Some(Duration::from_secs(30)),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
