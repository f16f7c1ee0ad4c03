use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::external_api::ExternalApiProvider;
use crate::config::IpInfoConfig;
use crate::utils::ip::is_private_or_local;

/// Coarse geography for an IP address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpInfo {
    /// ISO 3166-1 alpha-2 country code (e.g. "BR", "US")
    pub country: Option<String>,
    pub city: Option<String>,
}

#[async_trait]
pub trait IpInfoLookup: Send + Sync {
    async fn lookup(&self, ip: &str) -> Option<IpInfo>;

    /// Provider name, for logs
    fn name(&self) -> &'static str;
}

/// Provider that never answers. Used when the feature is off and in tests.
pub struct NullProvider;

#[async_trait]
impl IpInfoLookup for NullProvider {
    async fn lookup(&self, _ip: &str) -> Option<IpInfo> {
        None
    }

    fn name(&self) -> &'static str {
        "Null"
    }
}

/// Unified IP info provider, selected once from configuration.
pub struct IpInfoProvider {
    inner: Arc<dyn IpInfoLookup>,
}

impl IpInfoProvider {
    pub fn new(config: &IpInfoConfig) -> Self {
        let inner: Arc<dyn IpInfoLookup> = if config.enabled {
            Arc::new(ExternalApiProvider::new(
                &config.api_url,
                config.cache_ttl_secs,
            ))
        } else {
            debug!("IP info lookups disabled, using null provider");
            Arc::new(NullProvider)
        };

        info!("IP info: initialized with {} provider", inner.name());
        Self { inner }
    }

    /// A provider that annotates nothing, regardless of configuration.
    pub fn disabled() -> Self {
        Self {
            inner: Arc::new(NullProvider),
        }
    }

    /// Look up an address. Private, loopback and unparseable addresses are
    /// skipped without touching the backend.
    pub async fn lookup(&self, ip: &str) -> Option<IpInfo> {
        let addr = ip.parse::<IpAddr>().ok()?;
        if is_private_or_local(&addr) {
            return None;
        }
        self.inner.lookup(ip).await
    }

    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }
}

impl Clone for IpInfoProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
