//! External IP info API provider
//!
//! HTTP lookups (ip-api.com style) behind a moka cache. `get_with` gives
//! singleflight semantics: concurrent lookups of one address issue a
//! single request.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{IpInfo, IpInfoLookup};

/// Cache capacity (addresses)
const CACHE_MAX_CAPACITY: u64 = 10_000;
/// HTTP request timeout
const HTTP_TIMEOUT_SECS: u64 = 2;

static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into()
    })
}

pub struct ExternalApiProvider {
    api_url_template: String,
    /// IP -> IpInfo cache; Option doubles as a negative cache
    cache: Cache<String, Option<IpInfo>>,
}

impl ExternalApiProvider {
    /// `api_url_template` uses `{ip}` as the placeholder, e.g.
    /// `http://ip-api.com/json/{ip}?fields=status,countryCode,city`
    pub fn new(api_url_template: &str, cache_ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(cache_ttl_secs))
            .max_capacity(CACHE_MAX_CAPACITY)
            .build();

        Self {
            api_url_template: api_url_template.to_string(),
            cache,
        }
    }

    /// Synchronous fetch, called inside spawn_blocking.
    fn fetch_from_api_sync(url: String) -> Option<IpInfo> {
        let agent = get_agent();

        let resp = match agent.get(&url).call() {
            Ok(r) => r,
            Err(e) => {
                warn!("IP info request to \"{}\" failed: {}", url, e);
                return None;
            }
        };

        let json: serde_json::Value = match resp.into_body().read_json() {
            Ok(j) => j,
            Err(e) => {
                warn!("IP info response from \"{}\" parse failed: {}", url, e);
                return None;
            }
        };

        // ip-api.com answers {"countryCode": "BR", "city": "São Paulo"},
        // or {"status": "fail", ...} on error. Other APIs use close cousins
        // of the same field names.
        if json["status"].as_str() == Some("fail") {
            trace!("IP info API returned fail status");
            return None;
        }

        let country = json["countryCode"]
            .as_str()
            .or_else(|| json["country_code"].as_str())
            .or_else(|| json["country"].as_str())
            .map(String::from);

        let city = json["city"].as_str().map(String::from);

        trace!("IP info lookup: country={:?}, city={:?}", country, city);

        Some(IpInfo { country, city })
    }

    async fn fetch_from_api(&self, ip: &str) -> Option<IpInfo> {
        let url = self.api_url_template.replace("{ip}", ip);

        tokio::task::spawn_blocking(move || Self::fetch_from_api_sync(url))
            .await
            .unwrap_or_else(|e| {
                warn!("IP info spawn_blocking failed: {}", e);
                None
            })
    }
}

#[async_trait]
impl IpInfoLookup for ExternalApiProvider {
    async fn lookup(&self, ip: &str) -> Option<IpInfo> {
        let ip_key = ip.to_string();

        self.cache
            .get_with(ip_key, async {
                trace!("IP info cache miss for {}, fetching from API", ip);
                self.fetch_from_api(ip).await
            })
            .await
    }

    fn name(&self) -> &'static str {
        "ExternalAPI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Depends on an external network service, may fail in CI
    #[tokio::test]
    #[ignore]
    async fn test_external_api_provider_lookup() {
        let provider = ExternalApiProvider::new(
            "http://ip-api.com/json/{ip}?fields=status,countryCode,city",
            900,
        );

        let result1 = provider.lookup("8.8.8.8").await;
        assert!(result1.is_some(), "First lookup should succeed");
        assert_eq!(result1.as_ref().unwrap().country, Some("US".to_string()));

        // Second lookup hits the cache
        let result2 = provider.lookup("8.8.8.8").await;
        assert_eq!(result1, result2, "Cached result should match");
    }

    /// Depends on an external network service, may fail in CI
    #[test]
    #[ignore]
    fn test_timeout_handling() {
        // TEST-NET address, not routable; should time out and answer None
        let url = "http://192.0.2.1/timeout-test".to_string();
        let result = ExternalApiProvider::fetch_from_api_sync(url);
        assert!(result.is_none(), "Should timeout and return None");
    }
}
