//! IP information lookup
//!
//! Injectable capability used to annotate captured views with coarse
//! geography. Backed by an external HTTP API behind a TTL cache; a no-op
//! provider stands in when the feature is disabled and in tests. Lookups
//! are non-authoritative: any failure degrades to "no annotation".

mod external_api;
mod provider;

pub use provider::{IpInfo, IpInfoLookup, IpInfoProvider, NullProvider};
