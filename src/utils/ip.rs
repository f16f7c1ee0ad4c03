//! Client IP extraction.
//!
//! Forwarded headers win over the connection peer: the service is expected
//! to sit behind a reverse proxy, and the peer address is then the proxy,
//! not the visitor.

use std::net::IpAddr;

use actix_web::HttpRequest;

/// Check if an IP is a private address or localhost
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => {
            // fc00::/7 (ULA), fe80::/10 (link-local), ::1 (loopback)
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00
                || (v6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}

/// Extract the visitor IP from a request.
///
/// Priority: X-Forwarded-For (first hop) → X-Real-IP → connection peer.
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    extract_forwarded_ip_from_headers(req.headers()).or_else(|| {
        req.connection_info()
            .peer_addr()
            .map(|addr| addr.to_string())
    })
}

/// Extract the forwarded IP from headers (X-Forwarded-For or X-Real-IP)
pub fn extract_forwarded_ip_from_headers(
    headers: &actix_web::http::header::HeaderMap,
) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        })
}
