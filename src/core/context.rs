//! Per-request data captured at request entry

use http::header::USER_AGENT;
use http::HeaderMap;
use std::net::IpAddr;

/// Placeholder when neither a forwarding header nor a peer address is known
pub const UNKNOWN_IP: &str = "Unknown IP";

/// Request fields the logger needs, captured once at entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub client_ip: String,
    /// Raw User-Agent value, if the header was present and printable
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        client_ip: impl Into<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            client_ip: client_ip.into(),
            user_agent,
        }
    }

    /// Capture a context from HTTP request parts
    ///
    /// `ip_header` names the trusted forwarding header; `peer` is the
    /// transport-level remote address, when the server exposes it.
    pub fn from_parts(
        method: &str,
        path: &str,
        headers: &HeaderMap,
        ip_header: &str,
        peer: Option<IpAddr>,
    ) -> Self {
        let user_agent = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self::new(method, path, client_ip(headers, ip_header, peer), user_agent)
    }
}

/// Derive the client IP for a request
///
/// Takes the first comma-separated entry of the forwarding header,
/// then the peer address, then [`UNKNOWN_IP`]. The header value is not
/// validated: whoever can set it controls what gets logged.
pub fn client_ip(headers: &HeaderMap, ip_header: &str, peer: Option<IpAddr>) -> String {
    let forwarded = headers
        .get(ip_header)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(peer)) => peer.to_string(),
        (None, None) => UNKNOWN_IP.to_string(),
    }
}
