//! Coarse, privacy-reduced location labels derived from client IPs.

use std::net::{IpAddr, SocketAddr};

pub const UNKNOWN_LOCATION: &str = "unknown";
pub const LOCAL_LOCATION: &str = "local";

/// Buckets an IP address into a coarse location label.
///
/// - empty input → `unknown`
/// - loopback (`127.0.0.0/8`, `::1`, IPv4-mapped loopback) → `local`
/// - IPv4 or IPv4-mapped IPv6 → first two octets, e.g. `203.0.x.x`
/// - anything else, including native IPv6 → `unknown`
///
/// An optional `:port` suffix is accepted.
pub fn coarse_location(ip: &str) -> String {
    let ip = ip.trim();
    if ip.is_empty() {
        return UNKNOWN_LOCATION.to_string();
    }

    let Some(addr) = parse_ip(ip) else {
        return UNKNOWN_LOCATION.to_string();
    };

    let addr = match addr {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(IpAddr::V6(v6)),
        v4 => v4,
    };

    if addr.is_loopback() {
        return LOCAL_LOCATION.to_string();
    }

    match addr {
        IpAddr::V4(v4) => {
            let [a, b, _, _] = v4.octets();
            format!("{a}.{b}.x.x")
        }
        IpAddr::V6(_) => UNKNOWN_LOCATION.to_string(),
    }
}

fn parse_ip(ip: &str) -> Option<IpAddr> {
    if let Ok(addr) = ip.parse::<IpAddr>() {
        return Some(addr);
    }
    ip.parse::<SocketAddr>().ok().map(|s| s.ip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(coarse_location(""), "unknown");
        assert_eq!(coarse_location("   "), "unknown");
    }

    #[test]
    fn test_loopback_is_local() {
        assert_eq!(coarse_location("127.0.0.1"), "local");
        assert_eq!(coarse_location("127.8.9.10"), "local");
        assert_eq!(coarse_location("::1"), "local");
        assert_eq!(coarse_location("::ffff:127.0.0.1"), "local");
    }

    #[test]
    fn test_ipv4_bucket() {
        assert_eq!(coarse_location("203.0.113.42"), "203.0.x.x");
        assert_eq!(coarse_location("10.1.2.3"), "10.1.x.x");
    }

    #[test]
    fn test_ipv4_mapped_bucket() {
        assert_eq!(coarse_location("::ffff:192.168.1.20"), "192.168.x.x");
    }

    #[test]
    fn test_socket_address_accepted() {
        assert_eq!(coarse_location("198.51.100.7:54321"), "198.51.x.x");
        assert_eq!(coarse_location("[::1]:8080"), "local");
    }

    #[test]
    fn test_unparseable_is_unknown() {
        assert_eq!(coarse_location("not-an-ip"), "unknown");
        assert_eq!(coarse_location("10.1"), "unknown");
        assert_eq!(coarse_location("2001:db8::1"), "unknown");
    }
}
