//! Server record and classification type definitions

use serde::{Deserialize, Serialize};

/// One row of the load balancer's stats table, for an individual server.
///
/// Every numeric field defaults to 0 and every string field to a sentinel
/// when the source omits or malforms it; a single bad field never fails
/// the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Server name as declared in the load balancer config (stable key)
    pub name: String,
    /// Owning backend/pool name
    pub backend: String,
    /// Health status, verbatim from the source
    pub status: ServerStatus,
    /// Current session count (instantaneous gauge)
    pub current_sessions: u64,
    /// Total sessions since backend start (monotonic counter)
    pub total_sessions: u64,
    /// Bytes received from clients
    pub bytes_in: u64,
    /// Bytes sent to clients
    pub bytes_out: u64,
    /// Free-form health check detail
    pub check_status: String,
    /// Whether the server is an active member of its pool
    pub active: bool,
    /// Whether the server is a backup member of its pool
    pub backup: bool,
    /// Load-balancing weight
    pub weight: u32,
}

/// Server health status as reported by the load balancer.
///
/// The raw token is preserved verbatim: transitional states like "UP 1/3"
/// round-trip through [`ServerStatus::Other`] and are not treated as up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServerStatus {
    /// Server is up and passing checks
    Up,
    /// Server is down
    Down,
    /// Server is in maintenance mode
    Maint,
    /// Server is draining connections
    Drain,
    /// Server has no health check configured
    NoCheck,
    /// Status field was absent from the source
    Unknown,
    /// Any other status token, kept verbatim
    Other(String),
}

impl ServerStatus {
    /// Whether the server counts as up (exact "UP" only)
    pub fn is_up(&self) -> bool {
        matches!(self, ServerStatus::Up)
    }
}

impl From<&str> for ServerStatus {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "UP" => ServerStatus::Up,
            "DOWN" => ServerStatus::Down,
            "MAINT" => ServerStatus::Maint,
            "DRAIN" => ServerStatus::Drain,
            "no check" => ServerStatus::NoCheck,
            "" | "UNKNOWN" => ServerStatus::Unknown,
            other => ServerStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ServerStatus {
    fn from(raw: String) -> Self {
        ServerStatus::from(raw.as_str())
    }
}

impl From<ServerStatus> for String {
    fn from(status: ServerStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerStatus::Up => write!(f, "UP"),
            ServerStatus::Down => write!(f, "DOWN"),
            ServerStatus::Maint => write!(f, "MAINT"),
            ServerStatus::Drain => write!(f, "DRAIN"),
            ServerStatus::NoCheck => write!(f, "no check"),
            ServerStatus::Unknown => write!(f, "UNKNOWN"),
            ServerStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Service type derived from a server's name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    WireGuard,
    IpSec,
    Vxlan,
    OpenVpn,
    V2Ray,
    Shadowsocks,
    /// No type rule matched
    Unknown,
}

impl ServiceKind {
    /// Human-readable type label
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::WireGuard => "WireGuard",
            ServiceKind::IpSec => "IPSec",
            ServiceKind::Vxlan => "VXLAN",
            ServiceKind::OpenVpn => "OpenVPN",
            ServiceKind::V2Ray => "V2Ray",
            ServiceKind::Shadowsocks => "Shadowsocks",
            ServiceKind::Unknown => "Unknown",
        }
    }

    /// Display icon
    pub fn icon(&self) -> &'static str {
        match self {
            ServiceKind::WireGuard => "🔐",
            ServiceKind::IpSec => "🛡️",
            ServiceKind::Vxlan => "🌐",
            ServiceKind::OpenVpn => "🔒",
            ServiceKind::V2Ray => "⚡",
            ServiceKind::Shadowsocks => "👤",
            ServiceKind::Unknown => "❓",
        }
    }

    /// Ordering rank; lower sorts first, Unknown ranks below every known type
    pub fn priority(&self) -> u8 {
        match self {
            ServiceKind::WireGuard => 1,
            ServiceKind::IpSec => 2,
            ServiceKind::Vxlan => 3,
            ServiceKind::OpenVpn => 4,
            ServiceKind::V2Ray => 5,
            ServiceKind::Shadowsocks => 6,
            ServiceKind::Unknown => 99,
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Geographic origin derived from a server's name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Germany,
    Finland,
    UnitedStates,
    UnitedKingdom,
    France,
    Netherlands,
    /// No location rule matched
    Unspecified,
}

impl Location {
    /// Human-readable location label
    pub fn label(&self) -> &'static str {
        match self {
            Location::Germany => "Germany",
            Location::Finland => "Finland",
            Location::UnitedStates => "United States",
            Location::UnitedKingdom => "United Kingdom",
            Location::France => "France",
            Location::Netherlands => "Netherlands",
            Location::Unspecified => "Unspecified",
        }
    }

    /// Display flag
    pub fn flag(&self) -> &'static str {
        match self {
            Location::Germany => "🇩🇪",
            Location::Finland => "🇫🇮",
            Location::UnitedStates => "🇺🇸",
            Location::UnitedKingdom => "🇬🇧",
            Location::France => "🇫🇷",
            Location::Netherlands => "🇳🇱",
            Location::Unspecified => "🌍",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_token() {
        assert_eq!(ServerStatus::from("UP"), ServerStatus::Up);
        assert_eq!(ServerStatus::from("DOWN"), ServerStatus::Down);
        assert_eq!(ServerStatus::from("no check"), ServerStatus::NoCheck);
        assert_eq!(ServerStatus::from(""), ServerStatus::Unknown);
        assert_eq!(
            ServerStatus::from("UP 1/3"),
            ServerStatus::Other("UP 1/3".to_string())
        );
    }

    #[test]
    fn test_status_round_trip() {
        for token in ["UP", "DOWN", "MAINT", "DRAIN", "no check", "UP 1/3"] {
            assert_eq!(ServerStatus::from(token).to_string(), token);
        }
    }

    #[test]
    fn test_only_exact_up_is_up() {
        assert!(ServerStatus::Up.is_up());
        assert!(!ServerStatus::from("UP 1/3").is_up());
        assert!(!ServerStatus::Down.is_up());
    }

    #[test]
    fn test_unknown_priority_ranks_last() {
        let known = [
            ServiceKind::WireGuard,
            ServiceKind::IpSec,
            ServiceKind::Vxlan,
            ServiceKind::OpenVpn,
            ServiceKind::V2Ray,
            ServiceKind::Shadowsocks,
        ];
        for kind in known {
            assert!(kind.priority() < ServiceKind::Unknown.priority());
        }
    }
}
