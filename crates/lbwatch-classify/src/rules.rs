//! Ordered classification rule tables
//!
//! Rules are evaluated top to bottom against the lower-cased server name;
//! the first rule with any matching substring wins. The ordering is part
//! of the contract: reordering rules changes observable classification.
//!
//! Two-letter location codes ("de", "us", "uk", ...) knowingly match
//! unrelated substrings in arbitrary names ("user01" matches "us"). This
//! precedence is preserved as-is; see the tests documenting it.

use lbwatch_core::{Location, ServiceKind};

/// Service type rules, highest precedence first
const TYPE_RULES: &[(&[&str], ServiceKind)] = &[
    (&["wg", "wireguard"], ServiceKind::WireGuard),
    (&["ipsec", "esp"], ServiceKind::IpSec),
    (&["vxlan"], ServiceKind::Vxlan),
    (&["openvpn", "ovpn"], ServiceKind::OpenVpn),
    (&["v2ray", "vmess"], ServiceKind::V2Ray),
    (&["shadowsocks", "ss"], ServiceKind::Shadowsocks),
];

/// Location rules, highest precedence first
const LOCATION_RULES: &[(&[&str], Location)] = &[
    (&["de", "germany", "german"], Location::Germany),
    (&["fl", "finland", "finnish"], Location::Finland),
    (&["us", "usa", "america"], Location::UnitedStates),
    (&["uk", "britain", "england"], Location::UnitedKingdom),
    (&["fr", "france"], Location::France),
    (&["nl", "netherlands", "holland"], Location::Netherlands),
];

/// Derive the service type from a server name
pub fn classify_type(name: &str) -> ServiceKind {
    let lowered = name.to_lowercase();
    for (patterns, kind) in TYPE_RULES {
        if patterns.iter().any(|pattern| lowered.contains(pattern)) {
            return *kind;
        }
    }
    ServiceKind::Unknown
}

/// Derive the geographic origin from a server name
pub fn classify_location(name: &str) -> Location {
    let lowered = name.to_lowercase();
    for (patterns, location) in LOCATION_RULES {
        if patterns.iter().any(|pattern| lowered.contains(pattern)) {
            return *location;
        }
    }
    Location::Unspecified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_wg_de() {
        assert_eq!(classify_type("wg-de-01"), ServiceKind::WireGuard);
        assert_eq!(classify_location("wg-de-01"), Location::Germany);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify_type("wg-de-01"), ServiceKind::WireGuard);
            assert_eq!(classify_location("wg-de-01"), Location::Germany);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify_type("WireGuard-Primary"), ServiceKind::WireGuard);
        assert_eq!(classify_type("OPENVPN-UK"), ServiceKind::OpenVpn);
        assert_eq!(classify_location("OPENVPN-UK"), Location::UnitedKingdom);
    }

    #[test]
    fn test_all_type_rules() {
        assert_eq!(classify_type("ipsec-tunnel"), ServiceKind::IpSec);
        assert_eq!(classify_type("esp-gw"), ServiceKind::IpSec);
        assert_eq!(classify_type("vxlan-overlay"), ServiceKind::Vxlan);
        assert_eq!(classify_type("ovpn-backup"), ServiceKind::OpenVpn);
        assert_eq!(classify_type("vmess-edge"), ServiceKind::V2Ray);
        assert_eq!(classify_type("shadowsocks-1"), ServiceKind::Shadowsocks);
    }

    #[test]
    fn test_rule_order_wins_over_specificity() {
        // Contains both "wg" and "ss"; the WireGuard rule comes first
        assert_eq!(classify_type("wg-ss-mixed"), ServiceKind::WireGuard);
        // Contains both "nl" and "de"; the Germany rule comes first
        assert_eq!(classify_location("nl-de-edge"), Location::Germany);
    }

    #[test]
    fn test_two_letter_false_positives_preserved() {
        // "user01" contains "us"; documented heuristic weakness, kept as-is
        assert_eq!(classify_location("user01"), Location::UnitedStates);
        // "bypass" contains "ss"
        assert_eq!(classify_type("bypass-node"), ServiceKind::Shadowsocks);
    }

    #[test]
    fn test_unmatched_falls_back_to_sentinels() {
        assert_eq!(classify_type("relay-01"), ServiceKind::Unknown);
        assert_eq!(classify_location("gamma-7"), Location::Unspecified);
    }
}
