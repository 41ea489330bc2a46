//! Stats table parser
//!
//! Decodes the CSV table returned by the admin socket's `show stat`
//! command. Columns are resolved by header name, never by position, and
//! per-field decoding is independently fault-tolerant: a missing or
//! unparseable field yields its documented default instead of failing the
//! batch. Only a missing or unusable header row is an error.

use lbwatch_core::{LbwatchError, LbwatchResult, ServerRecord};
use std::collections::HashMap;

/// Rows with these role names are per-frontend/per-backend aggregates,
/// not individual servers
const AGGREGATE_ROWS: [&str; 2] = ["FRONTEND", "BACKEND"];

/// Parse a raw stats table into server records, in input order
pub fn parse_stats(raw: &str) -> LbwatchResult<Vec<ServerRecord>> {
    let mut lines = raw.lines().filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| LbwatchError::MalformedInput("empty stats payload".to_string()))?;
    let header = header.strip_prefix('#').ok_or_else(|| {
        LbwatchError::MalformedInput("stats payload has no header row".to_string())
    })?;

    let columns: HashMap<&str, usize> = header
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, name)| (name, index))
        .collect();

    let name_index = *columns.get("svname").ok_or_else(|| {
        LbwatchError::MalformedInput("header row has no svname column".to_string())
    })?;

    let mut records = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        let field = |column: &str| -> &str {
            columns
                .get(column)
                .and_then(|&index| fields.get(index))
                .copied()
                .unwrap_or("")
        };

        let name = fields.get(name_index).copied().unwrap_or("").trim();
        if name.is_empty() || AGGREGATE_ROWS.contains(&name) {
            continue;
        }

        records.push(ServerRecord {
            name: name.to_string(),
            backend: string_or(field("pxname"), "Unknown"),
            status: field("status").into(),
            current_sessions: number(field("scur")),
            total_sessions: number(field("stot")),
            bytes_in: number(field("bin")),
            bytes_out: number(field("bout")),
            check_status: string_or(field("check_status"), "N/A"),
            active: flag(field("act")),
            backup: flag(field("bck")),
            weight: number(field("weight")) as u32,
        });
    }

    Ok(records)
}

fn number(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

fn flag(raw: &str) -> bool {
    raw.trim() == "1"
}

fn string_or(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbwatch_core::ServerStatus;

    const SAMPLE: &str = "\
# pxname,svname,status,scur,stot,bin,bout,check_status,act,bck,weight\n\
stats,FRONTEND,OPEN,0,50,900,1800,,0,0,0\n\
vpn_backend,wg-de-01,UP,5,120,1000,2000,L4OK,1,0,100\n\
vpn_backend,openvpn-us-01,UP,0,80,500,700,L4OK,0,1,50\n\
vpn_backend,v2ray-nl-01,DOWN,0,10,0,0,L4CON,0,1,50\n\
vpn_backend,BACKEND,UP,5,210,1500,2700,,1,2,200\n";

    #[test]
    fn test_parses_only_individual_servers() {
        let records = parse_stats(SAMPLE).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["wg-de-01", "openvpn-us-01", "v2ray-nl-01"]);
    }

    #[test]
    fn test_fields_decoded() {
        let records = parse_stats(SAMPLE).unwrap();
        let wg = &records[0];
        assert_eq!(wg.backend, "vpn_backend");
        assert_eq!(wg.status, ServerStatus::Up);
        assert_eq!(wg.current_sessions, 5);
        assert_eq!(wg.total_sessions, 120);
        assert_eq!(wg.bytes_in, 1000);
        assert_eq!(wg.bytes_out, 2000);
        assert_eq!(wg.check_status, "L4OK");
        assert!(wg.active);
        assert!(!wg.backup);
        assert_eq!(wg.weight, 100);

        let ovpn = &records[1];
        assert!(!ovpn.active);
        assert!(ovpn.backup);
    }

    #[test]
    fn test_columns_resolved_by_name_not_position() {
        let shuffled = "\
# status,weight,svname,bck,act,bout,bin,stot,scur,check_status,pxname\n\
UP,100,wg-de-01,0,1,2000,1000,120,5,L4OK,vpn_backend\n";
        let records = parse_stats(shuffled).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "wg-de-01");
        assert_eq!(records[0].bytes_in, 1000);
        assert_eq!(records[0].bytes_out, 2000);
        assert!(records[0].active);
    }

    #[test]
    fn test_missing_column_defaults_to_zero() {
        let without_bin = "\
# pxname,svname,status,scur\n\
vpn_backend,wg-de-01,UP,5\n";
        let records = parse_stats(without_bin).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bytes_in, 0);
        assert_eq!(records[0].bytes_out, 0);
        assert_eq!(records[0].check_status, "N/A");
        assert!(!records[0].active);
    }

    #[test]
    fn test_unparseable_numeric_defaults_to_zero() {
        let garbage = "\
# pxname,svname,status,scur,stot\n\
vpn_backend,wg-de-01,UP,not-a-number,120\n";
        let records = parse_stats(garbage).unwrap();
        assert_eq!(records[0].current_sessions, 0);
        assert_eq!(records[0].total_sessions, 120);
    }

    #[test]
    fn test_short_row_defaults() {
        let short = "\
# pxname,svname,status,scur,stot,bin\n\
vpn_backend,wg-de-01,UP\n";
        let records = parse_stats(short).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].current_sessions, 0);
        assert_eq!(records[0].bytes_in, 0);
    }

    #[test]
    fn test_missing_status_is_unknown() {
        let no_status = "\
# pxname,svname,scur\n\
vpn_backend,wg-de-01,5\n";
        let records = parse_stats(no_status).unwrap();
        assert_eq!(records[0].status, ServerStatus::Unknown);
        assert_eq!(records[0].status.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_missing_header_is_malformed() {
        let err = parse_stats("vpn_backend,wg-de-01,UP\n").unwrap_err();
        assert!(matches!(err, LbwatchError::MalformedInput(_)));

        let err = parse_stats("").unwrap_err();
        assert!(matches!(err, LbwatchError::MalformedInput(_)));
    }

    #[test]
    fn test_header_without_svname_is_malformed() {
        let err = parse_stats("# pxname,status\nvpn_backend,UP\n").unwrap_err();
        assert!(matches!(err, LbwatchError::MalformedInput(_)));
    }

    #[test]
    fn test_deterministic_output() {
        let first = parse_stats(SAMPLE).unwrap();
        let second = parse_stats(SAMPLE).unwrap();
        assert_eq!(first, second);
    }
}
