//! Snapshot builder

use chrono::Utc;
use lbwatch_classify::{classify_location, classify_type};
use lbwatch_core::{ClassifiedServer, LbwatchResult, ServerRecord, StatusSnapshot, Summary};
use lbwatch_stats::{parse_stats, StatsSource};
use tracing::debug;

/// Builds status snapshots from a stats source.
///
/// Holds no mutable state; concurrent calls each own their own records and
/// snapshot. A source failure aborts the whole call — no partial snapshot
/// is ever returned.
pub struct StatusMonitor<S: StatsSource> {
    source: S,
}

impl<S: StatsSource> StatusMonitor<S> {
    /// Create a monitor over the given source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch, parse, classify, and aggregate one snapshot
    pub async fn build_snapshot(&self) -> LbwatchResult<StatusSnapshot> {
        let raw = self.source.fetch().await?;
        let records = parse_stats(&raw)?;

        let mut servers: Vec<ClassifiedServer> = records.into_iter().map(classify_record).collect();

        // Summary counters and role selection read input order, so fold
        // before sorting for display.
        let summary = summarize(&servers);

        // Stable sort: priority ascending, active servers first, UP before
        // DOWN; ties keep input order.
        servers.sort_by_key(|s| (s.priority, !s.record.active, !s.record.status.is_up()));

        debug!(
            total = summary.total_servers,
            up = summary.active_servers,
            active = ?summary.active_server,
            "Built status snapshot"
        );

        Ok(StatusSnapshot {
            servers,
            summary,
            generated_at: Utc::now(),
        })
    }
}

fn classify_record(record: ServerRecord) -> ClassifiedServer {
    let kind = classify_type(&record.name);
    let location = classify_location(&record.name);

    ClassifiedServer {
        service_type: kind.label().to_string(),
        icon: kind.icon().to_string(),
        priority: kind.priority(),
        location: location.label().to_string(),
        flag: location.flag().to_string(),
        display_name: format!("{} {} {}", location.flag(), kind.icon(), record.name),
        full_label: format!("{} - {}", location.label(), kind.label()),
        record,
    }
}

fn summarize(servers: &[ClassifiedServer]) -> Summary {
    let total_servers = servers.len();
    let active_servers = servers.iter().filter(|s| s.record.status.is_up()).count();
    let total_connections = servers.iter().map(|s| s.record.current_sessions).sum();
    let total_traffic = servers
        .iter()
        .map(|s| s.record.bytes_in + s.record.bytes_out)
        .sum();

    // Preferred pass: an UP active server currently handling traffic.
    // Assignment without break, so the last qualifying row wins.
    let mut active_server = None;
    for server in servers {
        if server.record.status.is_up()
            && server.record.active
            && server.record.current_sessions > 0
        {
            active_server = Some(server.record.name.clone());
        }
    }

    // Fallback: the first UP active server, idle or not.
    if active_server.is_none() {
        active_server = servers
            .iter()
            .find(|s| s.record.status.is_up() && s.record.active)
            .map(|s| s.record.name.clone());
    }

    let backup_servers = servers
        .iter()
        .filter(|s| s.record.backup && s.record.status.is_up())
        .map(|s| s.record.name.clone())
        .collect();

    Summary {
        total_servers,
        active_servers,
        total_connections,
        total_traffic,
        active_server,
        backup_servers,
    }
}
