//! CLI commands implementation

use anyhow::Result;
use lbwatch_core::StatusSnapshot;

/// API client for communicating with the daemon
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch one status snapshot from the daemon
    pub async fn fetch_snapshot(&self) -> Result<StatusSnapshot> {
        let response = self
            .client
            .get(self.url("/api/v1/status"))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("daemon returned {}: {}", status, body);
        }

        Ok(response.json().await?)
    }
}

/// Print the fleet summary
pub fn print_status(snapshot: &StatusSnapshot) {
    let summary = &snapshot.summary;

    println!("Servers: {} total, {} up", summary.total_servers, summary.active_servers);
    println!("Connections: {}", summary.total_connections);
    println!("Traffic: {}", format_bytes(summary.total_traffic));
    match &summary.active_server {
        Some(name) => println!("Active: {}", name),
        None => println!("Active: none"),
    }
    if summary.backup_servers.is_empty() {
        println!("Backups: none");
    } else {
        println!("Backups: {}", summary.backup_servers.join(", "));
    }
}

/// Print all servers as a table
pub fn print_servers(snapshot: &StatusSnapshot) {
    if snapshot.servers.is_empty() {
        println!("No servers found");
        return;
    }

    println!(
        "{:<20} {:<12} {:<15} {:<10} {:<10} {:<12} {:<8}",
        "NAME", "TYPE", "LOCATION", "STATUS", "SESSIONS", "TRAFFIC", "ROLE"
    );
    println!("{}", "-".repeat(92));
    for server in &snapshot.servers {
        let traffic = format_bytes(server.record.bytes_in + server.record.bytes_out);
        let role = if server.record.active {
            "active"
        } else if server.record.backup {
            "backup"
        } else {
            "-"
        };
        println!(
            "{:<20} {:<12} {:<15} {:<10} {:<10} {:<12} {:<8}",
            server.record.name,
            server.service_type,
            server.location,
            server.record.status,
            server.record.current_sessions,
            traffic,
            role
        );
    }
}

/// Print the full snapshot as JSON
pub fn print_json(snapshot: &StatusSnapshot) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

/// Render a byte count with a binary-scaled unit
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value.fract() == 0.0 {
        format!("{} {}", value as u64, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn test_api_client_url() {
        let client = ApiClient::new("http://localhost:9100/");
        assert_eq!(
            client.url("/api/v1/status"),
            "http://localhost:9100/api/v1/status"
        );
    }
}
