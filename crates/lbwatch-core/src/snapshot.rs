//! Status snapshot types
//!
//! The immutable result of one poll: every classified server plus the
//! fleet-wide summary. Built fresh per call and never mutated after
//! construction.

use crate::ServerRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server record together with its name-derived classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedServer {
    /// The parsed stats row
    #[serde(flatten)]
    pub record: ServerRecord,
    /// Service type label
    #[serde(rename = "type")]
    pub service_type: String,
    /// Service type icon
    pub icon: String,
    /// Service type ordering rank
    pub priority: u8,
    /// Location label
    pub location: String,
    /// Location flag
    pub flag: String,
    /// Composite label: "{flag} {icon} {name}"
    pub display_name: String,
    /// Composite label: "{location} - {type}"
    pub full_label: String,
}

/// Fleet-wide summary counters for one poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of individual servers in the stats table
    pub total_servers: usize,
    /// Number of servers with status UP
    pub active_servers: usize,
    /// Sum of current sessions across all servers
    pub total_connections: u64,
    /// Sum of bytes in + bytes out across all servers
    pub total_traffic: u64,
    /// Name of the server currently handling traffic, if any
    pub active_server: Option<String>,
    /// Names of UP servers configured as backups
    pub backup_servers: Vec<String>,
}

/// One point-in-time aggregation of all server statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Classified servers, sorted by (priority, active-first, UP-first).
    /// Serializes as a name-keyed map preserving that order.
    #[serde(with = "server_map")]
    pub servers: Vec<ClassifiedServer>,
    /// Summary counters
    pub summary: Summary,
    /// When this snapshot was built
    pub generated_at: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Look up a server entry by name
    pub fn server(&self, name: &str) -> Option<&ClassifiedServer> {
        self.servers.iter().find(|s| s.record.name == name)
    }
}

/// Serializes the ordered server list as a name → entry map, mirroring the
/// wire format consumers expect while keeping the sort order intact.
mod server_map {
    use super::ClassifiedServer;
    use serde::de::{Deserializer, MapAccess, Visitor};
    use serde::ser::{SerializeMap, Serializer};

    pub fn serialize<S>(servers: &[ClassifiedServer], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(servers.len()))?;
        for server in servers {
            map.serialize_entry(&server.record.name, server)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<ClassifiedServer>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ServerMapVisitor;

        impl<'de> Visitor<'de> for ServerMapVisitor {
            type Value = Vec<ClassifiedServer>;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of server name to server entry")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut servers = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((_, server)) = access.next_entry::<String, ClassifiedServer>()? {
                    servers.push(server);
                }
                Ok(servers)
            }
        }

        deserializer.deserialize_map(ServerMapVisitor)
    }
}
