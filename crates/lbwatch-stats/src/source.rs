//! Stats sources
//!
//! A source performs exactly one read-only query per call and returns the
//! raw tabular text. It never retries; the caller decides whether to poll
//! again.

use async_trait::async_trait;
use lbwatch_core::{LbwatchError, LbwatchResult};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::time::timeout;
use tracing::debug;

/// The single line sent to the admin socket to request the stats table
const STATS_QUERY: &[u8] = b"show stat\n";

/// A source of raw load balancer statistics
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch one raw stats table
    async fn fetch(&self) -> LbwatchResult<String>;
}

/// Queries the load balancer's admin Unix socket.
///
/// The whole exchange is bounded by a timeout so callers never hang on an
/// unresponsive socket. The admin socket serves one command per
/// connection; concurrent callers each open their own connection.
pub struct SocketSource {
    socket_path: PathBuf,
    timeout: Duration,
}

impl SocketSource {
    /// Create a source for the given socket path with the default 5s timeout
    pub fn new(socket_path: impl AsRef<Path>) -> Self {
        Self {
            socket_path: socket_path.as_ref().to_path_buf(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set the query timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn query(&self) -> LbwatchResult<String> {
        let mut stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            LbwatchError::SourceUnavailable(format!(
                "cannot reach admin socket {}: {}",
                self.socket_path.display(),
                e
            ))
        })?;

        stream.write_all(STATS_QUERY).await.map_err(|e| {
            LbwatchError::SourceUnavailable(format!("failed to send stats query: {}", e))
        })?;
        // Half-close so the peer sees EOF on the command stream
        stream.shutdown().await.map_err(|e| {
            LbwatchError::SourceUnavailable(format!("failed to send stats query: {}", e))
        })?;

        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.map_err(|e| {
            LbwatchError::SourceUnavailable(format!("failed to read stats response: {}", e))
        })?;

        Ok(raw)
    }
}

#[async_trait]
impl StatsSource for SocketSource {
    async fn fetch(&self) -> LbwatchResult<String> {
        let raw = timeout(self.timeout, self.query()).await.map_err(|_| {
            LbwatchError::SourceUnavailable(format!(
                "stats query to {} timed out after {:?}",
                self.socket_path.display(),
                self.timeout
            ))
        })??;

        if raw.trim().is_empty() {
            return Err(LbwatchError::SourceError(
                "admin socket returned an empty response".to_string(),
            ));
        }

        debug!(
            socket = %self.socket_path.display(),
            bytes = raw.len(),
            "Fetched stats table"
        );
        Ok(raw)
    }
}

/// Reads a saved stats dump from disk.
///
/// Used by the CLI's offline mode and by tests; goes through the same
/// parsing and aggregation path as the live socket.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading the given dump file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl StatsSource for FileSource {
    async fn fetch(&self) -> LbwatchResult<String> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LbwatchError::SourceUnavailable(format!(
                "cannot read stats dump {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if raw.trim().is_empty() {
            return Err(LbwatchError::SourceError(format!(
                "stats dump {} is empty",
                self.path.display()
            )));
        }

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::UnixListener;

    const SAMPLE: &str = "\
# pxname,svname,status,scur,stot,bin,bout,check_status,act,bck,weight\n\
vpn_backend,wg-de-01,UP,5,120,1000,2000,L4OK,1,0,100\n";

    #[tokio::test]
    async fn test_socket_source_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("admin.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut command = String::new();
            stream.read_to_string(&mut command).await.unwrap();
            assert_eq!(command, "show stat\n");
            stream.write_all(SAMPLE.as_bytes()).await.unwrap();
        });

        let source = SocketSource::new(&socket_path);
        let raw = source.fetch().await.unwrap();
        assert_eq!(raw, SAMPLE);

        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_socket_source_unreachable() {
        let source = SocketSource::new("/nonexistent/admin.sock");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LbwatchError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_socket_source_empty_response() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("admin.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut command = String::new();
            stream.read_to_string(&mut command).await.unwrap();
            // Close without writing anything back
        });

        let source = SocketSource::new(&socket_path);
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LbwatchError::SourceError(_)));

        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let dump_path = dir.path().join("stats.csv");
        tokio::fs::write(&dump_path, SAMPLE).await.unwrap();

        let source = FileSource::new(&dump_path);
        assert_eq!(source.fetch().await.unwrap(), SAMPLE);
    }

    #[tokio::test]
    async fn test_file_source_missing() {
        let source = FileSource::new("/nonexistent/stats.csv");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LbwatchError::SourceUnavailable(_)));
    }
}
