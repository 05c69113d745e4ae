//! Reading connection parameters from the lockfile a running client writes.

use lol_types::Credentials;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::HttpError;

pub const LOCKFILE_WAIT_TIMEOUT: Duration = Duration::from_secs(60);
pub const LOCKFILE_POLL_INTERVAL: Duration = Duration::from_secs(1);

const PORT_FIELD: usize = 2;
const SECRET_FIELD: usize = 3;

/// Which client's lockfile to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    LeagueClient,
    RiotClient,
}

/// Waits for a lockfile to appear, then parses it. Nothing is cached: the
/// port and secret change every time the client restarts.
#[derive(Debug, Clone, Copy)]
pub struct LockfileResolver {
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for LockfileResolver {
    fn default() -> Self {
        Self {
            timeout: LOCKFILE_WAIT_TIMEOUT,
            poll_interval: LOCKFILE_POLL_INTERVAL,
        }
    }
}

impl LockfileResolver {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    pub async fn resolve(&self, path: &Path) -> Result<Credentials, HttpError> {
        let mut waited = Duration::ZERO;
        while !tokio::fs::try_exists(path).await.unwrap_or(false) {
            if waited >= self.timeout {
                return Err(HttpError::LockfileMissing {
                    path: path.to_path_buf(),
                    waited,
                });
            }
            if waited.is_zero() {
                info!("Waiting for lockfile at {}", path.display());
            }
            sleep(self.poll_interval).await;
            waited += self.poll_interval;
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| HttpError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let credentials = parse(path, &content)?;
        debug!("Lockfile {} -> port {}", path.display(), credentials.port);
        Ok(credentials)
    }
}

/// Parse `name:pid:port:secret:protocol`.
pub fn parse(path: &Path, content: &str) -> Result<Credentials, HttpError> {
    let fields: Vec<&str> = content.trim().split(':').collect();
    if fields.len() <= SECRET_FIELD {
        return Err(HttpError::MalformedLockfile {
            path: path.to_path_buf(),
            fields: fields.len(),
        });
    }
    Ok(Credentials {
        port: fields[PORT_FIELD].to_string(),
        secret: fields[SECRET_FIELD].to_string(),
    })
}

/// Best-effort removal of a stale lockfile. Returns whether a file was removed.
pub fn remove(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            debug!("Lockfile {} not removed: {}", path.display(), e);
            false
        }
    }
}

/// Where the client writes its lockfile on this OS.
pub fn default_path(kind: ClientKind) -> PathBuf {
    match kind {
        ClientKind::RiotClient => {
            let base = std::env::var_os("LOCALAPPDATA").unwrap_or_default();
            PathBuf::from(base)
                .join("Riot Games")
                .join("Riot Client")
                .join("Config")
                .join("lockfile")
        }
        ClientKind::LeagueClient if cfg!(target_os = "macos") => {
            PathBuf::from("/Applications/League of Legends.app/Contents/LoL/lockfile")
        }
        ClientKind::LeagueClient => PathBuf::from(r"C:\Riot Games\League of Legends\lockfile"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_parse_extracts_port_and_secret() {
        let creds = parse(
            Path::new("lockfile"),
            "LeagueClient:12345:54321:mypassword:https",
        )
        .unwrap();
        assert_eq!(
            creds,
            Credentials {
                port: "54321".into(),
                secret: "mypassword".into()
            }
        );
    }

    #[test]
    fn test_parse_ignores_trailing_newline() {
        let creds = parse(Path::new("lockfile"), "Riot Client:1:2999:s3cr3t:https\n").unwrap();
        assert_eq!(creds.port, "2999");
        assert_eq!(creds.secret, "s3cr3t");
    }

    #[test]
    fn test_parse_rejects_short_records() {
        let err = parse(Path::new("lockfile"), "LeagueClient:12345:54321").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(matches!(err, HttpError::MalformedLockfile { fields: 3, .. }));
    }

    #[tokio::test]
    async fn test_resolve_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lockfile");
        std::fs::write(&path, "LeagueClient:12345:54321:mypassword:https").unwrap();

        let creds = LockfileResolver::default().resolve(&path).await.unwrap();
        assert_eq!(creds.port, "54321");
        assert_eq!(creds.secret, "mypassword");
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_gives_up_after_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lockfile");

        let start = tokio::time::Instant::now();
        let err = LockfileResolver::default().resolve(&path).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("lockfile"));
        assert!(start.elapsed() >= LOCKFILE_WAIT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_resolve_waits_for_file_to_appear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lockfile");
        let writer_path = path.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(30)).await;
            std::fs::write(writer_path, "LeagueClient:1:4000:late:https").unwrap();
        });

        let resolver = LockfileResolver::new(Duration::from_secs(5), Duration::from_millis(10));
        let creds = resolver.resolve(&path).await.unwrap();
        assert_eq!(creds.secret, "late");
    }

    #[test]
    fn test_remove_is_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lockfile");
        assert!(!remove(&path));
        std::fs::write(&path, "x").unwrap();
        assert!(remove(&path));
        assert!(!path.exists());
    }
}
