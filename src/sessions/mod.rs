pub mod cookie;
pub mod repo;

use std::time::Duration;

use sqlx::SqlitePool;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

pub use repo::Session;

/// Periodically deletes expired session rows until `shutdown` flips to true.
pub fn spawn_sweeper(
    db: SqlitePool,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match Session::purge_expired(&db).await {
                        Ok(0) => debug!("no expired sessions"),
                        Ok(n) => info!(purged = n, "expired sessions removed"),
                        Err(e) => warn!(error = %e, "session sweep failed"),
                    }
                }
                _ = shutdown.changed() => break,
            }
        }
        debug!("session sweeper stopped");
    })
}
