use std::{net::SocketAddr, time::Duration};

use tokio::{signal, sync::watch};
use wallkeep::{app, sessions, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "wallkeep=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    if config.uses_dev_secret() {
        tracing::warn!("SESSION_SECRET not set; using the insecure development secret");
    }
    if !config.session.cookie_secure {
        tracing::warn!("session cookie is not marked Secure; set COOKIE_SECURE=true behind TLS");
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let sweep_every = Duration::from_secs(config.session.sweep_interval_secs);

    let state = AppState::init(config).await?;

    let (stop_tx, stop_rx) = watch::channel(false);
    let sweeper = sessions::spawn_sweeper(state.db.clone(), sweep_every, stop_rx);

    let router = app::build_app(state.clone())?;
    app::serve(router, addr, shutdown_signal()).await?;

    let _ = stop_tx.send(true);
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "session sweeper did not stop cleanly");
    }
    state.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
