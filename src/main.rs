use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use album_nexus::{AlbumError, Config, MongoStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), AlbumError> {
    let dotenv = dotenvy::dotenv();
    let cfg = Config::from_env();

    let loglevel = cfg
        .as_ref()
        .map(|c| c.loglevel.clone())
        .unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(loglevel));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if let Err(e) = dotenv {
        info!(error = %e, "no .env file found");
    }

    let cfg = cfg.inspect_err(|e| error!(error = %e, "invalid configuration"))?;
    info!(
        database = %cfg.mongo_default_database,
        collection = %cfg.mongo_collection,
        loglevel = %cfg.loglevel
    );

    let store = MongoStore::connect(&cfg)
        .await
        .inspect_err(|e| error!(error = %e, "could not connect to MongoDB"))?;

    let state = album_nexus::router::AlbumState::new(store);
    let app = album_nexus::router::album_router(state);

    let addr = "0.0.0.0:8000";
    let listener = TcpListener::bind(addr)
        .await
        .inspect_err(|e| error!(error = %e, addr, "could not bind listener"))?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutting down");
}
