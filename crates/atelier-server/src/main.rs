//! Atelier server binary

use anyhow::Context as _;
use atelier_core::{FsMetaStore, Preferences};
use atelier_dispatch::{Dispatcher, EnvironmentRegistry, ProcessEnvironmentFactory};
use atelier_filter::PythonSourceFilter;
use atelier_server::{exec_route, ServerState};
use clap::{Arg, Command};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Command::new("atelier-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Atelier per-project execution service")
        .arg(
            Arg::new("listen")
                .long("listen")
                .default_value("127.0.0.1:8080")
                .help("Address to listen on"),
        )
        .arg(
            Arg::new("metastore-root")
                .long("metastore-root")
                .required(true)
                .help("Root directory of the project metastore"),
        )
        .arg(
            Arg::new("prefs")
                .long("prefs")
                .help("Server preferences file (TOML); execution stays disabled without one"),
        );
    let matches = cli.get_matches();

    let listen: SocketAddr = matches
        .get_one::<String>("listen")
        .context("listen address missing")?
        .parse()
        .context("invalid listen address")?;
    let metastore_root = matches
        .get_one::<String>("metastore-root")
        .context("metastore root missing")?;
    let prefs = match matches.get_one::<String>("prefs") {
        Some(path) => Preferences::load(path).context("loading preferences")?,
        None => Preferences::new(),
    };

    let registry = Arc::new(EnvironmentRegistry::new(ProcessEnvironmentFactory));
    let dispatcher = Dispatcher::new(
        Arc::new(FsMetaStore::new(metastore_root)),
        Arc::new(PythonSourceFilter::new()),
        registry,
    );
    let state = Arc::new(ServerState { prefs, dispatcher });

    tracing::info!(%listen, metastore = %metastore_root, "atelier server listening");
    let (_, server) = warp::serve(exec_route(state.clone())).bind_with_graceful_shutdown(
        listen,
        async {
            let _ = tokio::signal::ctrl_c().await;
        },
    );
    server.await;

    tracing::info!("shutting down execution environments");
    state.dispatcher.registry().shutdown_all().await;
    Ok(())
}
