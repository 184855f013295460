use tokio::net::TcpListener;
use tracing::{error, info};

use todo_server::{init_logging, seed_if_empty, AppState, ServerConfig, SystemClock, UuidIds};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(config.log_json);

    let store = config.open_store().map_err(|err| {
        error!(error = %err, store = ?config.store, "failed to open store");
        err
    })?;
    if config.seed {
        seed_if_empty(store.as_ref(), &SystemClock, &UuidIds).await?;
    }

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, store = ?config.store, "listening");
    todo_server::run(listener, AppState::new(store)).await?;
    Ok(())
}
