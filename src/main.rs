use quest_log::{resolve_data_dir, router, AppState, RecordStore};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let store = RecordStore::new(resolve_data_dir());
    fs::create_dir_all(store.dir()).await?;

    let state = AppState::load(store).await;
    {
        let records = state.records.lock().await;
        info!(
            quests = records.quests.len(),
            habits = records.habits.len(),
            dir = %state.store.dir().display(),
            "records loaded"
        );
    }

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
