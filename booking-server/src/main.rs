use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_server::engine::BookingConfig;
use booking_server::loader::{LoaderConfig, load_inventory};
use booking_server::search::SearchConfig;
use booking_server::web::{AppState, ServerConfig, create_router};

/// Read and parse `name` from the environment. Unparseable values are
/// logged and treated as unset.
fn env_var<T: FromStr>(name: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(var = name, value = %raw, error = %e, "ignoring invalid setting");
            None
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let defaults = LoaderConfig::default();
    let loader_config = LoaderConfig::new(
        env_var::<PathBuf>("TRANSPORT_DATA_DIR").unwrap_or(defaults.data_dir),
        defaults.min_occupancy,
        defaults.max_occupancy,
        env_var("SEED"),
    );

    let defaults = SearchConfig::default();
    let search_config = SearchConfig::new(
        env_var("SEARCH_WORKERS").unwrap_or(defaults.workers),
        env_var("SEARCH_WIDEN_DAYS").unwrap_or(defaults.widen_days),
    );

    let booking_config = env_var("BOOKING_MAX_PARTY")
        .map(BookingConfig::new)
        .unwrap_or_default();

    let server_config = env_var::<SocketAddr>("BOOKING_BIND_ADDR")
        .map(ServerConfig::new)
        .unwrap_or_default();

    let inventory = match load_inventory(&loader_config) {
        Ok(inventory) => inventory,
        Err(e) => {
            tracing::error!(error = %e, "failed to load transports");
            std::process::exit(1);
        }
    };

    let state = AppState::new(inventory, search_config, booking_config);
    let app = create_router(state);

    let addr = server_config.bind_addr;
    tracing::info!("Booking server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
