use std::net::Ipv4Addr;
use std::sync::Arc;

use log::info;

use recipe_share::{app, AppConfig, SupabaseStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Misconfiguration is fatal here, before any request is accepted
    let config = AppConfig::load()?;
    let store = Arc::new(SupabaseStore::new(&config.store));

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.port)).await?;
    info!("listening on port {}", config.port);
    axum::serve(listener, app(store)).await?;

    Ok(())
}
