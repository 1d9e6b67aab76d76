//! pokedexd: admin API daemon.
//!
//! Environment:
//!   MONGO_URI             MongoDB connection string (required)
//!   DB_NAME               database name (default: pokedex)
//!   COLLECTION_NAME       collection name (default: pokemon)
//!   POKEAPI_BASE_URL      catalog root (default: https://pokeapi.co/api/v2)
//!   POKEDEX_BIND_ADDR     listen address (default: 127.0.0.1:3030)
//!   RUST_LOG              log filter (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use pokedex_core::{load_dotenv, CatalogConfig, PokeApiClient, PokedexStore, StoreConfig};
use pokedex_server::{run_server, AppState, ServerConfig};

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    init_tracing()?;

    let store_config = StoreConfig::from_env()?;
    let store = PokedexStore::connect(&store_config).await?;
    store.ensure_indexes().await?;

    let catalog = PokeApiClient::new(CatalogConfig::from_env())?;

    let state = AppState::new(store.clone(), catalog);
    run_server(state, ServerConfig::from_env()).await?;

    store.shutdown().await;
    Ok(())
}
