pub mod catalog;
pub mod config;
pub mod error;
pub mod import;
pub mod query;
pub mod record;
pub mod store;

pub use catalog::{Catalog, PokeApiClient, StatusClass};
pub use config::{load_dotenv, CatalogConfig, StoreConfig};
pub use error::{PokedexError, Result};
pub use import::{import_range, ImportReport, RecordSink, UpsertOutcome};
pub use query::{SearchCriteria, SearchPage, SortDirection, SortField};
pub use record::PokemonRecord;
pub use store::{PokedexStore, SearchOutcome, UpdateOutcome};
