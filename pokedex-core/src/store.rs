//! MongoDB store façade.
//!
//! A thin handle over one collection; every method is a direct
//! translation to the driver with no business logic of its own. The
//! handle is constructed explicitly and passed around rather than
//! living in module-level state, so its lifecycle is the caller's.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, to_document, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::import::{RecordSink, UpsertOutcome};
use crate::query::{sort_doc, SearchCriteria, SearchPage, SortDirection, SortField};
use crate::record::PokemonRecord;

/// One page of search results plus the filter that produced it
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub total: u64,
    pub results: Vec<PokemonRecord>,
    /// The exact filter document sent to the store, for transparency
    pub query: Document,
}

/// Matched/modified counts from an update
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Handle to the pokemon collection
#[derive(Clone)]
pub struct PokedexStore {
    client: Client,
    db: Database,
    col: Collection<PokemonRecord>,
}

impl PokedexStore {
    /// Connect and bind to the configured database/collection
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let db = client.database(&config.database);
        let col = db.collection::<PokemonRecord>(&config.collection);
        info!(
            database = %config.database,
            collection = %config.collection,
            "connected to document store"
        );
        Ok(Self { client, db, col })
    }

    /// Unique indexes on `pokemon_id` and `name`, non-unique on `types`
    pub async fn ensure_indexes(&self) -> Result<()> {
        let unique = IndexOptions::builder().unique(true).build();
        let models = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(unique.clone())
                .build(),
            IndexModel::builder()
                .keys(doc! { "pokemon_id": 1 })
                .options(unique)
                .build(),
            IndexModel::builder().keys(doc! { "types": 1 }).build(),
        ];
        self.col.create_indexes(models).await?;
        Ok(())
    }

    /// Filtered find with sort/skip/limit, plus the total match count
    /// over the same filter (ignoring the window)
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        sort_field: SortField,
        sort_direction: SortDirection,
        page: SearchPage,
    ) -> Result<SearchOutcome> {
        let filter = criteria.to_filter();

        let cursor = self
            .col
            .find(filter.clone())
            .projection(doc! { "_id": 0 })
            .sort(sort_doc(sort_field, sort_direction))
            .skip(page.skip)
            .limit(page.limit)
            .await?;
        let results: Vec<PokemonRecord> = cursor.try_collect().await?;

        let total = self.col.count_documents(filter.clone()).await?;

        Ok(SearchOutcome {
            total,
            results,
            query: filter,
        })
    }

    /// `$set` the given fields on the record with this exact name.
    /// Zero matches is an outcome, not an error.
    pub async fn update_by_name(&self, name: &str, fields: Document) -> Result<UpdateOutcome> {
        let result = self
            .col
            .update_one(doc! { "name": name }, doc! { "$set": fields })
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    /// Delete the record with this exact name; returns 0 or 1
    pub async fn delete_by_name(&self, name: &str) -> Result<u64> {
        let result = self.col.delete_one(doc! { "name": name }).await?;
        Ok(result.deleted_count)
    }

    /// Delete every record whose `types` contains this value
    pub async fn delete_by_type(&self, type_name: &str) -> Result<u64> {
        let result = self.col.delete_many(doc! { "types": type_name }).await?;
        Ok(result.deleted_count)
    }

    /// Irreversibly drop the collection; the database remains
    pub async fn drop_collection(&self) -> Result<()> {
        warn!(collection = %self.col.name(), "dropping collection");
        self.col.drop().await?;
        Ok(())
    }

    /// Irreversibly drop the whole database
    pub async fn drop_database(&self) -> Result<()> {
        warn!(database = %self.db.name(), "dropping database");
        self.db.drop().await?;
        Ok(())
    }

    /// Close the connection pool. Call once the last user of the store
    /// is done; clones share the pool, so shut down only the final one.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl RecordSink for PokedexStore {
    async fn ensure_indexes(&self) -> Result<()> {
        PokedexStore::ensure_indexes(self).await
    }

    /// `$setOnInsert` + upsert: a document is written only when no
    /// document with this `pokemon_id` exists; an existing one is never
    /// refreshed
    async fn upsert_if_absent(&self, record: &PokemonRecord) -> Result<UpsertOutcome> {
        let doc = to_document(record).map_err(mongodb::error::Error::from)?;
        let result = self
            .col
            .update_one(
                doc! { "pokemon_id": i64::from(record.pokemon_id) },
                doc! { "$setOnInsert": doc },
            )
            .upsert(true)
            .await?;
        if result.upserted_id.is_some() {
            Ok(UpsertOutcome::Inserted)
        } else {
            Ok(UpsertOutcome::AlreadyExists)
        }
    }
}
