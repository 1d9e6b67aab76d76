//! Batch import: walk an inclusive identifier range, fetch each record
//! from the catalog, and insert it only if the identifier is absent.
//!
//! One bad identifier never aborts the batch; its failure is logged and
//! recorded in the report. Only an invalid range fails the whole call.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::{PokedexError, Result};
use crate::record::PokemonRecord;

/// What an upsert-if-absent did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    AlreadyExists,
}

/// Destination for imported records.
///
/// Implemented by the MongoDB store; tests substitute an in-memory map.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Create indexes backing the uniqueness invariants
    async fn ensure_indexes(&self) -> Result<()>;

    /// Insert only when `pokemon_id` is absent; never touch an existing
    /// document
    async fn upsert_if_absent(&self, record: &PokemonRecord) -> Result<UpsertOutcome>;
}

/// Aggregate outcome of an import batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub inserted: u64,
    pub existing: u64,
    pub failed_ids: Vec<u32>,
}

impl ImportReport {
    pub fn failed(&self) -> u64 {
        self.failed_ids.len() as u64
    }

    /// inserted + existing + failed; equals the range width when the
    /// batch ran to completion
    pub fn total(&self) -> u64 {
        self.inserted + self.existing + self.failed()
    }
}

/// Import every identifier in `[start, end]`, strictly sequentially.
///
/// `request_delay` is the courtesy pause between consecutive upstream
/// requests; pass `Duration::ZERO` to disable.
pub async fn import_range(
    catalog: &dyn Catalog,
    sink: &dyn RecordSink,
    start: u32,
    end: u32,
    request_delay: Duration,
) -> Result<ImportReport> {
    if start < 1 || end < start {
        return Err(PokedexError::invalid_range(i64::from(start), i64::from(end)));
    }

    sink.ensure_indexes().await?;

    let mut report = ImportReport::default();
    for id in start..=end {
        match import_one(catalog, sink, id).await {
            Ok(UpsertOutcome::Inserted) => report.inserted += 1,
            Ok(UpsertOutcome::AlreadyExists) => report.existing += 1,
            Err(e) => {
                warn!(id, error = %e, "import failed for identifier");
                report.failed_ids.push(id);
            }
        }
        if id != end && !request_delay.is_zero() {
            tokio::time::sleep(request_delay).await;
        }
    }

    info!(
        inserted = report.inserted,
        existing = report.existing,
        failed = report.failed(),
        "import batch [{start}, {end}] complete"
    );
    Ok(report)
}

async fn import_one(catalog: &dyn Catalog, sink: &dyn RecordSink, id: u32) -> Result<UpsertOutcome> {
    let record = catalog.fetch_pokemon(id).await?;
    sink.upsert_if_absent(&record).await
}
