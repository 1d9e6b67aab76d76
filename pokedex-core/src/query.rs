//! Filter-document construction and pagination math.
//!
//! All supplied criteria are AND-combined; absent criteria leave no
//! trace in the filter. The built document is returned to callers
//! verbatim so the UI can show exactly what was asked of the store.

use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

/// Optional search criteria; `None` means "no constraint"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the name (regex-escaped)
    pub name_contains: Option<String>,
    pub pokemon_id: Option<u32>,
    /// Exact type membership, e.g. "fire"
    pub type_is: Option<String>,
    /// Inclusive lower weight bound
    pub min_weight: Option<i64>,
    /// Inclusive upper weight bound
    pub max_weight: Option<i64>,
}

impl SearchCriteria {
    /// Build the store filter document
    pub fn to_filter(&self) -> Document {
        let mut filter = Document::new();

        if let Some(id) = self.pokemon_id {
            filter.insert("pokemon_id", i64::from(id));
        }

        if let Some(fragment) = self.name_contains.as_deref().filter(|s| !s.is_empty()) {
            filter.insert(
                "name",
                doc! { "$regex": regex::escape(fragment), "$options": "i" },
            );
        }

        if let Some(type_name) = self.type_is.as_deref().filter(|s| !s.is_empty()) {
            filter.insert("types", type_name);
        }

        let mut weight = Document::new();
        if let Some(min) = self.min_weight {
            weight.insert("$gte", min);
        }
        if let Some(max) = self.max_weight {
            weight.insert("$lte", max);
        }
        if !weight.is_empty() {
            filter.insert("weight", weight);
        }

        filter
    }
}

/// Fields a result set may be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    PokemonId,
    Name,
    Weight,
    Height,
    BaseExperience,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PokemonId => "pokemon_id",
            Self::Name => "name",
            Self::Weight => "weight",
            Self::Height => "height",
            Self::BaseExperience => "base_experience",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_int(&self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// Sort specification as the store expects it
pub fn sort_doc(field: SortField, direction: SortDirection) -> Document {
    doc! { field.as_str(): direction.as_int() }
}

/// A window into the result set
#[derive(Debug, Clone, Copy)]
pub struct SearchPage {
    pub limit: i64,
    pub skip: u64,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self { limit: 10, skip: 0 }
    }
}

impl SearchPage {
    /// Page-based window: page 1 starts at the first record.
    ///
    /// `page` arrives unbounded from the query string; the skip
    /// saturates instead of overflowing, which just yields an empty
    /// page far past the end of the collection.
    pub fn for_page(page: u64, limit: i64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        Self {
            limit,
            skip: (page - 1).saturating_mul(limit as u64),
        }
    }
}
