//! Stored record shape and the upstream payload it is normalized from.
//!
//! The collection schema keeps the PokeAPI field names the operators
//! already know (`pokemon_id`, `types`, `stats`, `sprite`) rather than
//! inventing new ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One pokemon document as stored in the collection.
///
/// `pokemon_id` and `name` are unique across the collection (enforced by
/// unique indexes). `updated_at` stays null until an explicit update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub pokemon_id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    /// Type names in slot order, e.g. ["grass", "poison"]
    pub types: Vec<String>,
    /// Stat name -> base value, e.g. {"speed": 45}
    pub stats: BTreeMap<String, i64>,
    /// Front sprite URL, if the catalog has one
    pub sprite: Option<String>,
    pub updated_at: Option<String>,
}

/// Raw catalog payload, only the fields we keep.
///
/// Mirrors `GET /pokemon/{id}`: nested `types[].type.name`,
/// `stats[].stat.name`/`base_stat`, `sprites.front_default`.
#[derive(Debug, Deserialize)]
pub struct ApiPokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<ApiTypeSlot>,
    #[serde(default)]
    pub stats: Vec<ApiStat>,
    #[serde(default)]
    pub sprites: ApiSprites,
}

#[derive(Debug, Deserialize)]
pub struct ApiTypeSlot {
    #[serde(rename = "type")]
    pub type_ref: ApiNamed,
}

#[derive(Debug, Deserialize)]
pub struct ApiStat {
    pub base_stat: i64,
    pub stat: ApiNamed,
}

#[derive(Debug, Deserialize)]
pub struct ApiNamed {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiSprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl From<ApiPokemon> for PokemonRecord {
    fn from(p: ApiPokemon) -> Self {
        Self {
            pokemon_id: p.id,
            name: p.name,
            height: p.height,
            weight: p.weight,
            base_experience: p.base_experience,
            types: p.types.into_iter().map(|t| t.type_ref.name).collect(),
            stats: p
                .stats
                .into_iter()
                .map(|s| (s.stat.name, s.base_stat))
                .collect(),
            sprite: p.sprites.front_default,
            updated_at: None,
        }
    }
}

/// Current UTC time in RFC 3339, used to stamp `updated_at` on mutation.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
