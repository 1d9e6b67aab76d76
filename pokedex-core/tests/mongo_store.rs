//! Store integration tests.
//!
//! Run against a live MongoDB:
//!   MONGO_URI=mongodb://localhost:27017 cargo test -p pokedex-core -- --ignored

use std::collections::BTreeMap;

use pokedex_core::{
    PokedexStore, PokemonRecord, RecordSink, SearchCriteria, SearchPage, SortDirection,
    SortField, StoreConfig, UpsertOutcome,
};

fn test_config(suffix: &str) -> StoreConfig {
    StoreConfig {
        uri: std::env::var("MONGO_URI").expect("MONGO_URI must be set for ignored tests"),
        database: format!("pokedex_test_{}_{}", std::process::id(), suffix),
        collection: "pokemon".to_string(),
    }
}

fn mon(id: u32, name: &str, weight: u32, types: &[&str]) -> PokemonRecord {
    PokemonRecord {
        pokemon_id: id,
        name: name.to_string(),
        height: id,
        weight,
        base_experience: Some(50 + id),
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: BTreeMap::from([("hp".to_string(), 45i64)]),
        sprite: None,
        updated_at: None,
    }
}

async fn seeded_store(suffix: &str) -> PokedexStore {
    let store = PokedexStore::connect(&test_config(suffix)).await.unwrap();
    store.drop_database().await.unwrap();
    store.ensure_indexes().await.unwrap();
    for rec in [
        mon(1, "bulbasaur", 69, &["grass", "poison"]),
        mon(4, "charmander", 85, &["fire"]),
        mon(7, "squirtle", 90, &["water"]),
        mon(25, "pikachu", 60, &["electric"]),
        mon(37, "vulpix", 99, &["fire"]),
    ] {
        store.upsert_if_absent(&rec).await.unwrap();
    }
    store
}

#[tokio::test]
#[ignore]
async fn upsert_if_absent_never_overwrites() {
    let store = PokedexStore::connect(&test_config("upsert")).await.unwrap();
    store.drop_database().await.unwrap();
    store.ensure_indexes().await.unwrap();

    let original = mon(1, "bulbasaur", 69, &["grass"]);
    assert_eq!(
        store.upsert_if_absent(&original).await.unwrap(),
        UpsertOutcome::Inserted
    );

    // same id, different payload: must be a no-op
    let imposter = mon(1, "bulbasaur", 9999, &["steel"]);
    assert_eq!(
        store.upsert_if_absent(&imposter).await.unwrap(),
        UpsertOutcome::AlreadyExists
    );

    let found = store
        .search(
            &SearchCriteria {
                pokemon_id: Some(1),
                ..Default::default()
            },
            SortField::PokemonId,
            SortDirection::Asc,
            SearchPage::default(),
        )
        .await
        .unwrap();
    assert_eq!(found.results[0].weight, 69);

    store.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn search_filters_sorts_and_pages() {
    let store = seeded_store("search").await;

    // substring match is case-insensitive
    let out = store
        .search(
            &SearchCriteria {
                name_contains: Some("CHAR".into()),
                ..Default::default()
            },
            SortField::PokemonId,
            SortDirection::Asc,
            SearchPage::default(),
        )
        .await
        .unwrap();
    assert_eq!(out.total, 1);
    assert_eq!(out.results[0].name, "charmander");

    // weight bounds are inclusive and AND-combined with type
    let out = store
        .search(
            &SearchCriteria {
                type_is: Some("fire".into()),
                min_weight: Some(85),
                max_weight: Some(99),
                ..Default::default()
            },
            SortField::Weight,
            SortDirection::Desc,
            SearchPage::default(),
        )
        .await
        .unwrap();
    assert_eq!(out.total, 2);
    assert_eq!(out.results[0].name, "vulpix");
    assert_eq!(out.results[1].name, "charmander");

    // total counts all matches; the window only trims results
    let out = store
        .search(
            &SearchCriteria::default(),
            SortField::PokemonId,
            SortDirection::Asc,
            SearchPage::for_page(2, 2),
        )
        .await
        .unwrap();
    assert_eq!(out.total, 5);
    assert_eq!(out.results.len(), 2);
    assert_eq!(out.results[0].pokemon_id, 7);
    assert_eq!(out.results[1].pokemon_id, 25);

    store.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn update_and_delete_by_name() {
    let store = seeded_store("mutate").await;

    let out = store
        .update_by_name("pikachu", mongodb::bson::doc! { "weight": 999 })
        .await
        .unwrap();
    assert_eq!(out.matched, 1);
    assert_eq!(out.modified, 1);

    // unknown name: zero matched, no error
    let out = store
        .update_by_name("missingno", mongodb::bson::doc! { "weight": 1 })
        .await
        .unwrap();
    assert_eq!(out.matched, 0);

    assert_eq!(store.delete_by_name("pikachu").await.unwrap(), 1);
    assert_eq!(store.delete_by_name("pikachu").await.unwrap(), 0);

    store.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn delete_by_type_removes_exactly_the_members() {
    let store = seeded_store("bytype").await;

    assert_eq!(store.delete_by_type("fire").await.unwrap(), 2);

    let out = store
        .search(
            &SearchCriteria::default(),
            SortField::Name,
            SortDirection::Asc,
            SearchPage::default(),
        )
        .await
        .unwrap();
    assert_eq!(out.total, 3);
    assert!(out.results.iter().all(|r| !r.types.contains(&"fire".to_string())));

    store.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn drop_collection_empties_everything() {
    let store = seeded_store("drop").await;

    store.drop_collection().await.unwrap();

    let out = store
        .search(
            &SearchCriteria::default(),
            SortField::PokemonId,
            SortDirection::Asc,
            SearchPage::default(),
        )
        .await
        .unwrap();
    assert_eq!(out.total, 0);
    assert!(out.results.is_empty());

    store.drop_database().await.unwrap();
}
