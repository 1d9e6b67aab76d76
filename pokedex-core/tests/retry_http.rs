//! Retry-protocol tests against a scripted local HTTP listener.
//!
//! Each test spins up an axum app on 127.0.0.1:0 that answers
//! `GET /pokemon/{id}` with a fixed sequence of statuses, then points a
//! `PokeApiClient` (with a millisecond backoff step) at it.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use pokedex_core::{Catalog, CatalogConfig, PokeApiClient, PokedexError};

struct Script {
    statuses: Vec<u16>,
    hits: AtomicUsize,
}

async fn serve_pokemon(
    State(script): State<Arc<Script>>,
    Path(id): Path<u32>,
) -> Response {
    let n = script.hits.fetch_add(1, Ordering::SeqCst);
    let code = *script
        .statuses
        .get(n)
        .or_else(|| script.statuses.last())
        .unwrap_or(&200);

    if code == 200 {
        Json(json!({
            "id": id,
            "name": format!("mon-{id}"),
            "height": 7,
            "weight": 69,
            "base_experience": 64,
            "types": [{"slot": 1, "type": {"name": "grass", "url": ""}}],
            "stats": [{"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}}],
            "sprites": {"front_default": null}
        }))
        .into_response()
    } else {
        (
            StatusCode::from_u16(code).unwrap(),
            "scripted upstream failure",
        )
            .into_response()
    }
}

async fn spawn_catalog(statuses: Vec<u16>) -> (SocketAddr, Arc<Script>) {
    let script = Arc::new(Script {
        statuses,
        hits: AtomicUsize::new(0),
    });
    let app = Router::new()
        .route("/pokemon/{id}", get(serve_pokemon))
        .with_state(script.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, script)
}

fn client_for(addr: SocketAddr) -> PokeApiClient {
    let config = CatalogConfig {
        base_url: format!("http://{addr}"),
        timeout: Duration::from_secs(5),
        backoff_step: Duration::from_millis(2),
        ..Default::default()
    };
    PokeApiClient::new(config).unwrap()
}

#[tokio::test]
async fn success_parses_the_record() {
    let (addr, script) = spawn_catalog(vec![200]).await;
    let client = client_for(addr);

    let record = client.fetch_pokemon(1).await.unwrap();
    assert_eq!(record.pokemon_id, 1);
    assert_eq!(record.name, "mon-1");
    assert_eq!(record.types, vec!["grass"]);
    assert_eq!(script.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn not_found_fails_immediately_with_one_attempt() {
    let (addr, script) = spawn_catalog(vec![404]).await;
    let client = client_for(addr);

    let err = client.fetch_pokemon(9999).await.unwrap_err();
    match err {
        PokedexError::PermanentStatus { status, url, body } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/pokemon/9999"));
            assert!(body.contains("scripted upstream failure"));
        }
        other => panic!("expected PermanentStatus, got {other:?}"),
    }
    assert_eq!(script.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transient_statuses_retry_until_success() {
    let (addr, script) = spawn_catalog(vec![503, 503, 503, 503, 200]).await;
    let client = client_for(addr);

    let record = client.fetch_pokemon(7).await.unwrap();
    assert_eq!(record.pokemon_id, 7);
    assert_eq!(script.hits.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn exhausted_retries_name_the_last_status_and_url() {
    let (addr, script) = spawn_catalog(vec![500, 500, 500, 500, 500]).await;
    let client = client_for(addr);

    let err = client.fetch_pokemon(9).await.unwrap_err();
    match err {
        PokedexError::RetriesExhausted {
            last_status,
            url,
            attempts,
        } => {
            assert_eq!(last_status, 500);
            assert!(url.ends_with("/pokemon/9"));
            assert_eq!(attempts, 5);
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(script.hits.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn rate_limit_is_transient() {
    let (addr, script) = spawn_catalog(vec![429, 200]).await;
    let client = client_for(addr);

    let record = client.fetch_pokemon(3).await.unwrap();
    assert_eq!(record.pokemon_id, 3);
    assert_eq!(script.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn bad_request_does_not_retry() {
    let (addr, script) = spawn_catalog(vec![400, 200]).await;
    let client = client_for(addr);

    let err = client.fetch_pokemon(5).await.unwrap_err();
    assert!(matches!(err, PokedexError::PermanentStatus { status: 400, .. }));
    assert_eq!(script.hits.load(Ordering::SeqCst), 1);
}
