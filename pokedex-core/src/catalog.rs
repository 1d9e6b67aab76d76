//! PokeAPI catalog client.
//!
//! One GET per identifier with a bounded retry budget. Transient
//! statuses (429 and the 5xx gateway family) back off linearly and
//! retry; anything else non-2xx fails immediately with the status, the
//! URL, and a truncated body. The `Catalog` trait is the seam the
//! importer is tested through.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::{PokedexError, Result};
use crate::record::{ApiPokemon, PokemonRecord};

/// How a response status steers the retry loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx: parse and return
    Success,
    /// 429, 500, 502, 503, 504: back off and retry
    Transient,
    /// Everything else (404, 400, ...): fail now, no retry
    Permanent,
}

impl StatusClass {
    pub fn of(status: StatusCode) -> Self {
        if status.is_success() {
            return Self::Success;
        }
        match status.as_u16() {
            429 | 500 | 502 | 503 | 504 => Self::Transient,
            _ => Self::Permanent,
        }
    }
}

/// Source of pokemon records, keyed by catalog identifier
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn fetch_pokemon(&self, id: u32) -> Result<PokemonRecord>;
}

/// HTTP client for the public PokeAPI
pub struct PokeApiClient {
    http: Client,
    config: CatalogConfig,
}

impl PokeApiClient {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PokedexError::config(format!("failed to build http client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn url_for(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.config.base_url, id)
    }

    async fn fetch_with_retry(&self, id: u32) -> Result<PokemonRecord> {
        let url = self.url_for(id);
        let max = self.config.max_attempts;
        let mut last_status: u16 = 0;

        for attempt in 0..max {
            let response = match self.http.get(&url).send().await {
                Ok(r) => r,
                Err(e) => {
                    // Transport failures ride the same retry budget as
                    // transient statuses.
                    if attempt + 1 == max {
                        return Err(PokedexError::Http { url, source: e });
                    }
                    let pause = self.config.backoff_step * (attempt + 1);
                    warn!(id, attempt = attempt + 1, error = %e, "catalog request failed, retrying in {:?}", pause);
                    tokio::time::sleep(pause).await;
                    continue;
                }
            };

            let status = response.status();
            match StatusClass::of(status) {
                StatusClass::Success => {
                    debug!(id, attempt = attempt + 1, "catalog fetch ok");
                    let api: ApiPokemon = response
                        .json()
                        .await
                        .map_err(|e| PokedexError::decode(&url, e.to_string()))?;
                    return Ok(api.into());
                }
                StatusClass::Transient => {
                    last_status = status.as_u16();
                    if attempt + 1 == max {
                        break;
                    }
                    let pause = self.config.backoff_step * (attempt + 1);
                    warn!(id, status = last_status, attempt = attempt + 1, "transient catalog status, retrying in {:?}", pause);
                    tokio::time::sleep(pause).await;
                }
                StatusClass::Permanent => {
                    let code = status.as_u16();
                    let body = response.text().await.unwrap_or_default();
                    return Err(PokedexError::permanent_status(code, &url, &body));
                }
            }
        }

        Err(PokedexError::retries_exhausted(last_status, url, max))
    }
}

#[async_trait]
impl Catalog for PokeApiClient {
    async fn fetch_pokemon(&self, id: u32) -> Result<PokemonRecord> {
        self.fetch_with_retry(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(StatusClass::of(StatusCode::OK), StatusClass::Success);
        for code in [429u16, 500, 502, 503, 504] {
            assert_eq!(
                StatusClass::of(StatusCode::from_u16(code).unwrap()),
                StatusClass::Transient,
                "status {code} should retry"
            );
        }
        for code in [400u16, 401, 403, 404, 410, 501] {
            assert_eq!(
                StatusClass::of(StatusCode::from_u16(code).unwrap()),
                StatusClass::Permanent,
                "status {code} should fail fast"
            );
        }
    }

    #[test]
    fn url_uses_numeric_identifier() {
        let client = PokeApiClient::new(CatalogConfig::default()).unwrap();
        assert_eq!(client.url_for(25), "https://pokeapi.co/api/v2/pokemon/25");
    }
}
