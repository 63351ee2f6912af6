use crate::error::QueryError;
use crate::models::{ApiPokemon, Entry, Pokemon};
use crate::sprite::{Sprite, SPRITE_SIZE};
use reqwest::StatusCode;

/// Thin client over the catalog's `/pokemon/{name}` endpoint.
#[derive(Debug, Clone)]
pub struct PokeClient {
    base_url: String,
    http: reqwest::Client,
}

impl PokeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// URL for a single lookup. `name` goes in as given; the caller lowercases it.
    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    /// One GET, no retries. 404 means the name is unknown.
    pub async fn fetch(&self, name: &str) -> Result<Pokemon, QueryError> {
        let url = self.pokemon_url(name);
        tracing::debug!(%url, "requesting pokemon");
        let res = self.http.get(&url).send().await?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(QueryError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(QueryError::Network(format!("HTTP {} from {}", status, url)));
        }

        let api: ApiPokemon = res.json().await?;
        Pokemon::try_from(api)
    }

    /// Download a sprite and scale it to `SPRITE_SIZE` square.
    pub async fn fetch_sprite(&self, url: &str) -> Result<Sprite, QueryError> {
        let res = self.http.get(url).send().await?;
        if !res.status().is_success() {
            return Err(QueryError::Network(format!(
                "HTTP {} from {}",
                res.status(),
                url
            )));
        }
        let bytes = res.bytes().await?;
        Sprite::from_bytes_resized(&bytes, SPRITE_SIZE, SPRITE_SIZE)
    }

    /// Look up `term` and its sprite, producing a complete `Entry`.
    pub async fn search(&self, term: &str) -> Result<Entry, QueryError> {
        let pokemon = self.fetch(term).await?;
        let sprite = match pokemon.sprite.as_deref() {
            Some(url) => Some(self.fetch_sprite(url).await?),
            None => None,
        };
        tracing::info!(
            term,
            name = %pokemon.name,
            id = pokemon.id,
            has_sprite = sprite.is_some(),
            "search complete"
        );
        Ok(Entry {
            term: term.to_string(),
            pokemon,
            sprite,
        })
    }
}
