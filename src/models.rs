use crate::error::QueryError;
use crate::sprite::Sprite;
use serde::Deserialize;

/// A single Pokémon as shown on the dex panels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    /// Regular (non-hidden) abilities, in API order.
    pub abilities: Vec<String>,
    pub hidden_ability: Option<String>,
    pub stats: BaseStats,
    /// Raw API units (tenths of a kilogram).
    pub weight: u32,
    /// Raw API units (tenths of a metre).
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub const COUNT: usize = 6;

    /// Build from `base_stat` values in the API's fixed order.
    pub fn from_ordered(values: &[u32]) -> Option<Self> {
        match values {
            [hp, attack, defense, special_attack, special_defense, speed, ..] => Some(Self {
                hp: *hp,
                attack: *attack,
                defense: *defense,
                special_attack: *special_attack,
                special_defense: *special_defense,
                speed: *speed,
            }),
            _ => None,
        }
    }
}

/// What the panels show after a successful search. Replaced as a whole on
/// every search, never patched.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The lowercased term that was searched.
    pub term: String,
    pub pokemon: Pokemon,
    /// Decoded sprite, `None` when the API has no front sprite.
    pub sprite: Option<Sprite>,
}

// Wire schema for `GET /pokemon/{name}`. Only the fields the dex reads.

#[derive(Debug, Deserialize)]
pub struct ApiPokemon {
    pub id: u32,
    pub name: String,
    pub sprites: ApiSprites,
    pub types: Vec<ApiTypeSlot>,
    pub abilities: Vec<ApiAbilitySlot>,
    pub stats: Vec<ApiStat>,
    pub weight: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct ApiSprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiTypeSlot {
    #[serde(rename = "type")]
    pub kind: ApiNamed,
}

#[derive(Debug, Deserialize)]
pub struct ApiAbilitySlot {
    pub ability: ApiNamed,
    pub is_hidden: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApiStat {
    pub base_stat: u32,
}

#[derive(Debug, Deserialize)]
pub struct ApiNamed {
    pub name: String,
}

impl TryFrom<ApiPokemon> for Pokemon {
    type Error = QueryError;

    fn try_from(api: ApiPokemon) -> Result<Self, Self::Error> {
        let values: Vec<u32> = api.stats.iter().map(|s| s.base_stat).collect();
        let stats = BaseStats::from_ordered(&values).ok_or_else(|| {
            QueryError::Decode(format!(
                "expected {} base stats, got {}",
                BaseStats::COUNT,
                values.len()
            ))
        })?;

        let mut abilities = Vec::new();
        let mut hidden_ability = None;
        for slot in api.abilities {
            if slot.is_hidden {
                // more than one hidden ability is not expected; the last one wins
                hidden_ability = Some(slot.ability.name);
            } else {
                abilities.push(slot.ability.name);
            }
        }

        Ok(Pokemon {
            id: api.id,
            name: api.name,
            sprite: api.sprites.front_default,
            types: api.types.into_iter().map(|t| t.kind.name).collect(),
            abilities,
            hidden_ability,
            stats,
            weight: api.weight,
            height: api.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIKACHU: &str = include_str!("../tests/fixtures/pikachu.json");

    #[test]
    fn pikachu_fixture_converts() {
        let api: ApiPokemon = serde_json::from_str(PIKACHU).unwrap();
        let p = Pokemon::try_from(api).unwrap();
        assert_eq!(p.id, 25);
        assert_eq!(p.name, "pikachu");
        assert_eq!(p.types, vec!["electric".to_string()]);
        assert_eq!(p.abilities, vec!["static".to_string()]);
        assert_eq!(p.hidden_ability.as_deref(), Some("lightning-rod"));
        assert_eq!(
            p.stats,
            BaseStats {
                hp: 35,
                attack: 55,
                defense: 40,
                special_attack: 50,
                special_defense: 50,
                speed: 90,
            }
        );
        assert_eq!(p.weight, 60);
        assert_eq!(p.height, 4);
        assert!(p.sprite.unwrap().ends_with("/25.png"));
    }

    #[test]
    fn null_sprite_is_accepted() {
        let body = r#"{"id":1,"name":"x","sprites":{"front_default":null},"types":[],
            "abilities":[],"stats":[{"base_stat":1},{"base_stat":2},{"base_stat":3},
            {"base_stat":4},{"base_stat":5},{"base_stat":6}],"weight":1,"height":1}"#;
        let api: ApiPokemon = serde_json::from_str(body).unwrap();
        let p = Pokemon::try_from(api).unwrap();
        assert!(p.sprite.is_none());
        assert_eq!(p.stats.speed, 6);
        assert!(p.hidden_ability.is_none());
    }

    #[test]
    fn short_stats_fail_decode() {
        let body = r#"{"id":1,"name":"x","sprites":{"front_default":null},"types":[],
            "abilities":[],"stats":[{"base_stat":1}],"weight":1,"height":1}"#;
        let api: ApiPokemon = serde_json::from_str(body).unwrap();
        match Pokemon::try_from(api) {
            Err(QueryError::Decode(msg)) => assert!(msg.contains("got 1")),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn missing_field_is_rejected_by_schema() {
        let body = r#"{"id":1,"name":"x"}"#;
        assert!(serde_json::from_str::<ApiPokemon>(body).is_err());
    }

    #[test]
    fn last_hidden_ability_wins() {
        let body = r#"{"id":1,"name":"x","sprites":{"front_default":null},"types":[],
            "abilities":[
                {"ability":{"name":"a"},"is_hidden":true},
                {"ability":{"name":"b"},"is_hidden":false},
                {"ability":{"name":"c"},"is_hidden":true}],
            "stats":[{"base_stat":1},{"base_stat":2},{"base_stat":3},
            {"base_stat":4},{"base_stat":5},{"base_stat":6}],"weight":1,"height":1}"#;
        let api: ApiPokemon = serde_json::from_str(body).unwrap();
        let p = Pokemon::try_from(api).unwrap();
        assert_eq!(p.abilities, vec!["b".to_string()]);
        assert_eq!(p.hidden_ability.as_deref(), Some("c"));
    }
}
