//! Raw catalog records as served by the endpoints.
//!
//! Payloads are hand-maintained JSON, so decoding is lenient: every field is
//! optional, strings may arrive as numbers, and empty or zero values read as
//! absent so the display defaults apply to them.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// One entry of the carousel, movies or webseries collections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    #[serde(deserialize_with = "lenient_count")]
    pub id: Option<u32>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub poster: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub hero_bg: Option<String>,
    /// `None` unless the payload carried an actual array.
    #[serde(deserialize_with = "lenient_list")]
    pub genres: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_text")]
    pub genre: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub rating: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cast: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub quality: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub rank: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub seasons: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub episodes: Option<u32>,
    #[serde(rename = "seasonsData", deserialize_with = "lenient_seasons")]
    pub seasons_data: BTreeMap<u32, Vec<Episode>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Episode {
    #[serde(deserialize_with = "lenient_count")]
    pub episode: Option<u32>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContinueWatchingItem {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub rating: Option<String>,
    #[serde(deserialize_with = "lenient_percent")]
    pub progress: Option<f64>,
}

/// Decode a collection payload.
///
/// Anything other than a JSON array becomes an empty collection. Elements
/// that are not objects (nulls, stray strings) are skipped.
pub fn decode_collection<T: DeserializeOwned>(label: &str, value: Value) -> Vec<T> {
    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            warn!(
                "{} payload is not a list ({}), using an empty collection",
                label,
                json_kind(&other)
            );
            return Vec::new();
        }
    };

    let total = elements.len();
    let items: Vec<T> = elements
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|el| match serde_json::from_value(el) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!("{}: skipping undecodable entry: {}", label, e);
                None
            }
        })
        .collect();

    if items.len() != total {
        debug!("{}: kept {} of {} entries", label, items.len(), total);
    }
    items
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Lenient field decoders ────────────────────────────────────────────────────

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn count_of(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(n).ok().filter(|&n| n > 0)
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(text_of(&Value::deserialize(d)?))
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(count_of(&Value::deserialize(d)?))
}

fn lenient_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(values) => Some(values.iter().filter_map(text_of).collect()),
        _ => None,
    })
}

fn lenient_percent<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let pct = match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };
    Ok(pct.filter(|p| p.is_finite() && *p != 0.0))
}

fn lenient_seasons<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<BTreeMap<u32, Vec<Episode>>, D::Error> {
    let Value::Object(map) = Value::deserialize(d)? else {
        return Ok(BTreeMap::new());
    };
    let mut seasons = BTreeMap::new();
    for (key, value) in map {
        let Ok(season) = key.trim().parse::<u32>() else {
            continue;
        };
        seasons.insert(season, decode_collection("seasonsData", value));
    }
    Ok(seasons)
}
