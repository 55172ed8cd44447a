use anyhow::{anyhow, Result};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{self, KeyValueStore, CHARACTERS_KEY, EPISODES_KEY, LAST_QUIZ_RESULT_KEY};
use crate::content::character::find_by_id;
use crate::content::episode::sort_episodes;
use crate::content::{ContentSource, EpisodeFilter, GatewayError};
use crate::quiz::result::QuizResult;
use crate::stores::{find_stores, Element, CITY_CENTRE};

#[derive(Debug, PartialEq)]
pub enum Freshness {
    Live,
    /// Served from the last snapshot because the fetch failed.
    Cached(GatewayError),
}

/// Saves a fresh collection, or falls back to the last saved one when the fetch failed.
pub fn with_snapshot<T: Serialize + DeserializeOwned>(
    fetched: Result<Vec<T>, GatewayError>,
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<(Vec<T>, Freshness)> {
    match fetched {
        Ok(items) => {
            if let Err(e) = cache::save_json(store, key, &items) {
                warn!("Could not save {} snapshot: {:#}", key, e);
            }
            Ok((items, Freshness::Live))
        }
        Err(error) => {
            let cached: Option<Vec<T>> = cache::load_json(store, key).unwrap_or_else(|e| {
                warn!("Could not read {} snapshot: {:#}", key, e);
                None
            });
            match cached {
                Some(items) => Ok((items, Freshness::Cached(error))),
                None => Err(anyhow!(error)),
            }
        }
    }
}

fn announce(freshness: &Freshness) {
    if let Freshness::Cached(error) = freshness {
        println!("Offline ({}). Showing saved data.", error);
    }
}

pub fn characters(source: &dyn ContentSource, store: &dyn KeyValueStore, search: Option<&str>) -> Result<()> {
    let (characters, freshness) = with_snapshot(source.fetch_characters(), store, CHARACTERS_KEY)?;
    announce(&freshness);
    let query = search.unwrap_or("");
    let found: Vec<_> = characters.iter().filter(|c| c.matches(query)).collect();
    if found.is_empty() {
        println!("No characters found.");
    }
    for character in found {
        println!("{:>4}  {}", character.id, character.name);
    }
    Ok(())
}

pub fn character(source: &dyn ContentSource, store: &dyn KeyValueStore, id: i64) -> Result<()> {
    let (characters, freshness) = with_snapshot(source.fetch_characters(), store, CHARACTERS_KEY)?;
    announce(&freshness);
    let character = find_by_id(&characters, id).ok_or_else(|| anyhow!("No character with id {}", id))?;
    println!("{}", character.name);
    println!("{}", character.image_url());
    for (label, value) in character.details() {
        println!("{}: {}", label, value);
    }
    Ok(())
}

pub fn episodes(source: &dyn ContentSource, store: &dyn KeyValueStore, filter: &EpisodeFilter) -> Result<()> {
    let (mut episodes, freshness) = with_snapshot(source.fetch_episodes(), store, EPISODES_KEY)?;
    announce(&freshness);
    sort_episodes(&mut episodes);
    let found = filter.apply(&episodes);
    if found.is_empty() {
        println!("No episodes found.");
    }
    for episode in found {
        println!(
            "S{}E{}  {}  ({})",
            episode.season, episode.num_in_season, episode.title, episode.original_air_date
        );
    }
    Ok(())
}

pub fn score(store: &dyn KeyValueStore) -> Result<()> {
    match cache::load_json::<QuizResult>(store, LAST_QUIZ_RESULT_KEY)? {
        Some(result) => {
            let date = result
                .taken_at()
                .map(|t| t.format("%d/%m/%Y %H:%M").to_string())
                .unwrap_or(result.timestamp.clone());
            println!("Last score: {} / {} on {}", result.score, result.max_score, date);
        }
        None => println!("No quiz played yet."),
    }
    Ok(())
}

pub fn stores(element: Option<Element>) -> Result<()> {
    for (store, distance) in find_stores(element, CITY_CENTRE) {
        println!(
            "{} [{}] {:.1}★  {:.2} km\n    {}",
            store.name, store.element, store.rating, distance, store.address
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryStore;

    #[test]
    fn fresh_collections_are_saved() {
        let store = MemoryStore::new();
        let (items, freshness) = with_snapshot(Ok(vec![1, 2, 3]), &store, EPISODES_KEY).unwrap();
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(freshness, Freshness::Live);
        let saved: Vec<i32> = cache::load_json(&store, EPISODES_KEY).unwrap().unwrap();
        assert_eq!(saved, vec![1, 2, 3]);
    }

    #[test]
    fn failed_fetch_falls_back_to_snapshot() {
        let store = MemoryStore::new();
        cache::save_json(&store, CHARACTERS_KEY, &vec!["Aang", "Appa"]).unwrap();
        let (items, freshness) =
            with_snapshot::<String>(Err(GatewayError::Status(503)), &store, CHARACTERS_KEY).unwrap();
        assert_eq!(items, vec!["Aang".to_owned(), "Appa".to_owned()]);
        assert_eq!(freshness, Freshness::Cached(GatewayError::Status(503)));
    }

    #[test]
    fn failed_fetch_without_snapshot_is_an_error() {
        let store = MemoryStore::new();
        let error = with_snapshot::<String>(Err(GatewayError::Status(500)), &store, CHARACTERS_KEY)
            .unwrap_err();
        assert_eq!(error.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn snapshot_save_failure_still_returns_items() {
        let store = MemoryStore::new();
        store.break_storage();
        let (items, _) = with_snapshot(Ok(vec![7]), &store, EPISODES_KEY).unwrap();
        assert_eq!(items, vec![7]);
    }
}
