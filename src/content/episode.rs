use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(value) => value,
        StringOrNumber::Number(value) => value.to_string(),
    })
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Episode {
    pub id: i64,
    #[serde(rename = "Season", deserialize_with = "string_from_string_or_number")]
    pub season: String,
    #[serde(rename = "NumInSeason", deserialize_with = "string_from_string_or_number")]
    pub num_in_season: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "OriginalAirDate", default)]
    pub original_air_date: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

impl Episode {
    fn sort_key(&self) -> (u32, u32) {
        let parse = |s: &str| s.trim().parse::<u32>().unwrap_or(u32::MAX);
        (parse(&self.season), parse(&self.num_in_season))
    }
}

pub fn validate(episode: Episode) -> Result<Episode> {
    if episode.title.trim().is_empty() {
        return Err(anyhow!("episode {} has no title", episode.id));
    }
    Ok(episode)
}

/// Orders by numeric season, then number within the season. Unparseable numbers go last.
pub fn sort_episodes(episodes: &mut Vec<Episode>) {
    episodes.sort_by_key(Episode::sort_key);
}

#[derive(Clone, Debug, Default)]
pub struct EpisodeFilter {
    pub season: Option<String>,
    pub search: Option<String>,
}

impl EpisodeFilter {
    pub fn matches(&self, episode: &Episode) -> bool {
        if let Some(season) = &self.season {
            if episode.season != *season {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => {
                let search = search.to_lowercase();
                episode.title.to_lowercase().contains(&search)
                    || episode
                        .description
                        .as_deref()
                        .unwrap_or("")
                        .to_lowercase()
                        .contains(&search)
            }
            _ => true,
        }
    }

    pub fn apply<'a>(&self, episodes: &'a [Episode]) -> Vec<&'a Episode> {
        episodes.iter().filter(|e| self.matches(e)).collect()
    }
}
