use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::cache;
use crate::quiz;

pub const DEFAULT_API_URL: &str = "https://sampleapis.assimilate.be/avatar";
pub const DEFAULT_LOCATIONS_TABLE: &str = "restaurants";

#[derive(Clone, Debug, PartialEq)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub api_url: String,
    pub cache_dir: Option<PathBuf>,
    pub supabase: Option<SupabaseSettings>,
    pub locations_table: String,
    pub quiz: quiz::Settings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: DEFAULT_API_URL.to_owned(),
            cache_dir: None,
            supabase: None,
            locations_table: DEFAULT_LOCATIONS_TABLE.to_owned(),
            quiz: Default::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Settings {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Settings {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Settings::default();
        let supabase = match (lookup("SUPABASE_URL"), lookup("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(SupabaseSettings { url, anon_key }),
            _ => None,
        };
        Settings {
            api_url: lookup("AVATAR_API_URL").unwrap_or(defaults.api_url),
            cache_dir: lookup("AVATAR_CACHE_DIR").map(PathBuf::from),
            supabase,
            locations_table: lookup("AVATAR_LOCATIONS_TABLE").unwrap_or(defaults.locations_table),
            quiz: defaults.quiz,
        }
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => cache::default_cache_dir(),
        }
    }

    pub fn supabase(&self) -> Result<&SupabaseSettings> {
        self.supabase
            .as_ref()
            .context("Missing supabase environment variables (SUPABASE_URL, SUPABASE_ANON_KEY)")
    }
}
