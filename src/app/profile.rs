use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::cache::{self, profile_key, KeyValueStore};

pub const DEFAULT_NAME: &str = "Aang";

fn default_name() -> String {
    DEFAULT_NAME.to_owned()
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UserProfile {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            name: default_name(),
            avatar: None,
        }
    }
}

pub fn load_profile(store: &dyn KeyValueStore, user_id: &str) -> UserProfile {
    match cache::load_json(store, &profile_key(user_id)) {
        Ok(Some(profile)) => profile,
        Ok(None) => UserProfile::default(),
        Err(e) => {
            warn!("Error loading profile for {}: {:#}", user_id, e);
            UserProfile::default()
        }
    }
}

pub fn save_profile(store: &dyn KeyValueStore, user_id: &str, profile: &UserProfile) -> Result<()> {
    cache::save_json(store, &profile_key(user_id), profile)
}
