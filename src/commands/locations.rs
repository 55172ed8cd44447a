use anyhow::Result;
use std::sync::Arc;

use crate::cache::KeyValueStore;
use crate::identity::{IdentityProvider, SupabaseIdentity};
use crate::locations::{LocationStore, NewLocation, SupabaseLocations};
use crate::settings::Settings;
use crate::supabase::SupabaseClient;

fn open(settings: &Settings, store: Arc<dyn KeyValueStore>) -> Result<(SupabaseLocations, Option<String>)> {
    let client = SupabaseClient::new(settings.supabase()?)?;
    let identity = SupabaseIdentity::new(client.clone(), store);
    let token = identity
        .current_session()
        .unwrap_or(None)
        .map(|session| session.access_token);
    Ok((SupabaseLocations::new(client, &settings.locations_table), token))
}

pub fn list(settings: &Settings, store: Arc<dyn KeyValueStore>) -> Result<()> {
    let (locations, token) = open(settings, store)?;
    let rows = locations.select_all(token.as_deref())?;
    if rows.is_empty() {
        println!("No locations saved yet.");
    }
    for row in rows {
        match &row.created_at {
            Some(created_at) => println!(
                "{}  ({:.5}, {:.5})  added {}",
                row.title, row.latitude, row.longitude, created_at
            ),
            None => println!("{}  ({:.5}, {:.5})", row.title, row.latitude, row.longitude),
        }
    }
    Ok(())
}

pub fn add(
    settings: &Settings,
    store: Arc<dyn KeyValueStore>,
    title: &str,
    latitude: &str,
    longitude: &str,
) -> Result<()> {
    let location = NewLocation::parse(title, latitude, longitude)?;
    let (locations, token) = open(settings, store)?;
    let inserted = locations.insert(&location, token.as_deref())?;
    println!("Location added: {}", inserted.title);
    Ok(())
}
