use anyhow::{anyhow, Result};
use parking_lot::Mutex;

use crate::locations::{Location, LocationStore, NewLocation};

#[derive(Default)]
pub struct MockLocationStore {
    rows: Mutex<Vec<Location>>,
    tokens: Mutex<Vec<Option<String>>>,
    offline: bool,
}

impl MockLocationStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn offline() -> Self {
        MockLocationStore {
            offline: true,
            ..Default::default()
        }
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().clone()
    }

    fn record(&self, access_token: Option<&str>) -> Result<()> {
        self.tokens.lock().push(access_token.map(str::to_owned));
        if self.offline {
            return Err(anyhow!("could not reach the backend"));
        }
        Ok(())
    }
}

impl LocationStore for MockLocationStore {
    fn insert(&self, location: &NewLocation, access_token: Option<&str>) -> Result<Location> {
        self.record(access_token)?;
        let mut rows = self.rows.lock();
        let row = Location {
            id: Some(rows.len() as i64 + 1),
            title: location.title.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            created_at: Some("2024-01-01T00:00:00+00:00".to_owned()),
        };
        rows.push(row.clone());
        Ok(row)
    }

    fn select_all(&self, access_token: Option<&str>) -> Result<Vec<Location>> {
        self.record(access_token)?;
        Ok(self.rows.lock().clone())
    }
}
