use anyhow::{Context, Result};
use log::info;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::supabase::SupabaseClient;

#[cfg(test)]
pub mod mock;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Location {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Set by the backend on insert.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A location that passed validation and can be inserted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewLocation {
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("name should not be empty")]
    MissingTitle,
    #[error("latitude should be a decimal number")]
    InvalidLatitude,
    #[error("longitude should be a decimal number")]
    InvalidLongitude,
    #[error("latitude should be between -90 and 90")]
    LatitudeOutOfRange,
    #[error("longitude should be between -180 and 180")]
    LongitudeOutOfRange,
}

/// Accepts either `.` or `,` as the decimal separator.
pub fn parse_coordinate(input: &str) -> Option<f64> {
    input
        .trim()
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

impl NewLocation {
    pub fn parse(title: &str, latitude: &str, longitude: &str) -> Result<NewLocation, LocationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LocationError::MissingTitle);
        }
        let latitude = parse_coordinate(latitude).ok_or(LocationError::InvalidLatitude)?;
        let longitude = parse_coordinate(longitude).ok_or(LocationError::InvalidLongitude)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange);
        }
        Ok(NewLocation {
            title: title.to_owned(),
            latitude,
            longitude,
        })
    }
}

pub trait LocationStore {
    fn insert(&self, location: &NewLocation, access_token: Option<&str>) -> Result<Location>;
    fn select_all(&self, access_token: Option<&str>) -> Result<Vec<Location>>;
}

/// Rows in a table of the hosted backend's REST interface.
pub struct SupabaseLocations {
    client: SupabaseClient,
    table: String,
}

impl SupabaseLocations {
    pub fn new(client: SupabaseClient, table: &str) -> Self {
        SupabaseLocations {
            client,
            table: table.to_owned(),
        }
    }

    fn path(&self, query: &str) -> String {
        format!("/rest/v1/{}{}", self.table, query)
    }
}

pub fn rows_from_response(body: Value) -> Result<Vec<Location>> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(body).context("unexpected location rows"),
        other => Ok(vec![
            serde_json::from_value(other).context("unexpected location row")?
        ]),
    }
}

impl LocationStore for SupabaseLocations {
    fn insert(&self, location: &NewLocation, access_token: Option<&str>) -> Result<Location> {
        let request = self
            .client
            .request(Method::POST, &self.path(""), access_token)
            .header("Prefer", "return=representation")
            .json(location);
        let body = self
            .client
            .send(request)
            .with_context(|| format!("Could not add {}", location.title))?;
        let inserted = rows_from_response(body)?
            .into_iter()
            .next()
            .context("Insert returned no rows")?;
        info!("Added location {}", inserted.title);
        Ok(inserted)
    }

    fn select_all(&self, access_token: Option<&str>) -> Result<Vec<Location>> {
        let request = self
            .client
            .request(Method::GET, &self.path("?select=*"), access_token);
        let body = self.client.send(request).context("Could not load locations")?;
        rows_from_response(body)
    }
}
