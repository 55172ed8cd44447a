use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::quiz::definition::RawQuestion;

pub mod character;
pub mod episode;
mod question;

pub use character::Character;
pub use episode::{Episode, EpisodeFilter};

#[cfg(test)]
pub mod mock;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GatewayError {
    #[error("could not reach the content service: {0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Read access to the remote content collections.
pub trait ContentSource: Send + Sync {
    fn fetch_questions(&self) -> Result<Vec<RawQuestion>, GatewayError>;
    fn fetch_characters(&self) -> Result<Vec<Character>, GatewayError>;
    fn fetch_episodes(&self) -> Result<Vec<Episode>, GatewayError>;
}

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Result<HttpGateway> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("could not build HTTP client")?;
        Ok(HttpGateway {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn get_records(&self, resource: &str) -> Result<Vec<Value>, GatewayError> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }
        response
            .json::<Vec<Value>>()
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

impl ContentSource for HttpGateway {
    fn fetch_questions(&self) -> Result<Vec<RawQuestion>, GatewayError> {
        Ok(decode_questions(self.get_records("questions")?))
    }

    fn fetch_characters(&self) -> Result<Vec<Character>, GatewayError> {
        Ok(decode_characters(self.get_records("characters")?))
    }

    fn fetch_episodes(&self) -> Result<Vec<Episode>, GatewayError> {
        Ok(decode_episodes(self.get_records("episodes")?))
    }
}

pub fn decode_questions(records: Vec<Value>) -> Vec<RawQuestion> {
    validate(records, "question", question::into_raw_question)
}

pub fn decode_characters(records: Vec<Value>) -> Vec<Character> {
    validate(records, "character", character::validate)
}

pub fn decode_episodes(records: Vec<Value>) -> Vec<Episode> {
    validate(records, "episode", episode::validate)
}

/// Keeps the records that deserialize and pass `check`, logging the rest.
fn validate<W, T, F>(records: Vec<Value>, kind: &str, check: F) -> Vec<T>
where
    W: DeserializeOwned,
    F: Fn(W) -> Result<T>,
{
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let result = serde_json::from_value::<W>(record)
                .map_err(anyhow::Error::from)
                .and_then(&check);
            match result {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Skipping malformed {} record #{}: {:#}", kind, index, e);
                    None
                }
            }
        })
        .collect()
}
