//! Daily puzzle source: one GET, one JSON object.

use std::time::Duration;

use dailydoku_config::settings::PuzzleSettings;
use dailydoku_engine::{grid, KindTable, PuzzleGrid};

use crate::exit_codes;
use crate::CliError;

use super::common::{self, FetchClient};

const SOURCE_NAME: &str = "puzzle source";

fn extract_error(body: &serde_json::Value, status: u16) -> String {
    body["error"]
        .as_str()
        .or_else(|| body["message"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

pub struct PuzzleClient {
    client: FetchClient,
    url: String,
}

impl PuzzleClient {
    pub fn new(settings: &PuzzleSettings) -> Result<Self, CliError> {
        let client = FetchClient::new(
            SOURCE_NAME,
            Duration::from_secs(settings.timeout_secs),
            settings.retries,
            extract_error,
        )?;
        Ok(Self { client, url: settings.url.clone() })
    }

    #[cfg(test)]
    fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    /// Raw body of the current puzzle.
    pub fn fetch(&self) -> Result<String, CliError> {
        log::info!("fetching puzzle from {}", self.url);
        let text = self.client.get_text(&self.url)?;
        log::debug!("puzzle body: {}", common::excerpt(&text));
        Ok(text)
    }

    /// Fetch and decode the current puzzle into a grid.
    pub fn fetch_grid(&self, kinds: &KindTable) -> Result<PuzzleGrid, CliError> {
        let text = self.fetch()?;
        let payload = grid::parse_payload(&text).map_err(|e| CliError {
            code: exit_codes::EXIT_PUZZLE_PARSE,
            message: e.to_string(),
            hint: Some(format!("the body started with: {}", common::excerpt(text.trim()))),
        })?;
        Ok(PuzzleGrid::from_payload(&payload, kinds))
    }
}
