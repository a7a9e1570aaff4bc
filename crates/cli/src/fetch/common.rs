//! Shared HTTP plumbing for puzzle sources.
//!
//! `FetchClient` wraps a blocking reqwest client with retry, backoff and
//! error classification. Status codes map onto the 50-59 exit code range:
//!
//! | Status            | Behaviour        | Exit code               |
//! |-------------------|------------------|-------------------------|
//! | 401 / 403         | fail immediately | `EXIT_FETCH_AUTH`       |
//! | other 4xx but 429 | fail immediately | `EXIT_FETCH_VALIDATION` |
//! | 429               | retry, then fail | `EXIT_FETCH_RATE_LIMIT` |
//! | 5xx / network     | retry, then fail | `EXIT_FETCH_UPSTREAM`   |

use std::thread;
use std::time::Duration;

use crate::exit_codes;
use crate::CliError;

// ── Constants ───────────────────────────────────────────────────────

pub(crate) const USER_AGENT: &str = concat!("dailydoku/", env!("CARGO_PKG_VERSION"));

/// Longest body excerpt quoted in an error message.
const BODY_EXCERPT: usize = 200;

// ── FetchClient ─────────────────────────────────────────────────────

/// Shared HTTP client that handles retry, backoff, and error classification.
pub(crate) struct FetchClient {
    http: reqwest::blocking::Client,
    source_name: String,
    max_retries: u32,
    error_extractor: fn(&serde_json::Value, u16) -> String,
}

impl FetchClient {
    pub(crate) fn new(
        source_name: &str,
        timeout: Duration,
        max_retries: u32,
        error_extractor: fn(&serde_json::Value, u16) -> String,
    ) -> Result<Self, CliError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CliError {
                code: exit_codes::EXIT_ERROR,
                message: format!("failed to build HTTP client: {e}"),
                hint: None,
            })?;

        Ok(Self {
            http,
            source_name: source_name.to_string(),
            max_retries,
            error_extractor,
        })
    }

    /// GET `url` with retry + exponential backoff and return the body text
    /// (leading BOM stripped).
    pub(crate) fn get_text(&self, url: &str) -> Result<String, CliError> {
        let mut backoff_secs = 1u64;

        for attempt in 0..=self.max_retries {
            log::debug!("GET {url} (attempt {})", attempt + 1);

            match self.http.get(url).send() {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    // Auth errors: fail immediately
                    if status == 401 || status == 403 {
                        let msg = self.error_message(resp, status);
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_AUTH,
                            message: format!(
                                "{} auth failed ({}): {}",
                                self.source_name, status, msg
                            ),
                            hint: None,
                        });
                    }

                    // Other 4xx (not 429): fail immediately
                    if (400..500).contains(&status) && status != 429 {
                        let msg = self.error_message(resp, status);
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_VALIDATION,
                            message: format!(
                                "{} request rejected ({}): {}",
                                self.source_name, status, msg
                            ),
                            hint: None,
                        });
                    }

                    // Retryable: 429, 5xx
                    if status == 429 || status >= 500 {
                        if attempt == self.max_retries {
                            let (code, what) = if status == 429 {
                                (exit_codes::EXIT_FETCH_RATE_LIMIT, "rate limited")
                            } else {
                                (exit_codes::EXIT_FETCH_UPSTREAM, "upstream error")
                            };
                            return Err(CliError {
                                code,
                                message: format!(
                                    "{} {} after {} attempts ({})",
                                    self.source_name,
                                    what,
                                    attempt + 1,
                                    status,
                                ),
                                hint: None,
                            });
                        }

                        // Respect Retry-After header for 429
                        let wait = if status == 429 {
                            resp.headers()
                                .get("retry-after")
                                .and_then(|v| v.to_str().ok())
                                .and_then(|v| v.parse::<u64>().ok())
                                .unwrap_or(backoff_secs)
                        } else {
                            backoff_secs
                        };

                        log::warn!(
                            "retry {}/{} in {}s (HTTP {})",
                            attempt + 1,
                            self.max_retries,
                            wait,
                            status,
                        );
                        thread::sleep(Duration::from_secs(wait));
                        backoff_secs *= 2;
                        continue;
                    }

                    let text = resp.text().map_err(|e| CliError {
                        code: exit_codes::EXIT_FETCH_UPSTREAM,
                        message: format!(
                            "failed to read {} response body: {}",
                            self.source_name, e,
                        ),
                        hint: None,
                    })?;
                    return Ok(text.trim_start_matches('\u{feff}').to_string());
                }
                Err(e) => {
                    // Network/timeout errors: retry
                    if attempt == self.max_retries {
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_UPSTREAM,
                            message: format!(
                                "{} unreachable after {} attempts: {}",
                                self.source_name,
                                attempt + 1,
                                e,
                            ),
                            hint: Some("check the network connection or the puzzle URL".into()),
                        });
                    }

                    log::warn!(
                        "retry {}/{} in {}s ({})",
                        attempt + 1,
                        self.max_retries,
                        backoff_secs,
                        e,
                    );
                    thread::sleep(Duration::from_secs(backoff_secs));
                    backoff_secs *= 2;
                }
            }
        }

        // The loop always returns on its last attempt.
        Err(CliError {
            code: exit_codes::EXIT_FETCH_UPSTREAM,
            message: format!("{} request was never attempted", self.source_name),
            hint: None,
        })
    }

    fn error_message(&self, resp: reqwest::blocking::Response, status: u16) -> String {
        let body: serde_json::Value = resp.json().unwrap_or(serde_json::Value::Null);
        (self.error_extractor)(&body, status)
    }
}

/// Quote the start of a body in an error message.
pub(crate) fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(BODY_EXCERPT) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
