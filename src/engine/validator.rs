//! Guess acceptance
//!
//! Bank words are accepted locally without any I/O. Anything else goes to a
//! per-language remote service, and every remote failure fails closed.

use crate::config::EngineConfig;
use crate::core::normalize_word;
use crate::wordlists::{Language, WordBank};
use async_trait::async_trait;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote validation is disabled")]
    Offline,
}

/// A dictionary or spell-check service
#[async_trait]
pub trait RemoteValidator: Send + Sync {
    /// Whether the service recognizes `word` in `language`
    ///
    /// # Errors
    ///
    /// Returns an error when the answer cannot be obtained; callers must not
    /// treat that as acceptance.
    async fn lookup(&self, word: &str, language: Language) -> Result<bool, ValidatorError>;
}

/// Outcome of validating one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Found in the local bank
    Local,
    /// Confirmed by the remote service
    Remote,
    /// The remote service does not know the word
    Unrecognized,
    /// The remote service could not be reached or answered garbage
    NetworkDegraded,
}

impl Verdict {
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Local | Self::Remote)
    }
}

/// Local-first validator for one language
pub struct WordValidator {
    language: Language,
    local: FxHashSet<String>,
    remote: Arc<dyn RemoteValidator>,
}

impl WordValidator {
    #[must_use]
    pub fn new(bank: &WordBank, remote: Arc<dyn RemoteValidator>) -> Self {
        Self {
            language: bank.language(),
            local: bank.normalized_set(),
            remote,
        }
    }

    /// Whether `guess` is in the bank, accented or not
    #[must_use]
    pub fn is_local(&self, guess: &str) -> bool {
        self.local.contains(&normalize_word(guess)) || self.local.contains(&guess.trim().to_uppercase())
    }

    /// Decide whether `guess` may be played
    ///
    /// With `simulate_error` set, any guess outside the bank is reported as
    /// [`Verdict::NetworkDegraded`] without contacting the service.
    pub async fn validate(&self, guess: &str, simulate_error: bool) -> Verdict {
        if self.is_local(guess) {
            return Verdict::Local;
        }
        if simulate_error {
            debug!(guess, "simulated network failure");
            return Verdict::NetworkDegraded;
        }

        match self.remote.lookup(guess, self.language).await {
            Ok(true) => Verdict::Remote,
            Ok(false) => Verdict::Unrecognized,
            Err(e) => {
                warn!(guess, language = %self.language, error = %e, "remote validation failed");
                Verdict::NetworkDegraded
            }
        }
    }
}

/// Validator that never reaches the network
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineValidator;

#[async_trait]
impl RemoteValidator for OfflineValidator {
    async fn lookup(&self, _word: &str, _language: Language) -> Result<bool, ValidatorError> {
        Err(ValidatorError::Offline)
    }
}

/// Dictionary lookup for English, spell-check service for everything else
pub struct HttpValidator {
    client: reqwest::Client,
    dictionary_url: String,
    spellcheck_url: String,
}

#[derive(Debug, Deserialize)]
struct SpellcheckResponse {
    matches: Vec<SpellcheckMatch>,
}

#[derive(Debug, Deserialize)]
struct SpellcheckMatch {
    rule: SpellcheckRule,
}

#[derive(Debug, Deserialize)]
struct SpellcheckRule {
    #[serde(rename = "issueType", default)]
    issue_type: Option<String>,
}

impl HttpValidator {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.remote_timeout())
                .build()
                .unwrap_or_default(),
            dictionary_url: config.dictionary_url.trim_end_matches('/').to_string(),
            spellcheck_url: config.spellcheck_url.clone(),
        }
    }

    async fn lookup_dictionary(&self, word: &str) -> Result<bool, ValidatorError> {
        let url = format!("{}/{}", self.dictionary_url, word.trim().to_lowercase());
        let body: serde_json::Value = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(dictionary_has_entries(&body))
    }

    async fn lookup_spellcheck(&self, word: &str, language: Language) -> Result<bool, ValidatorError> {
        let body: SpellcheckResponse = self
            .client
            .get(&self.spellcheck_url)
            .query(&[("language", language.spellcheck_code()), ("text", word.trim())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(!has_misspelling(&body))
    }
}

#[async_trait]
impl RemoteValidator for HttpValidator {
    async fn lookup(&self, word: &str, language: Language) -> Result<bool, ValidatorError> {
        match language {
            Language::English => self.lookup_dictionary(word).await,
            Language::French | Language::Spanish | Language::Czech => {
                self.lookup_spellcheck(word, language).await
            }
        }
    }
}

fn dictionary_has_entries(body: &serde_json::Value) -> bool {
    body.as_array().is_some_and(|entries| !entries.is_empty())
}

fn has_misspelling(body: &SpellcheckResponse) -> bool {
    body.matches
        .iter()
        .any(|m| m.rule.issue_type.as_deref() == Some("misspelling"))
}
