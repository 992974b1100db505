//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use anyhow::anyhow;
use serde::Deserialize;

use crate::lookup::{links::SearchProvider, name::NameStrategy};

use super::types::{Res, Void};

/// Default emoji that triggers a lookup.
fn default_trigger_emoji() -> String {
    "🔍".to_string()
}

/// Default recognizer request timeout, in seconds.
fn default_ner_timeout_secs() -> u64 {
    10
}

/// Default providers, in reply order.
fn default_search_providers() -> Vec<SearchProvider> {
    vec![SearchProvider::TwoFourSeven, SearchProvider::On3]
}

fn default_true() -> bool {
    true
}

/// Default liveness port.
fn default_liveness_port() -> u16 {
    8080
}

/// Default send timeout, in seconds.
fn default_send_timeout_secs() -> u64 {
    10
}

/// Default number of events buffered between the gateway and the handler.
fn default_event_queue_capacity() -> usize {
    64
}

/// Configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Discord bot token (`DISCORD_TOKEN`).
    #[serde(default)]
    pub discord_token: String,
    /// Reaction that triggers a lookup (`TRIGGER_EMOJI`).
    #[serde(default = "default_trigger_emoji")]
    pub trigger_emoji: String,
    /// Name extraction strategy, `positional` or `entity` (`NAME_STRATEGY`).
    #[serde(default)]
    pub name_strategy: NameStrategy,
    /// Entity recognizer endpoint, required for the `entity` strategy (`NER_ENDPOINT`).
    #[serde(default)]
    pub ner_endpoint: Option<String>,
    /// Entity recognizer request timeout in seconds (`NER_TIMEOUT_SECS`).
    #[serde(default = "default_ner_timeout_secs")]
    pub ner_timeout_secs: u64,
    /// Comma-separated providers to link to, in order (`SEARCH_PROVIDERS`).
    #[serde(default = "default_search_providers")]
    pub search_providers: Vec<SearchProvider>,
    /// Whether direct messages to the bot trigger lookups (`DIRECT_MESSAGES`).
    #[serde(default = "default_true")]
    pub direct_messages: bool,
    /// Whether to run the liveness endpoint (`LIVENESS_ENABLED`).
    #[serde(default = "default_true")]
    pub liveness_enabled: bool,
    /// Liveness endpoint port, bound on all interfaces (`LIVENESS_PORT`).
    #[serde(default = "default_liveness_port")]
    pub liveness_port: u16,
    /// Seconds to wait for a reply to be accepted by the platform (`SEND_TIMEOUT_SECS`).
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
    /// Events buffered between the gateway and the handler (`EVENT_QUEUE_CAPACITY`).
    #[serde(default = "default_event_queue_capacity")]
    pub event_queue_capacity: usize,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            trigger_emoji: default_trigger_emoji(),
            name_strategy: NameStrategy::default(),
            ner_endpoint: None,
            ner_timeout_secs: default_ner_timeout_secs(),
            search_providers: default_search_providers(),
            direct_messages: true,
            liveness_enabled: true,
            liveness_port: default_liveness_port(),
            send_timeout_secs: default_send_timeout_secs(),
            event_queue_capacity: default_event_queue_capacity(),
        }
    }
}

impl Config {
    /// Loads from the environment, then the optional TOML file (which wins).
    ///
    /// Environment keys are unprefixed so the conventional `DISCORD_TOKEN` works as-is.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let env = config::Environment::default().try_parsing(true).list_separator(",").with_list_parse_key("search_providers");

        let mut cfg = config::Config::builder().add_source(env);

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Checks the values that serde cannot.
    pub fn validate(&self) -> Void {
        if self.discord_token.trim().is_empty() {
            return Err(anyhow!("DISCORD_TOKEN environment variable not found! Please set it to your Discord bot token."));
        }

        if self.trigger_emoji.trim().is_empty() {
            return Err(anyhow!("The trigger emoji must not be empty."));
        }

        if self.name_strategy == NameStrategy::Entity && self.ner_endpoint.as_deref().is_none_or(|e| e.trim().is_empty()) {
            return Err(anyhow!("The `entity` name strategy requires `NER_ENDPOINT`."));
        }

        if self.search_providers.is_empty() {
            return Err(anyhow!("At least one search provider must be configured."));
        }

        if self.event_queue_capacity < 1 {
            return Err(anyhow!("The event queue capacity must be at least 1."));
        }

        Ok(())
    }
}

// Tests.
