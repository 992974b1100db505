//! HTTP entity recognizer.
//!
//! Posts `{"text": ...}` to a recognizer service and reads back
//! `{"entities": [{"text": ..., "label": ...}]}`.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::base::{config::Config, types::Res};

use super::{Entity, EntityRecognizer, GenericEntityRecognizer};

// Extra methods on `EntityRecognizer` applied by the http implementation.

impl EntityRecognizer {
    /// Creates a recognizer backed by the configured HTTP endpoint.
    pub fn http(config: &Config) -> Res<Self> {
        let client = HttpEntityRecognizer::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Wire types.

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    entities: Vec<Entity>,
}

// Specific implementations.

/// Recognizer that calls out to an HTTP service.
#[derive(Clone)]
pub struct HttpEntityRecognizer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEntityRecognizer {
    #[instrument(name = "HttpEntityRecognizer::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let endpoint = config.ner_endpoint.clone().ok_or_else(|| anyhow!("An entity recognizer endpoint (`NER_ENDPOINT`) is required."))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ner_timeout_secs))
            .build()
            .context("Failed to build entity recognizer HTTP client")?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl GenericEntityRecognizer for HttpEntityRecognizer {
    #[instrument(skip_all)]
    async fn recognize(&self, text: &str) -> Res<Vec<Entity>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RecognizeRequest { text })
            .send()
            .await
            .context("Entity recognizer request failed")?
            .error_for_status()
            .context("Entity recognizer returned an error status")?;

        let body: RecognizeResponse = response.json().await.context("Entity recognizer returned an unreadable body")?;

        debug!("Recognizer returned {} entities", body.entities.len());

        Ok(body.entities)
    }
}

// Tests.
