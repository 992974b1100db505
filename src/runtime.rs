//! Runtime services and shared state for the bot.

use std::net::{Ipv4Addr, SocketAddr};

use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    interaction::lookup::LookupHandler,
    lookup::name::{NameExtractor, NameStrategy},
    service::{chat::ChatClient, liveness, ner::EntityRecognizer},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the chat client, the name extractor, and configuration.
/// Each is built once at startup and is trivially cloneable, allowing it to be
/// passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
    /// The name extractor (and its recognizer, if any).
    pub extractor: NameExtractor,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the name extractor.
        let extractor = match config.name_strategy {
            NameStrategy::Positional => NameExtractor::Positional,
            NameStrategy::Entity => NameExtractor::EntityRecognition(EntityRecognizer::http(&config)?),
        };

        info!("Using {:?} name extraction.", config.name_strategy);

        // Initialize the chat client.
        let chat = ChatClient::discord(&config).await?;

        Ok(Self { config, chat, extractor })
    }

    /// Runs the bot until the chat connection ends.
    ///
    /// The chat listener feeds a bounded queue; a single consumer task handles
    /// each event to completion before taking the next.
    pub async fn start(&self) -> Void {
        if self.config.liveness_enabled {
            let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.config.liveness_port));

            if let Err(e) = liveness::spawn(addr) {
                error!("Failed to start the liveness endpoint on {}: {}", addr, e);
            }
        }

        let (sender, receiver) = mpsc::channel(self.config.event_queue_capacity);

        let handler = LookupHandler::from_config(&self.config, self.chat.clone(), self.extractor.clone());
        let consumer = tokio::spawn(handler.run(receiver));

        let result = self.chat.start(sender).await;

        // The listener owned the only sender, so the consumer finishes once the queue is drained.
        if let Err(e) = consumer.await {
            error!("Lookup handler task failed: {}", e);
        }

        result
    }
}
