//! The per-event lookup flow: filter, extract, build links, reply.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::{
    base::{
        config::Config,
        types::{HandleOutcome, IncomingEvent},
    },
    interaction::{
        listener::EventFilter,
        responder::{Responder, build_reply},
    },
    lookup::{
        links::{SearchProvider, build_links},
        name::NameExtractor,
    },
    service::chat::ChatClient,
};

/// Handles one event at a time, end to end.
///
/// Holds no per-event state; trivially cloneable.
#[derive(Clone)]
pub struct LookupHandler {
    filter: EventFilter,
    extractor: NameExtractor,
    providers: Vec<SearchProvider>,
    responder: Responder,
}

impl LookupHandler {
    pub fn new(filter: EventFilter, extractor: NameExtractor, providers: Vec<SearchProvider>, responder: Responder) -> Self {
        Self {
            filter,
            extractor,
            providers,
            responder,
        }
    }

    /// Wires a handler from configuration and the shared clients.
    pub fn from_config(config: &Config, chat: ChatClient, extractor: NameExtractor) -> Self {
        Self::new(
            EventFilter::from_config(config),
            extractor,
            config.search_providers.clone(),
            Responder::new(chat, Duration::from_secs(config.send_timeout_secs)),
        )
    }

    /// Handles a single event. Never fails: every problem ends up in the outcome and the logs.
    #[instrument(skip_all, fields(kind = ?event.kind, user = %event.origin_user))]
    pub async fn handle_event(&self, event: IncomingEvent) -> HandleOutcome {
        let destination = match self.filter.accept(&event) {
            Ok(destination) => destination,
            Err(reason) => {
                debug!("Ignoring event: {:?}", reason);
                return HandleOutcome::Ignored(reason);
            }
        };

        let text = event.raw_text.trim();

        let reply = match self.extractor.extract(text).await {
            Some(name) => {
                let links = build_links(&name, &self.providers);
                info!("Found {} in message, sending {} link(s)", name, links.len());
                build_reply(destination, Some((&name, links.as_slice())))
            }
            None => {
                info!("No first and last name in message '{}'", text);
                build_reply(destination, None)
            }
        };

        match self.responder.deliver(&reply).await {
            Ok(()) => HandleOutcome::Replied,
            Err(err) => HandleOutcome::DeliveryFailed(err),
        }
    }

    /// Drains the event queue, one event fully handled before the next begins.
    ///
    /// Returns when every sender has been dropped.
    pub async fn run(self, mut events: mpsc::Receiver<IncomingEvent>) {
        info!("Lookup handler is waiting for events ...");

        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }

        info!("Event queue closed, lookup handler stopping.");
    }
}
