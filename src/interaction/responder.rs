//! Reply formatting and delivery.

use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::{
    base::{
        replies::{NAME_NOT_FOUND_REPLY, lookup_reply},
        types::{DeliveryError, Destination, OutboundReply, ParsedName, SearchLink},
    },
    service::chat::ChatClient,
};

/// Builds the one reply for an accepted event.
pub fn build_reply(destination: Destination, found: Option<(&ParsedName, &[SearchLink])>) -> OutboundReply {
    let text = match found {
        Some((name, links)) => lookup_reply(name, links),
        None => NAME_NOT_FOUND_REPLY.to_string(),
    };

    OutboundReply { destination, text }
}

/// Sends replies and logs delivery failures by kind.
///
/// Trivially cloneable.
#[derive(Clone)]
pub struct Responder {
    chat: ChatClient,
    send_timeout: Duration,
}

impl Responder {
    pub fn new(chat: ChatClient, send_timeout: Duration) -> Self {
        Self { chat, send_timeout }
    }

    /// Sends `reply` once; never retries.
    #[instrument(skip_all, fields(destination = %reply.destination))]
    pub async fn deliver(&self, reply: &OutboundReply) -> Result<(), DeliveryError> {
        let result = match tokio::time::timeout(self.send_timeout, self.chat.send_reply(reply)).await {
            Ok(result) => result,
            Err(_) => Err(DeliveryError::TimedOut(self.send_timeout.as_secs())),
        };

        match &result {
            Ok(()) => info!("Sent reply to {}", reply.destination),
            Err(DeliveryError::Forbidden(cause)) => warn!("Could not message {} - DMs may be disabled: {}", reply.destination, cause),
            Err(DeliveryError::Transport(cause)) => error!("HTTP error when messaging {}: {}", reply.destination, cause),
            Err(DeliveryError::TimedOut(secs)) => error!("Timed out after {}s messaging {}", secs, reply.destination),
            Err(DeliveryError::Unexpected(cause)) => error!("Unexpected error when messaging {}: {}", reply.destination, cause),
        }

        result
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        base::types::{UserId, Void},
        lookup::links::SearchProvider,
        service::chat::{EventSender, GenericChatClient},
    };

    struct SlowChat;

    #[async_trait]
    impl GenericChatClient for SlowChat {
        async fn start(&self, _events: EventSender) -> Void {
            Ok(())
        }

        async fn send_reply(&self, _reply: &OutboundReply) -> Result<(), DeliveryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    #[test]
    fn test_missing_name_gets_apology() {
        let reply = build_reply(Destination::User(UserId(1)), None);

        assert_eq!(reply.text, NAME_NOT_FOUND_REPLY);
        assert_eq!(reply.destination, Destination::User(UserId(1)));
    }

    #[test]
    fn test_found_name_gets_links() {
        let name = ParsedName::new("Will", "Griffin").unwrap();
        let links = vec![SearchLink {
            provider: SearchProvider::On3,
            url: "https://www.on3.com/rivals/search/?searchText=Will+Griffin".to_string(),
        }];

        let reply = build_reply(Destination::User(UserId(1)), Some((&name, links.as_slice())));

        assert!(reply.text.starts_with("🔍 Recruiting lookups for Will Griffin:"));
        assert!(reply.text.contains("• On3: https://www.on3.com/rivals/search/?searchText=Will+Griffin"));
    }

    #[tokio::test]
    async fn test_hung_send_times_out() {
        let responder = Responder::new(ChatClient::new(Arc::new(SlowChat)), Duration::from_millis(20));
        let reply = build_reply(Destination::User(UserId(1)), None);

        let result = responder.deliver(&reply).await;

        assert_eq!(result, Err(DeliveryError::TimedOut(0)));
    }
}
