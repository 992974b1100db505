pub mod discord;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::base::types::{DeliveryError, IncomingEvent, OutboundReply, Void};

// Types.

/// Producer half of the event queue handed to the chat listener.
pub type EventSender = mpsc::Sender<IncomingEvent>;

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the core functionality for interacting with chat platforms
/// like Discord. Implementing this trait allows a different platform to drive the
/// lookup flow.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Start the chat client listener.
    ///
    /// Every accepted platform notification is converted to an [`IncomingEvent`]
    /// and pushed onto `events`. Runs until the connection ends.
    async fn start(&self, events: EventSender) -> Void;

    /// Send a reply to a user (as a direct message) or to a channel.
    ///
    /// Failures are classified rather than thrown, so callers can decide how
    /// loudly to log them.
    async fn send_reply(&self, reply: &OutboundReply) -> Result<(), DeliveryError>;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
