//! Decides which incoming events get a lookup, and where the reply goes.

use crate::base::{
    config::Config,
    types::{Destination, EventKind, IgnoreReason, IncomingEvent},
};

/// Event filter built from configuration.
#[derive(Debug, Clone)]
pub struct EventFilter {
    trigger_emoji: String,
    direct_messages: bool,
}

impl EventFilter {
    pub fn new(trigger_emoji: impl Into<String>, direct_messages: bool) -> Self {
        Self {
            trigger_emoji: trigger_emoji.into(),
            direct_messages,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.trigger_emoji.clone(), config.direct_messages)
    }

    /// Returns the reply destination for an accepted event.
    ///
    /// Reactions are answered by direct message to the reacting user; direct
    /// messages are answered on the same private channel.
    pub fn accept(&self, event: &IncomingEvent) -> Result<Destination, IgnoreReason> {
        match event.kind {
            EventKind::Reaction => {
                if event.is_bot {
                    return Err(IgnoreReason::FromBot);
                }

                if event.reaction_symbol.as_deref() != Some(self.trigger_emoji.as_str()) {
                    return Err(IgnoreReason::WrongSymbol);
                }

                Ok(Destination::User(event.origin_user))
            }
            EventKind::DirectMessage => {
                if !self.direct_messages {
                    return Err(IgnoreReason::DirectMessagesDisabled);
                }

                if event.is_bot {
                    return Err(IgnoreReason::FromBot);
                }

                if !event.is_private {
                    return Err(IgnoreReason::NotPrivate);
                }

                event.channel.map(Destination::Channel).ok_or(IgnoreReason::NoDestination)
            }
        }
    }
}

// Tests.
