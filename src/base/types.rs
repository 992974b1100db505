use std::fmt;

use thiserror::Error;

use crate::lookup::links::SearchProvider;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// Platform user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

/// Platform channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of notification that produced an [`IncomingEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Reaction,
    DirectMessage,
}

/// A single notification from the chat platform, reduced to what the lookup flow needs.
///
/// Created per notification and discarded once handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingEvent {
    pub kind: EventKind,
    /// Text of the reacted-to message, or of the direct message itself.
    pub raw_text: String,
    /// The reacting user, or the message author.
    pub origin_user: UserId,
    /// Whether the originating user is a bot account (including this bot).
    pub is_bot: bool,
    /// The reaction emoji, rendered as text (reactions only).
    pub reaction_symbol: Option<String>,
    /// The channel the message arrived on (direct messages only).
    pub channel: Option<ChannelId>,
    /// Whether the channel is a one-to-one private channel.
    pub is_private: bool,
}

impl IncomingEvent {
    /// Builds a "reaction added" event.
    pub fn reaction(raw_text: impl Into<String>, user: UserId, is_bot: bool, symbol: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Reaction,
            raw_text: raw_text.into(),
            origin_user: user,
            is_bot,
            reaction_symbol: Some(symbol.into()),
            channel: None,
            is_private: false,
        }
    }

    /// Builds a "message received" event.
    pub fn message(raw_text: impl Into<String>, author: UserId, is_bot: bool, channel: ChannelId, is_private: bool) -> Self {
        Self {
            kind: EventKind::DirectMessage,
            raw_text: raw_text.into(),
            origin_user: author,
            is_bot,
            reaction_symbol: None,
            channel: Some(channel),
            is_private,
        }
    }
}

/// A first and last name pulled out of free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    first_name: String,
    last_name: String,
}

impl ParsedName {
    /// Returns `None` unless both parts are non-empty single tokens.
    pub fn new(first_name: &str, last_name: &str) -> Option<Self> {
        let valid = |s: &str| !s.is_empty() && !s.chars().any(char::is_whitespace);

        if !valid(first_name) || !valid(last_name) {
            return None;
        }

        Some(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// `"{first} {last}"` with exactly one space.
impl fmt::Display for ParsedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// A search page on one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLink {
    pub provider: SearchProvider,
    pub url: String,
}

/// Where a reply is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// A direct message to the user.
    User(UserId),
    /// A message on an existing channel.
    Channel(ChannelId),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::User(id) => write!(f, "user {id}"),
            Destination::Channel(id) => write!(f, "channel {id}"),
        }
    }
}

/// The single reply sent for an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub destination: Destination,
    pub text: String,
}

/// Why a reply could not be delivered.
///
/// Every variant is recoverable: the event is dropped and the listener keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The recipient has private messages disabled or has blocked the bot.
    #[error("recipient refused the message: {0}")]
    Forbidden(String),
    /// The chat platform rejected the request or the transport failed.
    #[error("chat platform error: {0}")]
    Transport(String),
    /// The send did not complete within the configured timeout.
    #[error("send timed out after {0}s")]
    TimedOut(u64),
    /// Anything else.
    #[error("unexpected delivery failure: {0}")]
    Unexpected(String),
}

/// Why an event was dropped before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    FromBot,
    WrongSymbol,
    NotPrivate,
    DirectMessagesDisabled,
    NoDestination,
}

/// What happened to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    Ignored(IgnoreReason),
    Replied,
    DeliveryFailed(DeliveryError),
}

// Tests.
