//! Discord integration through `serenity`.
//!
//! The gateway handler only translates notifications into [`IncomingEvent`]s and
//! enqueues them; all filtering and replying happens on the single event consumer.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use serenity::{
    all::{Client, Context, CreateMessage, EventHandler, GatewayIntents, Http, Message, Reaction, Ready},
    gateway::GatewayError,
    model::id::{ChannelId as DiscordChannelId, UserId as DiscordUserId},
};
use tracing::{debug, error, info, instrument, warn};

use crate::base::{
    config::Config,
    types::{ChannelId, DeliveryError, Destination, IncomingEvent, OutboundReply, Res, UserId, Void},
};

use super::{ChatClient, EventSender, GenericChatClient};

// Extra methods on `ChatClient` applied by the discord implementation.

impl ChatClient {
    /// Creates a new Discord chat client, verifying the token on the way.
    pub async fn discord(config: &Config) -> Res<Self> {
        let client = DiscordChatClient::new(config).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Discord client implementation.
struct DiscordChatClient {
    token: String,
    http: Arc<Http>,
    trigger_emoji: String,
    direct_messages: bool,
}

impl DiscordChatClient {
    /// Create a new Discord chat client.
    #[instrument(name = "DiscordChatClient::new", skip_all)]
    async fn new(config: &Config) -> Res<Self> {
        let http = Arc::new(Http::new(&config.discord_token));

        Self::connect(config, http).await
    }

    /// Verifies the token against `http` and builds the client around it.
    async fn connect(config: &Config, http: Arc<Http>) -> Res<Self> {
        // Get the bot's user, which also proves the token is valid.

        let me = http.get_current_user().await.map_err(|e| {
            if is_unauthorized(&e) {
                error!("Invalid Discord token!");
                anyhow!("Invalid Discord token! Please check `DISCORD_TOKEN`.")
            } else {
                anyhow!("Failed to fetch the bot user: {}", e)
            }
        })?;

        info!("Discord bot user: {} ({})", me.name, me.id);

        Ok(Self {
            token: config.discord_token.clone(),
            http,
            trigger_emoji: config.trigger_emoji.clone(),
            direct_messages: config.direct_messages,
        })
    }

    /// The gateway notifications the bot subscribes to.
    fn intents(&self) -> GatewayIntents {
        let mut intents = GatewayIntents::GUILD_MESSAGE_REACTIONS | GatewayIntents::DIRECT_MESSAGE_REACTIONS | GatewayIntents::MESSAGE_CONTENT;

        if self.direct_messages {
            intents |= GatewayIntents::DIRECT_MESSAGES;
        }

        intents
    }
}

#[async_trait]
impl GenericChatClient for DiscordChatClient {
    async fn start(&self, events: EventSender) -> Void {
        let handler = DiscordEventHandler {
            events,
            trigger_emoji: self.trigger_emoji.clone(),
        };

        let mut client = Client::builder(&self.token, self.intents()).event_handler(handler).await?;

        info!("Starting Discord bot ...");

        client.start().await.map_err(|e| match e {
            serenity::Error::Gateway(GatewayError::InvalidAuthentication) => {
                error!("Invalid Discord token!");
                anyhow!("Invalid Discord token! Please check `DISCORD_TOKEN`.")
            }
            e => anyhow!("Discord client stopped: {}", e),
        })
    }

    #[instrument(skip_all, fields(destination = %reply.destination))]
    async fn send_reply(&self, reply: &OutboundReply) -> Result<(), DeliveryError> {
        let message = CreateMessage::new().content(reply.text.clone());

        let result = match reply.destination {
            Destination::User(UserId(id)) => DiscordUserId::new(id).direct_message(&*self.http, message).await,
            Destination::Channel(ChannelId(id)) => DiscordChannelId::new(id).send_message(&*self.http, message).await,
        };

        result.map(|_| ()).map_err(classify_send_error)
    }
}

// Gateway event handler.

/// Translates gateway notifications into queued events.
struct DiscordEventHandler {
    events: EventSender,
    trigger_emoji: String,
}

impl DiscordEventHandler {
    async fn enqueue(&self, event: IncomingEvent) {
        if let Err(e) = self.events.send(event).await {
            error!("Event queue is closed, dropping event: {:?}", e.0.kind);
        }
    }
}

#[async_trait]
impl EventHandler for DiscordEventHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} has connected to Discord!", ready.user.name);
    }

    #[instrument(skip_all)]
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let symbol = reaction.emoji.to_string();

        // Skip the message fetch for reactions that can never trigger a lookup.
        if symbol != self.trigger_emoji {
            debug!("Ignoring reaction `{}`.", symbol);
            return;
        }

        let user = match reaction.user(&ctx).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Could not resolve the reacting user: {}", e);
                return;
            }
        };

        let message = match reaction.message(&ctx).await {
            Ok(message) => message,
            Err(e) => {
                warn!("Could not fetch the reacted-to message: {}", e);
                return;
            }
        };

        info!("User {} reacted with {} to message: '{}'", user.name, symbol, message.content.trim());

        self.enqueue(IncomingEvent::reaction(message.content, UserId(user.id.get()), user.bot, symbol)).await;
    }

    #[instrument(skip_all)]
    async fn message(&self, _ctx: Context, message: Message) {
        let is_private = message.guild_id.is_none();

        let event = IncomingEvent::message(
            message.content,
            UserId(message.author.id.get()),
            message.author.bot,
            ChannelId(message.channel_id.get()),
            is_private,
        );

        self.enqueue(event).await;
    }
}

// Helpers.

/// Whether the platform rejected the bot's credentials.
fn is_unauthorized(err: &serenity::Error) -> bool {
    matches!(err, serenity::Error::Http(e) if e.status_code().map(|s| s.as_u16()) == Some(401))
}

/// Maps a send failure onto the delivery taxonomy.
fn classify_send_error(err: serenity::Error) -> DeliveryError {
    match &err {
        serenity::Error::Http(e) => match e.status_code().map(|s| s.as_u16()) {
            // Discord answers 403 (code 50007) when the user has DMs closed or blocked the bot.
            Some(403) => DeliveryError::Forbidden(err.to_string()),
            _ => DeliveryError::Transport(err.to_string()),
        },
        _ => DeliveryError::Unexpected(err.to_string()),
    }
}

// Tests.
