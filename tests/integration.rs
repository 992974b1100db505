#![cfg(test)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::anyhow;
use async_trait::async_trait;
use mockall::{Sequence, mock, predicate::always};
use recruit_lookup_bot::{
    base::{
        config::{Config, ConfigInner},
        replies::NAME_NOT_FOUND_REPLY,
        types::{ChannelId, DeliveryError, Destination, HandleOutcome, IgnoreReason, IncomingEvent, OutboundReply, Res, UserId, Void},
    },
    interaction::lookup::LookupHandler,
    lookup::{links::SearchProvider, name::NameExtractor},
    runtime::Runtime,
    service::{
        chat::{ChatClient, EventSender, GenericChatClient},
        ner::{Entity, EntityRecognizer, GenericEntityRecognizer},
    },
};

// Mocks.

// Mock chat client for testing.

mock! {
    pub Chat {}

    #[async_trait]
    impl GenericChatClient for Chat {
        async fn start(&self, events: EventSender) -> Void;
        async fn send_reply(&self, reply: &OutboundReply) -> Result<(), DeliveryError>;
    }
}

// Mock entity recognizer for testing.

mock! {
    pub Recognizer {}

    #[async_trait]
    impl GenericEntityRecognizer for Recognizer {
        async fn recognize(&self, text: &str) -> Res<Vec<Entity>>;
    }
}

type Sent = Arc<Mutex<Vec<OutboundReply>>>;

/// Mock chat client that records every reply and reports success.
fn get_recording_chat() -> (MockChat, Sent) {
    let sent: Sent = Arc::default();
    let sink = sent.clone();

    let mut mock = MockChat::new();

    mock.expect_send_reply().returning(move |reply| {
        sink.lock().unwrap().push(reply.clone());
        Ok(())
    });

    (mock, sent)
}

fn test_config() -> Config {
    Config {
        inner: Arc::new(ConfigInner {
            discord_token: "test-token".to_string(),
            liveness_enabled: false,
            ..Default::default()
        }),
    }
}

fn handler(chat: MockChat, extractor: NameExtractor) -> LookupHandler {
    LookupHandler::from_config(&test_config(), ChatClient::new(Arc::new(chat)), extractor)
}

fn trigger(text: &str) -> IncomingEvent {
    IncomingEvent::reaction(text, UserId(42), false, "🔍")
}

#[tokio::test]
async fn test_reaction_end_to_end_replies_with_both_links() {
    let (chat, sent) = get_recording_chat();
    let handler = handler(chat, NameExtractor::Positional);

    let outcome = handler.handle_event(trigger("Will Griffin commits to State")).await;

    assert_eq!(outcome, HandleOutcome::Replied);

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].destination, Destination::User(UserId(42)));
    assert!(sent[0].text.contains("Player.FirstName=Will"));
    assert!(sent[0].text.contains("Player.LastName=Griffin"));
    assert!(sent[0].text.contains("searchText=Will+Griffin"));
}

#[tokio::test]
async fn test_single_word_gets_apology_only() {
    let (chat, sent) = get_recording_chat();
    let handler = handler(chat, NameExtractor::Positional);

    let outcome = handler.handle_event(trigger("Griffin")).await;

    assert_eq!(outcome, HandleOutcome::Replied);
    assert_eq!(sent.lock().unwrap()[0].text, NAME_NOT_FOUND_REPLY);
}

#[tokio::test]
async fn test_bot_reaction_never_reaches_extractor_or_chat() {
    let mut chat = MockChat::new();
    chat.expect_send_reply().times(0);

    let mut recognizer = MockRecognizer::new();
    recognizer.expect_recognize().times(0);

    let handler = handler(chat, NameExtractor::EntityRecognition(EntityRecognizer::new(Arc::new(recognizer))));

    let outcome = handler.handle_event(IncomingEvent::reaction("Will Griffin", UserId(42), true, "🔍")).await;

    assert_eq!(outcome, HandleOutcome::Ignored(IgnoreReason::FromBot));
}

#[tokio::test]
async fn test_other_emoji_gets_no_reply() {
    let mut chat = MockChat::new();
    chat.expect_send_reply().times(0);

    let handler = handler(chat, NameExtractor::Positional);

    let outcome = handler.handle_event(IncomingEvent::reaction("Will Griffin", UserId(42), false, "🔥")).await;

    assert_eq!(outcome, HandleOutcome::Ignored(IgnoreReason::WrongSymbol));
}

#[tokio::test]
async fn test_direct_message_replies_on_same_channel() {
    let (chat, sent) = get_recording_chat();
    let handler = handler(chat, NameExtractor::Positional);

    let event = IncomingEvent::message("Arch Manning", UserId(42), false, ChannelId(500), true);
    let outcome = handler.handle_event(event).await;

    assert_eq!(outcome, HandleOutcome::Replied);
    assert_eq!(sent.lock().unwrap()[0].destination, Destination::Channel(ChannelId(500)));
}

#[tokio::test]
async fn test_entity_strategy_picks_person_from_sentence() {
    let (chat, sent) = get_recording_chat();

    let mut recognizer = MockRecognizer::new();
    recognizer
        .expect_recognize()
        .with(always())
        .times(1)
        .returning(|_| Ok(vec![Entity::new("Texas", "GPE"), Entity::new("Arch Manning", "PERSON")]));

    let handler = handler(chat, NameExtractor::EntityRecognition(EntityRecognizer::new(Arc::new(recognizer))));

    let outcome = handler.handle_event(trigger("Huge pickup for Texas as Arch Manning signs")).await;

    assert_eq!(outcome, HandleOutcome::Replied);

    let sent = sent.lock().unwrap();
    let text = &sent[0].text;
    assert!(text.contains("Player.FirstName=Arch"));
    assert!(text.contains("Player.LastName=Manning"));
}

#[tokio::test]
async fn test_recognizer_outage_gets_apology_not_wrong_links() {
    let (chat, sent) = get_recording_chat();

    let mut recognizer = MockRecognizer::new();
    recognizer.expect_recognize().times(1).returning(|_| Err(anyhow!("Entity recognizer returned an error status")));

    let handler = handler(chat, NameExtractor::EntityRecognition(EntityRecognizer::new(Arc::new(recognizer))));

    let outcome = handler.handle_event(trigger("Coach says Will Griffin commits")).await;

    assert_eq!(outcome, HandleOutcome::Replied);

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, NAME_NOT_FOUND_REPLY);
}

#[tokio::test]
async fn test_forbidden_delivery_is_reported_not_raised() {
    let mut chat = MockChat::new();
    chat.expect_send_reply().times(1).returning(|_| Err(DeliveryError::Forbidden("Cannot send messages to this user".to_string())));

    let handler = handler(chat, NameExtractor::Positional);

    let outcome = handler.handle_event(trigger("Will Griffin")).await;

    assert!(matches!(outcome, HandleOutcome::DeliveryFailed(DeliveryError::Forbidden(_))));
}

#[tokio::test]
async fn test_failed_delivery_does_not_block_next_event() {
    let sent: Sent = Arc::default();
    let sink = sent.clone();

    let mut seq = Sequence::new();
    let mut chat = MockChat::new();
    chat.expect_send_reply()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(DeliveryError::Transport("500 Internal Server Error".to_string())));
    chat.expect_send_reply().times(1).in_sequence(&mut seq).returning(move |reply| {
        sink.lock().unwrap().push(reply.clone());
        Ok(())
    });

    // Feed two events through the queue the same way the gateway listener does.
    chat.expect_start().times(1).returning(|events| {
        events.try_send(IncomingEvent::reaction("Will Griffin", UserId(42), false, "🔍"))?;
        events.try_send(IncomingEvent::reaction("Bo Jackson", UserId(43), false, "🔍"))?;
        Ok(())
    });

    let runtime = Runtime {
        config: test_config(),
        chat: ChatClient::new(Arc::new(chat)),
        extractor: NameExtractor::Positional,
    };

    tokio::time::timeout(Duration::from_secs(5), runtime.start()).await.expect("runtime did not drain the queue").unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].destination, Destination::User(UserId(43)));
    assert!(sent[0].text.contains("Player.FirstName=Bo"));
}

#[tokio::test]
async fn test_configured_providers_limit_links() {
    let config = Config {
        inner: Arc::new(ConfigInner {
            discord_token: "test-token".to_string(),
            search_providers: vec![SearchProvider::TwoFourSeven],
            liveness_enabled: false,
            ..Default::default()
        }),
    };

    let (chat, sent) = get_recording_chat();
    let handler = LookupHandler::from_config(&config, ChatClient::new(Arc::new(chat)), NameExtractor::Positional);

    handler.handle_event(trigger("Will Griffin")).await;

    let sent = sent.lock().unwrap();
    let text = &sent[0].text;
    assert!(text.contains("• 247Sports: https://247sports.com/"));
    assert!(!text.contains("on3.com"));
}
