//! Service integrations for external APIs and clients.
//!
//! This module contains the implementations for the services the bot talks to:
//! - Chat services (e.g., Discord)
//! - Entity recognition services (e.g., an HTTP NER endpoint)
//! - The liveness endpoint polled by the hosting platform
//!
//! Chat and entity recognition define both generic traits and concrete
//! implementations, allowing for extensibility and easy testing.

pub mod chat;
pub mod liveness;
pub mod ner;
