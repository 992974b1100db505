//! Library root for `recruit-lookup-bot`.
//!
//! Recruit-lookup-bot is a Discord assistant for recruiting chatter designed to:
//! - Watch for a 🔍 reaction on a message (or a direct message to the bot)
//! - Pull a first and last name out of the message text
//! - Reply with search links for that name on 247Sports and On3
//!
//! The bot integrates with Discord for chat and, optionally, an external
//! named-entity recognizer for name extraction. The architecture is built
//! around extensible traits that allow for different implementations of
//! each service.

pub mod base;
pub mod interaction;
pub mod lookup;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the bot runtime:
/// - Creates the runtime context with the chat client and name extractor
/// - Starts the liveness endpoint and the main event loop
pub async fn start(config: Config) -> Void {
    info!("Starting recruit-lookup-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
