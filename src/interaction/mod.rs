//! Event handling and user interactions for the bot.
//!
//! This module provides functionality for handling chat events:
//! - Filtering reactions and direct messages down to lookup requests
//! - Running the extract / link / reply flow for each accepted event
//! - Formatting replies and classifying delivery failures

pub mod listener;
pub mod lookup;
pub mod responder;
