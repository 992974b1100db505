//! Turning free text into recruiting search links.
//!
//! - `name` finds a first and last name in a message.
//! - `links` formats that name into each provider's search URL.

pub mod links;
pub mod name;
