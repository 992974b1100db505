//! Search link construction.
//!
//! Each provider has a fixed URL template and its own percent-encoding
//! convention for spaces, which must be kept per provider.

use std::fmt;

use serde::Deserialize;

use crate::base::types::{ParsedName, SearchLink};

/// 247Sports recruit search for the 2026 class.
const TWO_FOUR_SEVEN_URL: &str = "https://247sports.com/Season/2026-Football/Recruits/?&Player.FirstName={first}&Player.LastName={last}";

/// On3 (Rivals) full-text search.
const ON3_URL: &str = "https://www.on3.com/rivals/search/?searchText={name}";

/// A recruiting site the bot links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SearchProvider {
    /// Separate first/last parameters, spaces encoded as `%20`.
    #[serde(rename = "247sports", alias = "247Sports")]
    TwoFourSeven,
    /// One `searchText` parameter, form-encoded (spaces as `+`).
    #[serde(rename = "on3", alias = "On3")]
    On3,
}

impl SearchProvider {
    /// Builds the search URL for `name` on this provider.
    pub fn url_for(&self, name: &ParsedName) -> String {
        match self {
            SearchProvider::TwoFourSeven => TWO_FOUR_SEVEN_URL
                .replace("{first}", &encode_component(name.first_name()))
                .replace("{last}", &encode_component(name.last_name())),
            SearchProvider::On3 => ON3_URL.replace("{name}", &encode_form(&name.to_string())),
        }
    }
}

impl fmt::Display for SearchProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchProvider::TwoFourSeven => write!(f, "247Sports"),
            SearchProvider::On3 => write!(f, "On3"),
        }
    }
}

/// Builds one link per provider, in the order given.
pub fn build_links(name: &ParsedName, providers: &[SearchProvider]) -> Vec<SearchLink> {
    providers
        .iter()
        .map(|provider| SearchLink {
            provider: *provider,
            url: provider.url_for(name),
        })
        .collect()
}

/// Escapes everything but unreserved characters; a space becomes `%20`.
fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Query-string form encoding; a space becomes `+`.
fn encode_form(value: &str) -> String {
    // `encode` leaves no literal `+` behind (it becomes `%2B`), so this only touches spaces.
    urlencoding::encode(value).replace("%20", "+")
}

// Tests.
