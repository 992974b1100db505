//! Fixed reply text sent back to users.

use crate::base::types::{ParsedName, SearchLink};

/// Sent when no first and last name could be found in the message.
pub const NAME_NOT_FOUND_REPLY: &str = "❌ Please make sure the message contains at least a first name and last name.";

/// Builds the success reply: a header naming the person, then one bullet per link.
pub fn lookup_reply(name: &ParsedName, links: &[SearchLink]) -> String {
    let mut text = format!("🔍 Recruiting lookups for {name}:");

    for link in links {
        text.push_str(&format!("\n• {}: {}", link.provider, link.url));
    }

    text
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::links::SearchProvider;

    #[test]
    fn test_lookup_reply_lists_every_link_in_order() {
        let name = ParsedName::new("Will", "Griffin").unwrap();
        let links = vec![
            SearchLink {
                provider: SearchProvider::TwoFourSeven,
                url: "https://a".to_string(),
            },
            SearchLink {
                provider: SearchProvider::On3,
                url: "https://b".to_string(),
            },
        ];

        let reply = lookup_reply(&name, &links);

        assert_eq!(reply, "🔍 Recruiting lookups for Will Griffin:\n• 247Sports: https://a\n• On3: https://b");
    }
}
