//! Name extraction strategies.

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    base::types::ParsedName,
    service::ner::{Entity, EntityRecognizer},
};

/// Which extraction strategy to run, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStrategy {
    /// First two whitespace-separated tokens.
    #[default]
    Positional,
    /// First two-token person entity from the recognizer.
    Entity,
}

/// Pulls a first and last name out of free text.
#[derive(Clone)]
pub enum NameExtractor {
    Positional,
    EntityRecognition(EntityRecognizer),
}

impl NameExtractor {
    /// Extracts a name, or `None` when the text does not contain one.
    ///
    /// A recognizer failure is logged and treated as no name found.
    #[instrument(skip_all)]
    pub async fn extract(&self, text: &str) -> Option<ParsedName> {
        match self {
            NameExtractor::Positional => positional(text),
            NameExtractor::EntityRecognition(recognizer) => match recognizer.recognize(text).await {
                Ok(entities) => first_two_token_person(&entities),
                Err(err) => {
                    warn!("Entity recognizer failed: {:#}", err);
                    None
                }
            },
        }
    }
}

/// First token is the first name, second is the last name; the rest is ignored.
pub fn positional(text: &str) -> Option<ParsedName> {
    let mut words = text.split_whitespace();

    let first = words.next()?;
    let last = words.next()?;

    ParsedName::new(first, last)
}

/// Scans for the first person entity that is exactly two tokens long.
pub fn first_two_token_person(entities: &[Entity]) -> Option<ParsedName> {
    let mut found = None;

    for entity in entities.iter().filter(|e| e.is_person()) {
        let words: Vec<&str> = entity.text.split_whitespace().collect();

        if words.len() != 2 {
            debug!("Skipping person entity `{}` with {} tokens", entity.text, words.len());
            continue;
        }

        if found.is_some() {
            debug!("Ignoring additional person candidate `{}`", entity.text);
            continue;
        }

        found = ParsedName::new(words[0], words[1]);
    }

    found
}

// Tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::{
        base::types::Res,
        service::ner::{EntityRecognizer, GenericEntityRecognizer},
    };

    struct FixedRecognizer(Vec<Entity>);

    #[async_trait]
    impl GenericEntityRecognizer for FixedRecognizer {
        async fn recognize(&self, _text: &str) -> Res<Vec<Entity>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenRecognizer;

    #[async_trait]
    impl GenericEntityRecognizer for BrokenRecognizer {
        async fn recognize(&self, _text: &str) -> Res<Vec<Entity>> {
            Err(anyhow!("model offline"))
        }
    }

    #[test]
    fn test_positional_needs_two_tokens() {
        assert_eq!(positional(""), None);
        assert_eq!(positional("   "), None);
        assert_eq!(positional("Griffin"), None);
        assert_eq!(positional("  Griffin \n"), None);
    }

    #[test]
    fn test_positional_takes_first_two_tokens() {
        let name = positional("Will Griffin is a 2026 QB").unwrap();

        assert_eq!(name.first_name(), "Will");
        assert_eq!(name.last_name(), "Griffin");
    }

    #[test]
    fn test_positional_collapses_surrounding_whitespace() {
        let name = positional("\t Will \n\n  Griffin   commits").unwrap();

        assert_eq!(name.to_string(), "Will Griffin");
    }

    #[test]
    fn test_entity_scan_skips_non_person_and_long_names() {
        let entities = vec![
            Entity::new("State", "ORG"),
            Entity::new("Griffin", "PERSON"),
            Entity::new("Will Henry Griffin", "PERSON"),
            Entity::new("  Will Griffin ", "PERSON"),
            Entity::new("Bo Jackson", "PERSON"),
        ];

        let name = first_two_token_person(&entities).unwrap();

        assert_eq!(name.to_string(), "Will Griffin");
    }

    #[test]
    fn test_entity_scan_without_person_is_absent() {
        let entities = vec![Entity::new("State", "ORG"), Entity::new("2026", "DATE")];

        assert_eq!(first_two_token_person(&entities), None);
    }

    #[tokio::test]
    async fn test_entity_extractor_uses_recognizer() {
        let recognizer = EntityRecognizer::new(Arc::new(FixedRecognizer(vec![Entity::new("Arch Manning", "PERSON")])));
        let extractor = NameExtractor::EntityRecognition(recognizer);

        let name = extractor.extract("Huge news: Arch Manning to Texas").await.unwrap();

        assert_eq!(name.to_string(), "Arch Manning");
    }

    #[tokio::test]
    async fn test_entity_extractor_gives_up_on_recognizer_failure() {
        let extractor = NameExtractor::EntityRecognition(EntityRecognizer::new(Arc::new(BrokenRecognizer)));

        assert_eq!(extractor.extract("Coach says Will Griffin commits").await, None);
    }
}
