//! Named-entity recognition.
//!
//! The recognizer is an opaque external capability: it takes plain text and
//! returns `(span, label)` pairs. Which entities come back is a property of
//! whatever model sits behind it.

pub mod http;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use serde::Deserialize;

use crate::base::types::Res;

// Types.

/// A recognized span of text and its entity label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }

    /// Whether the label marks a person name (`PERSON` in spaCy-style models, `PER` in CoNLL-style ones).
    pub fn is_person(&self) -> bool {
        self.label.eq_ignore_ascii_case("PERSON") || self.label.eq_ignore_ascii_case("PER")
    }
}

// Traits.

/// Generic entity recognizer trait that clients must implement.
#[async_trait]
pub trait GenericEntityRecognizer: Send + Sync + 'static {
    /// Runs the text through the recognizer and returns entities in document order.
    async fn recognize(&self, text: &str) -> Res<Vec<Entity>>;
}

// Structs.

/// Entity recognizer for the application.
///
/// Built once at startup; trivially cloneable.
#[derive(Clone)]
pub struct EntityRecognizer {
    inner: Arc<dyn GenericEntityRecognizer>,
}

impl Deref for EntityRecognizer {
    type Target = dyn GenericEntityRecognizer;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl EntityRecognizer {
    pub fn new(inner: Arc<dyn GenericEntityRecognizer>) -> Self {
        Self { inner }
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_person_accepts_common_labels() {
        assert!(Entity::new("Will Griffin", "PERSON").is_person());
        assert!(Entity::new("Will Griffin", "per").is_person());
        assert!(!Entity::new("State", "ORG").is_person());
    }
}
