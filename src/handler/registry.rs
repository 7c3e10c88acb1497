// src/handler/registry.rs
//! Registry mapping RC subjects to their handlers

use super::bible::{BIBLE_SUBJECTS, BibleHandler};
use super::obs::ObsHandler;
use super::obs_tsv::{ObsTsvHandler, ObsTsvVariant};
use super::ta::TaHandler;
use super::tsv::{TsvBookHandler, TsvKind};
use super::tw::TwHandler;
use super::Handler;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of conversion handlers
///
/// Built once before any conversion and only read afterwards. Lookups are
/// by the exact `dublin_core.subject` string.
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with every supported subject
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        self.register(Arc::new(ObsHandler));
        for subject in BIBLE_SUBJECTS {
            self.register(Arc::new(BibleHandler::new(*subject)));
        }
        self.register(Arc::new(TwHandler));
        self.register(Arc::new(TaHandler));
        for kind in TsvKind::ALL {
            self.register(Arc::new(TsvBookHandler::new(kind)));
        }
        for variant in ObsTsvVariant::ALL {
            self.register(Arc::new(ObsTsvHandler::new(variant)));
        }
    }

    /// Register a handler under the subject it declares
    pub fn register(&mut self, handler: Arc<dyn Handler>) {
        self.handlers.insert(handler.subject().to_string(), handler);
    }

    /// Get the handler for a subject
    pub fn get(&self, subject: &str) -> Option<&Arc<dyn Handler>> {
        self.handlers.get(subject)
    }

    /// Get the handler for a subject, or an error listing what is supported
    pub fn lookup(&self, subject: &str) -> Result<Arc<dyn Handler>> {
        self.get(subject)
            .cloned()
            .ok_or_else(|| Error::UnsupportedSubject {
                subject: subject.to_string(),
                supported: self.supported_subjects(),
            })
    }

    /// All registered subjects, sorted
    pub fn supported_subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self.handlers.keys().cloned().collect();
        subjects.sort();
        subjects
    }

    /// Check if a subject is registered
    pub fn has(&self, subject: &str) -> bool {
        self.handlers.contains_key(subject)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = HandlerRegistry::with_builtins();
        assert_eq!(registry.supported_subjects().len(), 14);
        assert!(registry.has("Aligned Bible"));
        assert!(registry.has("TSV OBS Translation Questions"));
        assert!(!registry.has("aligned bible"));
    }

    #[test]
    fn test_lookup_round_trip() {
        let registry = HandlerRegistry::with_builtins();
        for subject in registry.supported_subjects() {
            assert_eq!(registry.lookup(&subject).unwrap().subject(), subject);
        }
    }

    #[test]
    fn test_supported_subjects_sorted() {
        let subjects = HandlerRegistry::with_builtins().supported_subjects();
        let mut sorted = subjects.clone();
        sorted.sort();
        assert_eq!(subjects, sorted);
        assert_eq!(subjects[0], "Aligned Bible");
    }

    #[test]
    fn test_unsupported_subject() {
        let registry = HandlerRegistry::with_builtins();
        let err = registry.lookup("Unknown Subject").err().unwrap();
        match err {
            Error::UnsupportedSubject { subject, supported } => {
                assert_eq!(subject, "Unknown Subject");
                assert_eq!(supported, registry.supported_subjects());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = HandlerRegistry::new();
        assert!(registry.supported_subjects().is_empty());
        assert!(registry.lookup("Bible").is_err());
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HandlerRegistry>();
    }
}
