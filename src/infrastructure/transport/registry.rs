//! Transport Registry
//!
//! Maps URL schemes to transport factories.

use std::collections::BTreeMap;

use crate::domain::ports::Transport;

use super::{LocalTransport, ScpTransport};

/// Creates a fresh transport for one upload session
pub type TransportFactory = Box<dyn Fn() -> Box<dyn Transport> + Send + Sync>;

/// Registry of transports keyed by URL scheme
#[derive(Default)]
pub struct TransportRegistry {
    factories: BTreeMap<String, TransportFactory>,
}

impl TransportRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `file`, `scp` and `scpexe` transports
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("file", || Box::new(LocalTransport::new()));
        registry.register("scp", || Box::new(ScpTransport::new()));
        registry.register("scpexe", || Box::new(ScpTransport::new()));
        registry
    }

    /// Register (or replace) the factory for `scheme`
    pub fn register<F>(&mut self, scheme: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Transport> + Send + Sync + 'static,
    {
        self.factories
            .insert(scheme.into().to_ascii_lowercase(), Box::new(factory));
    }

    /// Registered schemes, sorted
    pub fn schemes(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Registered schemes as a comma separated list
    pub fn supported_protocols(&self) -> String {
        self.schemes().join(", ")
    }

    /// Create a transport for `scheme`
    pub fn create(&self, scheme: &str) -> Option<Box<dyn Transport>> {
        self.factories
            .get(&scheme.to_ascii_lowercase())
            .map(|factory| factory())
    }
}

impl std::fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}
